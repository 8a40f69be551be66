//! Integration tests for the rates parser using fixture files.

use powersetter_crawler::powersetter::client::DEFAULT_ORIGIN;
use powersetter_crawler::powersetter::Parser;

const RATES_FIXTURE: &str = include_str!("fixtures/rates_page.html");

#[test]
fn test_parse_rates_fixture() {
    let parser = Parser::new(DEFAULT_ORIGIN);
    let results = parser.parse_rates(RATES_FIXTURE, "19122").unwrap();

    // The middle card has no parseable price and is omitted entirely
    assert_eq!(results.count(), 2);
    assert_eq!(results.zip_code, "19122");
    assert_eq!(results.utility, "PECO Energy");

    // First card: no logo container, visible savings badge, zero fee
    let record = &results.records[0];
    assert_eq!(record.price_per_kwh, 9.85);
    assert_eq!(record.terms, "12 months");
    assert_eq!(record.green, "N");
    assert_eq!(record.savings, "15%");
    assert_eq!(record.fee, "");
    assert_eq!(record.info, "UGxhbiBkZXRhaWxz");
    assert_eq!(record.supplier_logo_url, "");
    assert_eq!(record.signup_url, "https://www.powersetter.com/signup/19122/acme-12");
    assert_eq!(record.utility, "PECO Energy");

    // Second record is the third card: logo absolutized, hidden savings
    // badge ignored, fee from the data attribute
    let record = &results.records[1];
    assert_eq!(record.price_per_kwh, 11.2);
    assert_eq!(record.terms, "24 months");
    assert_eq!(record.green, "100% Green");
    assert_eq!(record.savings, "");
    assert_eq!(record.fee, "$25");
    assert_eq!(record.supplier_logo_url, "https://www.powersetter.com/logos/x.png");
    assert_eq!(record.signup_url, "https://enroll.supplierx.com/plans/24");
}

#[test]
fn test_parse_empty_results() {
    let parser = Parser::new(DEFAULT_ORIGIN);
    let html = r#"
        <html>
        <body>
            <div class="rates-wrapper">
                <p>No offers are currently available in your area.</p>
            </div>
        </body>
        </html>
    "#;

    let results = parser.parse_rates(html, "99999").unwrap();
    assert!(results.is_empty());
    assert_eq!(results.utility, "Unknown Utility");
}

#[test]
fn test_filter_integration() {
    use powersetter_crawler::filters::FilterChainBuilder;

    let parser = Parser::new(DEFAULT_ORIGIN);
    let results = parser.parse_rates(RATES_FIXTURE, "19122").unwrap();

    // Build filter chain
    let filters = FilterChainBuilder::new()
        .price_range(Some(8.0), Some(12.0))
        .green_only(true)
        .build();

    let filtered = filters.apply(results.records);

    // Only the green 11.20¢ offer passes
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].price_per_kwh, 11.2);
    assert_eq!(filtered[0].green, "100% Green");
}
