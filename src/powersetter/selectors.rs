//! CSS selectors for PowerSetter HTML parsing.
//!
//! This file contains all CSS selectors used for locating and dissecting
//! rate cards. Update this file when PowerSetter changes their HTML
//! structure.
//!
//! **Update process**: When parsing fails, capture HTML sample,
//! update selectors, and add test fixture.

use scraper::Selector;
use std::sync::LazyLock;

/// Card-location strategies for results pages.
///
/// Strategies are tried in order; the first one yielding at least one
/// element wins and the rest are ignored. Results are never merged across
/// strategies.
pub mod cards {
    use super::*;

    /// Conventional rates-table card children - the current page layout.
    pub static RATES_TABLE_CARDS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".rates-table .card").unwrap());

    /// Rates container located by id fragment.
    pub static RATES_CONTAINER_CARDS: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("[id*='ratesTable'] .card").unwrap());

    /// Generic card classes seen on older page revisions.
    pub static GENERIC_CARDS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".rate-card, \
             .plan-card, \
             .offer-card",
        )
        .unwrap()
    });

    /// Loosest fallback: direct children of the rates table.
    pub static TABLE_CHILDREN: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".rates-table > div").unwrap());

    /// All strategies in priority order.
    pub fn strategies() -> [&'static Selector; 4] {
        [&*RATES_TABLE_CARDS, &*RATES_CONTAINER_CARDS, &*GENERIC_CARDS, &*TABLE_CHILDREN]
    }
}

/// Field selectors within a single rate card.
pub mod card {
    use super::*;

    /// Price display element.
    pub static PRICE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "p.price, \
             .price, \
             .rate-value",
        )
        .unwrap()
    });

    /// Contract-length label.
    pub static TERM: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "p.term, \
             .term, \
             .plan-length, \
             .contract-length",
        )
        .unwrap()
    });

    /// Renewable-energy label.
    pub static GREEN: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "p.green, \
             .green, \
             .renewable-label",
        )
        .unwrap()
    });

    /// Fee attribute on the card element itself.
    pub static FEE_ATTR: &str = "data-fee";

    /// Fee label fallback when the attribute is absent.
    pub static FEE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".fee, \
             .monthly-fee, \
             .fee-label",
        )
        .unwrap()
    });

    /// Savings badge. The site spells the class "persent".
    pub static SAVINGS: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "span.persent, \
             .persent, \
             .savings",
        )
        .unwrap()
    });

    /// More-info button carrying the encoded plan details.
    pub static INFO_BUTTON: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "button.more-info-button, \
             .more-info-button",
        )
        .unwrap()
    });

    /// Attribute holding the encoded plan details.
    pub static INFO_ATTR: &str = "data-encoded-contents";

    /// Signup redirect button.
    pub static SIGNUP_BUTTON: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "button.button-redirect, \
             .button-redirect",
        )
        .unwrap()
    });

    /// Attribute holding the signup redirect target.
    pub static SIGNUP_ATTR: &str = "data-redirect";

    /// Anchor fallback for the signup link.
    pub static SIGNUP_LINK: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "a[href*='signup'], \
             a[href*='enroll'], \
             a[href*='apply']",
        )
        .unwrap()
    });
}

/// Supplier-logo selectors.
pub mod logo {
    use super::*;

    /// Designated logo container inside a card.
    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "p.logo, \
             .logo, \
             .supplier-logo",
        )
        .unwrap()
    });

    /// Any image inside the logo container.
    pub static IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

    /// Image source attributes in probe order; the lazy-load variants are
    /// populated before the real src on deferred images.
    pub static IMG_SRC_ATTRS: &[&str] = &["src", "data-src", "data-original"];

    /// Nested image whose class suggests a supplier logo.
    pub static NESTED_BRANDED: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img[class*='logo'], \
             img[class*='supplier']",
        )
        .unwrap()
    });

    /// Generic logo-like elements anywhere in the card, tried when the
    /// designated container is absent.
    pub static GENERIC: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "img[alt*='logo'], \
             img[alt*='supplier'], \
             img[src*='logo'], \
             .logo-container img",
        )
        .unwrap()
    });
}

/// Selectors for detecting challenge/error pages.
pub mod errors {
    use super::*;

    /// Bot-challenge form.
    pub static CAPTCHA: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "form[action*='captcha'], \
             img[src*='captcha'], \
             iframe[src*='challenge']",
        )
        .unwrap()
    });

    /// Maintenance interstitial.
    pub static MAINTENANCE: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".maintenance-page, \
             #maintenance-notice",
        )
        .unwrap()
    });
}
