//! Output formatting for rate records (table, JSON, markdown).

use crate::config::OutputFormat;
use crate::powersetter::RateRecord;

/// Formats rate records for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a list of records.
    pub fn format_records(&self, records: &[RateRecord]) -> String {
        if records.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No offers found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_records(records),
            OutputFormat::Table => self.table_records(records),
            OutputFormat::Markdown => self.markdown_records(records),
        }
    }

    // JSON formatting

    fn json_records(&self, records: &[RateRecord]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_records(&self, records: &[RateRecord]) -> String {
        let zip_width = 5;
        let price_width = 8;
        let terms_width = 16;
        let green_width = 12;
        let fee_width = 8;

        let mut lines = Vec::new();

        // Header
        lines.push(format!(
            "{:<zip_width$}  {:<price_width$}  {:<terms_width$}  {:<green_width$}  {:<fee_width$}  {}",
            "ZIP", "¢/kWh", "Terms", "Green", "Fee", "Utility"
        ));
        lines.push(format!(
            "{:-<zip_width$}  {:-<price_width$}  {:-<terms_width$}  {:-<green_width$}  {:-<fee_width$}  {:-<24}",
            "", "", "", "", "", ""
        ));

        // Rows
        for record in records {
            let fee_str = if record.has_fee() { record.fee.clone() } else { "-".to_string() };
            let terms = truncate(&record.terms, terms_width);
            let green = truncate(&record.green, green_width);

            lines.push(format!(
                "{:<zip_width$}  {:>price_width$.2}  {:<terms_width$}  {:<green_width$}  {:<fee_width$}  {}",
                record.zip_code, record.price_per_kwh, terms, green, fee_str, record.utility
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} offers", records.len()));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_records(&self, records: &[RateRecord]) -> String {
        let mut lines = Vec::new();

        lines.push("| ZIP | ¢/kWh | Terms | Green | Fee | Savings | Utility |".to_string());
        lines.push("|-----|-------|-------|-------|-----|---------|---------|".to_string());

        for record in records {
            let fee_str = if record.has_fee() { record.fee.as_str() } else { "" };

            lines.push(format!(
                "| {} | {:.2} | {} | {} | {} | {} | {} |",
                record.zip_code,
                record.price_per_kwh,
                record.terms,
                record.green,
                fee_str,
                record.savings,
                record.utility
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} offers found*", records.len()));

        lines.join("\n")
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let cut: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        s.to_string()
    }
}
