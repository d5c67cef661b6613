use anyhow::Result;
use chrono::NaiveDateTime;
use hub_core::dates;

/// Parse an explicit `--due` value as a natural-language date phrase.
pub fn parse_due_date(date_str: &str) -> Result<NaiveDateTime> {
    dates::parse_natural(date_str)
        .map(|parsed| parsed.date)
        .ok_or_else(|| anyhow::anyhow!("Failed to parse due date '{}'", date_str))
}
