use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// One trading day for one symbol, as delivered by a data source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRecord {
    #[serde(rename = "identifier", alias = "ticker", alias = "symbol")]
    pub symbol: String,
    #[serde(rename = "tradeDate", deserialize_with = "de_trade_date")]
    pub trade_date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    #[serde(default)]
    pub change: f64,
    #[serde(default)]
    pub change_percent: f64,
}

/// Accepts `2019-01-02`, `2019-01-02T00:00:00` and `1/2/2019 12:00:00 AM`.
/// Any time component is dropped.
pub fn parse_trade_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw
        .trim()
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()?;

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_part, "%m/%d/%Y"))
        .ok()
}

pub fn de_trade_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_trade_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised trade date '{}'", raw)))
}
