//! Per-country surcharges of a payment method
//!
//! A payment method carries an ordered list of `(iso, amount)` pairs. Storage
//! and the admin UI exchange it as a delimited string, `DE:1.50;AT:2.00`, so
//! the list (de)serializes through that encoding while the rest of the crate
//! only sees typed pairs.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const PAIR_SEPARATOR: char = ';';
const ISO_SEPARATOR: char = ':';

/// Errors raised while parsing a surcharge string
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SurchargeParseError {
    #[error("Surcharge entry '{entry}' is not of the form iso:amount")]
    MissingSeparator { entry: String },

    #[error("Surcharge entry '{entry}' has an empty country code")]
    EmptyIso { entry: String },

    #[error("Surcharge amount '{amount}' for '{iso}' is not a decimal number")]
    InvalidAmount { iso: String, amount: String },
}

/// A surcharge for a single country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surcharge {
    /// ISO 3166 alpha-2 code of the country
    pub iso: String,
    /// Extra fee, scale preserved from the input
    pub amount: Decimal,
}

impl Surcharge {
    pub fn new(iso: impl Into<String>, amount: Decimal) -> Self {
        Self {
            iso: iso.into(),
            amount,
        }
    }
}

/// Ordered surcharge pairs of one payment method
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurchargeList(Vec<Surcharge>);

impl SurchargeList {
    pub fn new(entries: Vec<Surcharge>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Surcharge> {
        self.0.iter()
    }

    /// Amount for the given country code.
    ///
    /// When a code is listed more than once the last entry wins.
    pub fn amount_for(&self, iso: &str) -> Option<Decimal> {
        self.0
            .iter()
            .rev()
            .find(|s| s.iso == iso)
            .map(|s| s.amount)
    }
}

impl FromStr for SurchargeList {
    type Err = SurchargeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut entries = Vec::new();

        // empty segments come from trailing separators
        for entry in s.split(PAIR_SEPARATOR).map(str::trim).filter(|e| !e.is_empty()) {
            let (iso, amount) =
                entry
                    .split_once(ISO_SEPARATOR)
                    .ok_or_else(|| SurchargeParseError::MissingSeparator {
                        entry: entry.to_string(),
                    })?;

            let iso = iso.trim();
            if iso.is_empty() {
                return Err(SurchargeParseError::EmptyIso {
                    entry: entry.to_string(),
                });
            }

            let raw_amount = amount.trim();
            let amount = parse_decimal(raw_amount).ok_or_else(|| {
                SurchargeParseError::InvalidAmount {
                    iso: iso.to_string(),
                    amount: raw_amount.to_string(),
                }
            })?;

            entries.push(Surcharge::new(iso, amount));
        }

        Ok(Self(entries))
    }
}

impl fmt::Display for SurchargeList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, surcharge) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PAIR_SEPARATOR)?;
            }
            write!(f, "{}{}{}", surcharge.iso, ISO_SEPARATOR, surcharge.amount)?;
        }
        Ok(())
    }
}

impl Serialize for SurchargeList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SurchargeList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw {
            Some(raw) => raw.parse().map_err(serde::de::Error::custom),
            None => Ok(Self::default()),
        }
    }
}

/// Parse a decimal that may use a comma as decimal separator
pub fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(&raw.trim().replace(',', ".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_pairs_in_order() {
        let list: SurchargeList = "DE:1.50;AT:2.00".parse().unwrap();
        assert_eq!(list.len(), 2);
        let isos: Vec<&str> = list.iter().map(|s| s.iso.as_str()).collect();
        assert_eq!(isos, vec!["DE", "AT"]);
        assert_eq!(list.amount_for("DE"), Some(dec("1.50")));
        assert_eq!(list.amount_for("AT"), Some(dec("2.00")));
        assert_eq!(list.amount_for("FR"), None);
    }

    #[test]
    fn test_format_keeps_scale_and_order() {
        let list: SurchargeList = "CH:5.00;DE:1.50".parse().unwrap();
        assert_eq!(list.to_string(), "CH:5.00;DE:1.50");
    }

    #[test]
    fn test_empty_string_is_empty_list() {
        let list: SurchargeList = "".parse().unwrap();
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "");
    }

    #[test]
    fn test_trailing_separator_is_ignored() {
        let list: SurchargeList = "DE:1.50;".parse().unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_comma_amount_is_accepted() {
        let list: SurchargeList = "DE:1,50".parse().unwrap();
        assert_eq!(list.amount_for("DE"), Some(dec("1.50")));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let list: SurchargeList = "DE:1.00;DE:3.00".parse().unwrap();
        assert_eq!(list.amount_for("DE"), Some(dec("3.00")));
    }

    #[test]
    fn test_missing_separator_is_rejected() {
        let err = "DE:1.50;AT".parse::<SurchargeList>().unwrap_err();
        assert_eq!(
            err,
            SurchargeParseError::MissingSeparator {
                entry: "AT".to_string()
            }
        );
    }

    #[test]
    fn test_empty_iso_is_rejected() {
        let err = ":1.50".parse::<SurchargeList>().unwrap_err();
        assert!(matches!(err, SurchargeParseError::EmptyIso { .. }));
    }

    #[test]
    fn test_invalid_amount_is_rejected() {
        let err = "DE:abc".parse::<SurchargeList>().unwrap_err();
        assert_eq!(
            err,
            SurchargeParseError::InvalidAmount {
                iso: "DE".to_string(),
                amount: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_serde_uses_delimited_string() {
        let list: SurchargeList = "DE:1.50".parse().unwrap();
        assert_eq!(serde_json::to_value(&list).unwrap(), "DE:1.50");

        let parsed: SurchargeList = serde_json::from_value(serde_json::json!("AT:2.00")).unwrap();
        assert_eq!(parsed.amount_for("AT"), Some(dec("2.00")));

        let parsed: SurchargeList = serde_json::from_value(serde_json::Value::Null).unwrap();
        assert!(parsed.is_empty());

        assert!(serde_json::from_value::<SurchargeList>(serde_json::json!("DE")).is_err());
    }
}
