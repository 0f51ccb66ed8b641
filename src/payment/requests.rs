//! Typed request payloads of the payment endpoints
//!
//! The admin UI posts the whole form, so almost every field is optional:
//! absent fields leave the stored value alone. Decimal fields may arrive as
//! numbers or as strings with either `,` or `.` as decimal separator.

use crate::core::surcharge::{SurchargeParseError, parse_decimal};
use crate::entities::{PaymentAttribute, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use validator::Validate;

/// Reference to an associated entity, as sent by the UI (`{"id": 2}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct EntityRef {
    pub id: i64,
}

/// Fields shared by the create and update forms
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFields {
    #[validate(length(max = 255))]
    pub description: Option<String>,
    pub additional_description: Option<String>,
    pub template: Option<String>,
    pub class: Option<String>,
    pub table: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hide: Option<bool>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub debit_percent: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub surcharge: Option<Decimal>,
    /// Per-country surcharges as `iso:amount;iso:amount`
    pub surcharge_string: Option<String>,
    pub position: Option<i32>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub esd_active: Option<bool>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub mobile_inactive: Option<bool>,
    #[serde(rename = "embedIFrame")]
    pub embed_iframe: Option<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub hide_prospect: Option<bool>,
    /// `0` means unset
    pub plugin_id: Option<i64>,
    /// `0` means unset
    pub source: Option<i64>,
    pub countries: Option<Vec<EntityRef>>,
    pub shops: Option<Vec<EntityRef>>,
    #[serde(default, deserialize_with = "first_attribute")]
    pub attribute: Option<PaymentAttribute>,
}

macro_rules! apply_fields {
    ($fields:expr, $payment:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$fields.$field {
                $payment.$field = value.clone();
            }
        )+
    };
}

impl PaymentFields {
    /// Copy every supplied scalar field onto the payment.
    ///
    /// Associations are not touched; the controller resolves them.
    pub fn apply_to(&self, payment: &mut PaymentMethod) -> Result<(), SurchargeParseError> {
        apply_fields!(self, payment;
            description,
            additional_description,
            template,
            class,
            table,
            hide,
            debit_percent,
            surcharge,
            position,
            active,
            esd_active,
            mobile_inactive,
            embed_iframe,
            hide_prospect,
        );

        if let Some(raw) = &self.surcharge_string {
            payment.surcharges = raw.parse()?;
        }
        if self.plugin_id.is_some() {
            payment.plugin_id = self.plugin_id;
        }
        if self.source.is_some() {
            payment.source = self.source;
        }
        if self.attribute.is_some() {
            payment.attribute = self.attribute.clone();
        }

        Ok(())
    }
}

/// Body of `createPayments`
///
/// There is no `action` field: a new payment always starts without one.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: String,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: PaymentFields,
}

/// Body of `updatePayments`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePaymentRequest {
    pub id: i64,

    #[validate(length(min = 1, max = 255, message = "name must not be empty"))]
    pub name: Option<String>,

    /// Placeholder the UI fills with the action name; never applied
    pub action: Option<String>,

    #[serde(flatten)]
    #[validate(nested)]
    pub fields: PaymentFields,
}

/// Id of the payment to delete, from the body or the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeletePaymentRequest {
    pub id: Option<i64>,
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(i)) => Ok(Some(Decimal::from(i))),
        Some(Raw::Float(f)) => parse_decimal(&f.to_string())
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal '{}'", f))),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => parse_decimal(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid decimal '{}'", s))),
    }
}

// Checkbox flags arrive as booleans, 0/1 or their string forms
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Bool(b)) => Ok(Some(b)),
        Some(Raw::Int(i)) => Ok(Some(i != 0)),
        Some(Raw::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "on" => Ok(Some(true)),
            "0" | "false" | "off" => Ok(Some(false)),
            _ => Err(serde::de::Error::custom(format!("invalid flag '{}'", s))),
        },
    }
}

// The UI wraps the attribute record in a one-element list
fn first_attribute<'de, D>(deserializer: D) -> Result<Option<PaymentAttribute>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Single(PaymentAttribute),
        List(Vec<PaymentAttribute>),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Single(attribute)) => Some(attribute),
        Some(Raw::List(list)) => list.into_iter().next(),
    })
}
