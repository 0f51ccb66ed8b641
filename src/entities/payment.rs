//! Payment method entity

use crate::core::SurchargeList;
use crate::impl_data_entity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Source value that marks a payment method as deletable.
///
/// Every other value, including `None`, protects the payment from removal.
pub const DELETABLE_SOURCE: i64 = 1;

/// Free-form attribute record attached to a payment method
pub type PaymentAttribute = serde_json::Map<String, serde_json::Value>;

/// A configured way a customer can pay
///
/// Country and shop associations are kept as ordered id lists; the
/// controller resolves them against their repositories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[serde(default)]
    pub id: i64,

    /// Technical name, unique across payment methods
    pub name: String,

    /// Label shown to customers and in the admin tree
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub additional_description: String,

    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub class: String,

    #[serde(default)]
    pub table: String,

    #[serde(default)]
    pub hide: bool,

    /// Percentage added to (or discounted from) the order amount
    #[serde(default)]
    pub debit_percent: Decimal,

    /// Flat surcharge applied regardless of country
    #[serde(default)]
    pub surcharge: Decimal,

    /// Per-country surcharges, stored as `iso:amount;iso:amount`
    #[serde(default, rename = "surchargeString")]
    pub surcharges: SurchargeList,

    #[serde(default)]
    pub position: i32,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub esd_active: bool,

    #[serde(default)]
    pub mobile_inactive: bool,

    #[serde(default, rename = "embedIFrame")]
    pub embed_iframe: String,

    #[serde(default)]
    pub hide_prospect: bool,

    /// Internal dispatch target of the payment, empty when unset
    #[serde(default)]
    pub action: String,

    #[serde(default)]
    pub plugin_id: Option<i64>,

    /// Distinguishes system defaults from custom payments, see [`DELETABLE_SOURCE`]
    #[serde(default)]
    pub source: Option<i64>,

    /// Associated country ids, in assignment order
    #[serde(default)]
    pub countries: Vec<i64>,

    /// Associated shop ids, in assignment order
    #[serde(default)]
    pub shops: Vec<i64>,

    #[serde(default)]
    pub attribute: Option<PaymentAttribute>,
}

impl_data_entity!(PaymentMethod, "payment", "payments", name, unique);

impl PaymentMethod {
    /// Create an unsaved, inactive payment method with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: String::new(),
            additional_description: String::new(),
            template: String::new(),
            class: String::new(),
            table: String::new(),
            hide: false,
            debit_percent: Decimal::ZERO,
            surcharge: Decimal::ZERO,
            surcharges: SurchargeList::default(),
            position: 0,
            active: false,
            esd_active: false,
            mobile_inactive: false,
            embed_iframe: String::new(),
            hide_prospect: false,
            action: String::new(),
            plugin_id: None,
            source: None,
            countries: Vec::new(),
            shops: Vec::new(),
            attribute: None,
        }
    }

    /// Whether the source flag permits removing this payment
    pub fn is_deletable(&self) -> bool {
        self.source == Some(DELETABLE_SOURCE)
    }
}
