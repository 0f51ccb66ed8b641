//! Country and shop entities referenced by payment methods

use crate::impl_data_entity;
use serde::{Deserialize, Serialize};

/// A country a payment method can be offered in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    /// ISO 3166 alpha-2 code, used to match surcharges
    pub iso: String,

    #[serde(default)]
    pub iso3: String,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub position: i32,
}

impl_data_entity!(Country, "country", "countries", name);

/// A sales channel a payment method can be assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(default)]
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub host: Option<String>,

    #[serde(default)]
    pub active: bool,
}

impl_data_entity!(Shop, "shop", "shops", name);
