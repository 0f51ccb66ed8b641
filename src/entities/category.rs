//! Catalog category entity

use crate::impl_data_entity;
use serde::{Deserialize, Serialize};

/// A catalog category as exposed by the storefront API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default)]
    pub id: i64,

    /// `None` for root categories
    #[serde(default)]
    pub parent_id: Option<i64>,

    pub description: String,

    #[serde(default)]
    pub position: i32,

    #[serde(default)]
    pub active: bool,
}

impl_data_entity!(Category, "category", "categories", description);
