//! View models rendered for the payment tree grid

use crate::entities::{Country, PaymentAttribute, PaymentMethod, Shop};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Icon of an active payment in the tree listing
pub const ICON_ROW_ACTIVE: &str = "sprite-tick-small";
/// Icon of an inactive payment in the tree listing
pub const ICON_ROW_INACTIVE: &str = "sprite-cross-small";
/// Icon returned after saving an active payment
pub const ICON_ACTIVE: &str = "sprite-tick";
/// Icon returned after saving an inactive payment
pub const ICON_INACTIVE: &str = "sprite-cross";

/// A country joined onto a payment, with its surcharge if one matches
#[derive(Debug, Clone, Serialize)]
pub struct CountryRow {
    #[serde(flatten)]
    pub country: Country,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<Decimal>,
}

/// A payment method as rendered for the admin UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub additional_description: String,
    pub template: String,
    pub class: String,
    pub table: String,
    pub hide: bool,
    pub debit_percent: Decimal,
    pub surcharge: Decimal,
    pub surcharge_string: String,
    pub position: i32,
    pub active: bool,
    pub esd_active: bool,
    pub mobile_inactive: bool,
    #[serde(rename = "embedIFrame")]
    pub embed_iframe: String,
    pub hide_prospect: bool,
    pub action: String,
    pub plugin_id: Option<i64>,
    pub source: Option<i64>,
    pub attribute: Option<PaymentAttribute>,
    pub countries: Vec<CountryRow>,
    pub shops: Vec<Shop>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_cls: Option<&'static str>,

    /// Tree label, `"<description> (<id>)"`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaf: Option<bool>,
}

impl PaymentView {
    /// Render a payment, joining its associations from the lookup maps.
    ///
    /// Association ids missing from the maps are skipped. Each country gets
    /// the surcharge whose iso code matches its own.
    pub fn new(
        payment: &PaymentMethod,
        countries: &HashMap<i64, Country>,
        shops: &HashMap<i64, Shop>,
    ) -> Self {
        let country_rows = payment
            .countries
            .iter()
            .filter_map(|id| match countries.get(id) {
                Some(country) => Some(CountryRow {
                    surcharge: payment.surcharges.amount_for(&country.iso),
                    country: country.clone(),
                }),
                None => {
                    tracing::warn!(payment_id = payment.id, country_id = id, "skipping unknown country");
                    None
                }
            })
            .collect();

        let shop_rows = payment
            .shops
            .iter()
            .filter_map(|id| match shops.get(id) {
                Some(shop) => Some(shop.clone()),
                None => {
                    tracing::warn!(payment_id = payment.id, shop_id = id, "skipping unknown shop");
                    None
                }
            })
            .collect();

        Self {
            id: payment.id,
            name: payment.name.clone(),
            description: payment.description.clone(),
            additional_description: payment.additional_description.clone(),
            template: payment.template.clone(),
            class: payment.class.clone(),
            table: payment.table.clone(),
            hide: payment.hide,
            debit_percent: payment.debit_percent,
            surcharge: payment.surcharge,
            surcharge_string: payment.surcharges.to_string(),
            position: payment.position,
            active: payment.active,
            esd_active: payment.esd_active,
            mobile_inactive: payment.mobile_inactive,
            embed_iframe: payment.embed_iframe.clone(),
            hide_prospect: payment.hide_prospect,
            action: payment.action.clone(),
            plugin_id: payment.plugin_id,
            source: payment.source,
            attribute: payment.attribute.clone(),
            countries: country_rows,
            shops: shop_rows,
            icon_cls: None,
            text: None,
            leaf: None,
        }
    }

    /// Decorate as a tree-grid leaf: small icon, label and leaf flag
    pub fn into_tree_row(mut self) -> Self {
        self.icon_cls = Some(if self.active {
            ICON_ROW_ACTIVE
        } else {
            ICON_ROW_INACTIVE
        });
        self.text = Some(format!("{} ({})", self.description, self.id));
        self.leaf = Some(true);
        self
    }

    /// Decorate with the icon shown after a save
    pub fn with_saved_icon(mut self) -> Self {
        self.icon_cls = Some(if self.active { ICON_ACTIVE } else { ICON_INACTIVE });
        self
    }
}
