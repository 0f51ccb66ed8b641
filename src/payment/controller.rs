//! Payment admin actions
//!
//! Reads all payments with their countries and shops, creates new ones,
//! edits existing ones and deletes them. Repositories are injected; nothing
//! here reaches for global state.

use super::requests::{CreatePaymentRequest, EntityRef, UpdatePaymentRequest};
use super::view::PaymentView;
use crate::acl::Acl;
use crate::core::error::{AdminError, AdminResult, AuthorizationError, RequestError, ValidationError};
use crate::core::{Data, Entity, Repository};
use crate::entities::{Country, PaymentMethod, Shop};
use axum::http::{HeaderMap, Method};
use std::collections::HashMap;
use std::sync::Arc;

/// ACL resource guarding the payment actions
pub const PAYMENT_RESOURCE: &str = "payment";

/// Payment actions subject to ACL checks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    GetPayments,
    CreatePayments,
    UpdatePayments,
    DeletePayment,
}

impl PaymentAction {
    /// Privilege required on [`PAYMENT_RESOURCE`]
    pub fn privilege(&self) -> &'static str {
        match self {
            PaymentAction::GetPayments => "read",
            PaymentAction::CreatePayments => "create",
            PaymentAction::UpdatePayments => "update",
            PaymentAction::DeletePayment => "delete",
        }
    }

    /// Message shown when the privilege is missing
    pub fn denied_message(&self) -> &'static str {
        match self {
            PaymentAction::GetPayments => "You're not allowed to see the payments.",
            PaymentAction::CreatePayments => "You're not allowed to create a payment.",
            PaymentAction::UpdatePayments => "You're not allowed to update the payment.",
            PaymentAction::DeletePayment => "You're not allowed to delete the payment.",
        }
    }
}

/// Controller state shared by the payment handlers
#[derive(Clone)]
pub struct PaymentController {
    payments: Arc<dyn Repository<PaymentMethod>>,
    countries: Arc<dyn Repository<Country>>,
    shops: Arc<dyn Repository<Shop>>,
    acl: Option<Arc<Acl>>,
}

impl PaymentController {
    pub fn new(
        payments: Arc<dyn Repository<PaymentMethod>>,
        countries: Arc<dyn Repository<Country>>,
        shops: Arc<dyn Repository<Shop>>,
    ) -> Self {
        Self {
            payments,
            countries,
            shops,
            acl: None,
        }
    }

    /// Enforce the ACL on every guarded action
    pub fn with_acl(mut self, acl: Arc<Acl>) -> Self {
        self.acl = Some(acl);
        self
    }

    /// Check the caller's role for the action; a no-op without ACL
    pub fn authorize(&self, headers: &HeaderMap, action: PaymentAction) -> AdminResult<()> {
        match &self.acl {
            Some(acl) => acl.authorize(
                headers,
                PAYMENT_RESOURCE,
                action.privilege(),
                action.denied_message(),
            ),
            None => Ok(()),
        }
    }

    /// All payments as tree-grid rows, countries carrying their surcharges
    pub async fn list_payments(&self) -> AdminResult<Vec<PaymentView>> {
        let payments = self.payments.list().await?;
        let countries = index_by_id(self.countries.list().await?);
        let shops = index_by_id(self.shops.list().await?);

        Ok(payments
            .iter()
            .map(|payment| PaymentView::new(payment, &countries, &shops).into_tree_row())
            .collect())
    }

    /// All countries, active or not
    pub async fn list_countries(&self) -> AdminResult<Vec<Country>> {
        Ok(self.countries.list().await?)
    }

    /// Create a payment; the name must not be in use yet
    pub async fn create_payment(&self, request: CreatePaymentRequest) -> AdminResult<PaymentView> {
        if !self.payments.find_by_name(&request.name).await?.is_empty() {
            return Err(ValidationError::NameInUse { name: request.name }.into());
        }

        let mut payment = PaymentMethod::new(request.name.clone());
        request.fields.apply_to(&mut payment)?;

        // the UI sends 0 for "no source"
        if payment.source == Some(0) {
            payment.source = None;
        }

        if let Some(refs) = &request.fields.countries {
            payment.countries = resolve(self.countries.as_ref(), refs).await?;
        }
        if let Some(refs) = &request.fields.shops {
            payment.shops = resolve(self.shops.as_ref(), refs).await?;
        }

        let payment = self.payments.persist(payment).await?;
        tracing::info!(payment_id = payment.id, name = %payment.name, "payment created");

        self.render(&payment).await
    }

    /// Update a payment in place.
    ///
    /// Non-empty country or shop lists replace the whole association. The
    /// stored `action` survives the update whatever the request carries.
    pub async fn update_payment(&self, request: UpdatePaymentRequest) -> AdminResult<PaymentView> {
        let mut payment = self
            .payments
            .find(request.id)
            .await?
            .ok_or_else(|| AdminError::not_found(PaymentMethod::entity_type(), request.id))?;

        let action = payment.action.clone();

        if let Some(name) = &request.name {
            payment.name = name.clone();
        }
        request.fields.apply_to(&mut payment)?;

        if let Some(refs) = request.fields.countries.as_ref().filter(|r| !r.is_empty()) {
            payment.countries = resolve(self.countries.as_ref(), refs).await?;
        }
        if let Some(refs) = request.fields.shops.as_ref().filter(|r| !r.is_empty()) {
            payment.shops = resolve(self.shops.as_ref(), refs).await?;
        }

        payment.action = action;

        // the UI turns null into 0
        if payment.source == Some(0) {
            payment.source = None;
        }
        if payment.plugin_id == Some(0) {
            payment.plugin_id = None;
        }

        let payment = self.payments.persist(payment).await?;
        tracing::info!(payment_id = payment.id, "payment updated");

        Ok(self.render(&payment).await?.with_saved_icon())
    }

    /// Delete a payment.
    ///
    /// Only POST requests are accepted, and only payments whose source flag
    /// marks them deletable are removed.
    pub async fn delete_payment(&self, method: &Method, id: Option<i64>) -> AdminResult<()> {
        if method != Method::POST {
            return Err(RequestError::EmptyPost.into());
        }

        let id = id.ok_or_else(|| RequestError::InvalidBody {
            message: "missing payment id".to_string(),
        })?;

        let payment = self
            .payments
            .find(id)
            .await?
            .ok_or_else(|| AdminError::not_found(PaymentMethod::entity_type(), id))?;

        if !payment.is_deletable() {
            tracing::warn!(payment_id = id, source = ?payment.source, "refusing to delete default payment");
            return Err(AuthorizationError::NotDeletable { id }.into());
        }

        self.payments.remove(id).await?;
        tracing::info!(payment_id = id, "payment deleted");

        Ok(())
    }

    async fn render(&self, payment: &PaymentMethod) -> AdminResult<PaymentView> {
        let countries = index_by_id(self.countries.list().await?);
        let shops = index_by_id(self.shops.list().await?);
        Ok(PaymentView::new(payment, &countries, &shops))
    }
}

fn index_by_id<T: Data>(rows: Vec<T>) -> HashMap<i64, T> {
    rows.into_iter().map(|row| (row.id(), row)).collect()
}

/// Resolve submitted references to existing ids, dropping duplicates
async fn resolve<T: Data>(repository: &dyn Repository<T>, refs: &[EntityRef]) -> AdminResult<Vec<i64>> {
    let mut ids = Vec::with_capacity(refs.len());
    for reference in refs {
        if ids.contains(&reference.id) {
            continue;
        }
        if repository.find(reference.id).await?.is_none() {
            return Err(AdminError::not_found(T::entity_type(), reference.id));
        }
        ids.push(reference.id);
    }
    Ok(ids)
}
