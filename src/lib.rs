//! # Storefront Admin
//!
//! Administrative backend of a storefront: payment method management, the
//! ACL rules guarding backend actions, and the storefront category listing.
//!
//! ## Features
//!
//! - **Payment Methods**: list, create, update and delete payment methods
//!   with their countries, shops and per-country surcharges
//! - **ACL**: roles, resources, privileges and rules, checked per action
//! - **Category Query**: declared sort fields and criteria for the listing
//! - **Repository Injection**: every controller talks to `Repository<T>`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront_admin::prelude::*;
//!
//! let config = AdminConfig::default_config().apply_env_overrides()?;
//! ServerBuilder::from_config(&config)?
//!     .serve(&config.bind_address())
//!     .await?;
//! ```

pub mod acl;
pub mod catalog;
pub mod config;
pub mod core;
pub mod entities;
pub mod payment;
pub mod server;
pub mod storage;
pub mod telemetry;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        AdminError, AdminResult, Criterion, CriterionKind, Data, Entity, Envelope,
        OrderDirection, Query, QueryDefinition, Queryable, Repository, Surcharge, SurchargeList,
        ValidatedJson,
    };

    // === Macros ===
    pub use crate::{impl_data_entity, impl_entity};

    // === Entities ===
    pub use crate::entities::{
        Category, Country, PaymentMethod, Privilege, Resource, Role, Rule, Shop,
    };

    // === Features ===
    pub use crate::acl::{Acl, ROLE_HEADER};
    pub use crate::catalog::{CatalogState, CategoryQuery};
    pub use crate::payment::{PaymentAction, PaymentController, PaymentView};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::AdminConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}
