//! Core module containing fundamental traits and types for the admin backend

pub mod entity;
pub mod envelope;
pub mod error;
pub mod extractors;
pub mod query;
pub mod service;
pub mod store;
pub mod surcharge;

pub use entity::{Data, Entity};
pub use envelope::Envelope;
pub use error::{AdminError, AdminResult};
pub use extractors::ValidatedJson;
pub use query::{Criterion, CriterionKind, OrderDirection, Query, QueryDefinition};
pub use service::Repository;
pub use store::Queryable;
pub use surcharge::{Surcharge, SurchargeList};
