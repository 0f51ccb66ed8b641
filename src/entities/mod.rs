//! Persisted entities of the admin backend

pub mod category;
pub mod country;
pub mod macros;
pub mod payment;
pub mod rule;

pub use category::Category;
pub use country::{Country, Shop};
pub use payment::{DELETABLE_SOURCE, PaymentAttribute, PaymentMethod};
pub use rule::{Privilege, Resource, Role, Rule};
