//! Server module wiring repositories, ACL and routes into an axum router

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::{SERVICE_NAME, build_router};
