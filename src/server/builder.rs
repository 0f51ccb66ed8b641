//! ServerBuilder for fluent API to build the admin HTTP server

use super::router::build_router;
use crate::acl::Acl;
use crate::catalog::CatalogState;
use crate::config::AdminConfig;
use crate::core::Repository;
use crate::entities::{Category, Country, PaymentMethod, Shop};
use crate::payment::PaymentController;
use crate::storage::InMemoryRepository;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder wiring repositories and ACL into the admin router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_payment_repository(payments)
///     .with_country_repository(countries)
///     .build()?;
/// ```
pub struct ServerBuilder {
    payments: Option<Arc<dyn Repository<PaymentMethod>>>,
    countries: Option<Arc<dyn Repository<Country>>>,
    shops: Option<Arc<dyn Repository<Shop>>>,
    categories: Option<Arc<dyn Repository<Category>>>,
    acl: Option<Arc<Acl>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            payments: None,
            countries: None,
            shops: None,
            categories: None,
            acl: None,
            custom_routes: Vec::new(),
        }
    }

    /// Build a server with in-memory repositories seeded from the config
    ///
    /// The ACL is only attached when `acl.enabled` is set.
    pub fn from_config(config: &AdminConfig) -> Result<Self> {
        let seed = config.seed.clone();

        let mut builder = Self::new()
            .with_payment_repository(InMemoryRepository::with_rows(seed.payments)?)
            .with_country_repository(InMemoryRepository::with_rows(seed.countries)?)
            .with_shop_repository(InMemoryRepository::with_rows(seed.shops)?)
            .with_category_repository(InMemoryRepository::with_rows(seed.categories)?);

        if config.acl.enabled {
            builder = builder.with_acl(Acl::new(
                seed.roles,
                seed.resources,
                seed.privileges,
                seed.rules,
            ));
        }

        Ok(builder)
    }

    /// Set the payment repository (required)
    pub fn with_payment_repository(
        mut self,
        repository: impl Repository<PaymentMethod> + 'static,
    ) -> Self {
        self.payments = Some(Arc::new(repository));
        self
    }

    /// Set the country repository, empty when not set
    pub fn with_country_repository(mut self, repository: impl Repository<Country> + 'static) -> Self {
        self.countries = Some(Arc::new(repository));
        self
    }

    /// Set the shop repository, empty when not set
    pub fn with_shop_repository(mut self, repository: impl Repository<Shop> + 'static) -> Self {
        self.shops = Some(Arc::new(repository));
        self
    }

    /// Set the category repository, empty when not set
    pub fn with_category_repository(
        mut self,
        repository: impl Repository<Category> + 'static,
    ) -> Self {
        self.categories = Some(Arc::new(repository));
        self
    }

    /// Check payment actions against the ACL
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(Arc::new(acl));
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let payments = self.payments.ok_or_else(|| {
            anyhow::anyhow!("Payment repository is required. Call .with_payment_repository()")
        })?;

        let countries = self
            .countries
            .unwrap_or_else(|| Arc::new(InMemoryRepository::<Country>::new()));
        let shops = self
            .shops
            .unwrap_or_else(|| Arc::new(InMemoryRepository::<Shop>::new()));
        let categories = self
            .categories
            .unwrap_or_else(|| Arc::new(InMemoryRepository::<Category>::new()));

        let mut controller = PaymentController::new(payments, countries, shops);
        if let Some(acl) = self.acl {
            controller = controller.with_acl(acl);
        }

        Ok(build_router(
            controller,
            CatalogState { categories },
            self.custom_routes,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `addr` and serves until SIGTERM or Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_requires_payment_repository() {
        let err = ServerBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("Payment repository is required"));
    }

    #[test]
    fn test_build_with_defaults() {
        let builder =
            ServerBuilder::new().with_payment_repository(InMemoryRepository::<PaymentMethod>::new());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_from_default_config() {
        let builder = ServerBuilder::from_config(&AdminConfig::default_config()).unwrap();
        assert!(builder.acl.is_none());
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_from_config_rejects_duplicate_seed_names() {
        let config = AdminConfig::from_yaml_str(
            r#"
seed:
  payments:
    - { id: 1, name: cash }
    - { id: 2, name: cash }
"#,
        )
        .unwrap();

        assert!(ServerBuilder::from_config(&config).is_err());
    }
}
