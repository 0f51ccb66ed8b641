//! Typed error handling for the admin backend
//!
//! Every admin action catches its failures at the handler boundary and renders
//! them as the uniform `{ "success": false, "errorMsg": ... }` envelope the
//! admin UI expects. The error categories mirror what can go wrong in an
//! action:
//!
//! - [`ValidationError`]: rejected input (duplicate names, malformed fields)
//! - [`AuthorizationError`]: the action is not allowed (default payments, ACL)
//! - [`RequestError`]: the request has the wrong shape (non-POST delete, ...)
//! - [`StorageError`]: the persistence layer refused or failed the write
//! - [`QueryError`]: invalid order-by or criterion for a listing query
//! - [`ConfigError`]: invalid configuration or seed data

use crate::core::surcharge::SurchargeParseError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type returned by every admin action
#[derive(Debug, Error)]
pub enum AdminError {
    /// Rejected input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The addressed entity does not exist
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: i64 },

    /// The action is not permitted
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// The request has the wrong shape
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Persistence failure
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Invalid listing query
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error envelope rendered for every failed action
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    /// Human-readable error message, shown as-is by the admin UI
    #[serde(rename = "errorMsg")]
    pub error_msg: String,
    /// Error code for programmatic handling
    pub code: &'static str,
}

impl AdminError {
    /// Shorthand for [`AdminError::NotFound`]
    pub fn not_found(entity_type: &str, id: i64) -> Self {
        AdminError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(e) => e.status_code(),
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdminError::Authorization(_) => StatusCode::FORBIDDEN,
            AdminError::Request(e) => e.status_code(),
            AdminError::Storage(e) => e.status_code(),
            AdminError::Query(_) => StatusCode::BAD_REQUEST,
            AdminError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AdminError::Validation(e) => e.error_code(),
            AdminError::NotFound { .. } => "ENTITY_NOT_FOUND",
            AdminError::Authorization(e) => e.error_code(),
            AdminError::Request(e) => e.error_code(),
            AdminError::Storage(e) => e.error_code(),
            AdminError::Query(_) => "INVALID_QUERY",
            AdminError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to the failure envelope
    pub fn to_envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope {
            success: false,
            error_msg: self.to_string(),
            code: self.error_code(),
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "admin action failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "admin action rejected");
        }
        (status, Json(self.to_envelope())).into_response()
    }
}

impl From<SurchargeParseError> for AdminError {
    fn from(err: SurchargeParseError) -> Self {
        AdminError::Validation(ValidationError::Surcharge(err))
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Another entity already uses the submitted name
    #[error("The name is already in use.")]
    NameInUse { name: String },

    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Derived validation failures for a request struct
    #[error("Validation errors: {0}")]
    FieldErrors(#[from] validator::ValidationErrors),

    /// Malformed surcharge list
    #[error(transparent)]
    Surcharge(#[from] SurchargeParseError),
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::NameInUse { .. } => StatusCode::CONFLICT,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::NameInUse { .. } => "NAME_IN_USE",
            ValidationError::FieldError { .. } | ValidationError::FieldErrors(_) => {
                "VALIDATION_ERROR"
            }
            ValidationError::Surcharge(_) => "INVALID_SURCHARGE",
        }
    }
}

// =============================================================================
// Authorization Errors
// =============================================================================

/// Errors raised when an action is not permitted
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// Only payments whose source flag marks them deletable may be removed
    #[error("Default payments can not be deleted")]
    NotDeletable { id: i64 },

    /// The caller's role lacks the privilege for the action
    #[error("{message}")]
    Denied { message: String },
}

impl AuthorizationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthorizationError::NotDeletable { .. } => "NOT_DELETABLE",
            AuthorizationError::Denied { .. } => "ACCESS_DENIED",
        }
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to the shape of the request
#[derive(Debug, Error)]
pub enum RequestError {
    /// A mutating action was called without a POST request
    #[error("Empty Post Request")]
    EmptyPost,

    /// The body could not be decoded
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// ACL is enabled but the request carries no role
    #[error("Missing admin role")]
    MissingRole,
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::EmptyPost => StatusCode::METHOD_NOT_ALLOWED,
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::MissingRole => StatusCode::UNAUTHORIZED,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::EmptyPost => "EMPTY_POST_REQUEST",
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::MissingRole => "MISSING_ROLE",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by a repository when reading or flushing
#[derive(Debug, Error)]
pub enum StorageError {
    /// A unique constraint rejected the write
    #[error("Constraint violation on {entity_type}.{field}: '{value}' already exists")]
    ConstraintViolation {
        entity_type: String,
        field: String,
        value: String,
    },

    /// The row addressed by an update or remove is gone
    #[error("{entity_type} with id '{id}' does not exist in storage")]
    MissingRow { entity_type: String, id: i64 },

    /// The backend is unusable (poisoned lock, lost connection, ...)
    #[error("Storage backend '{backend}' failed: {message}")]
    Backend { backend: String, message: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::ConstraintViolation { .. } => StatusCode::CONFLICT,
            StorageError::MissingRow { .. } => StatusCode::NOT_FOUND,
            StorageError::Backend { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConstraintViolation { .. } => "CONSTRAINT_VIOLATION",
            StorageError::MissingRow { .. } => "MISSING_ROW",
            StorageError::Backend { .. } => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Query Errors
// =============================================================================

/// Errors raised while building a listing query
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    #[error("Invalid order by field '{field}'")]
    InvalidOrderBy { field: String },

    #[error("Invalid order direction '{direction}'")]
    InvalidDirection { direction: String },

    #[error("Criterion '{criterion}' is not supported by this query")]
    InvalidCriterion { criterion: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and seed data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config{}: {}", file_suffix(.file), .message)]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" file '{}'", f))
        .unwrap_or_default()
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for admin actions
pub type AdminResult<T> = Result<T, AdminError>;
