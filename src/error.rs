//! Error handling.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::header,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::error::Error;
use thiserror::Error;
use tracing::{event, Level};

/// Client registry error type
///
/// This type encapsulates the various errors that may occur.
/// Each variant may result in a different API error response.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Error reading the client data file
    #[error("failed to read client data from {path}")]
    ClientDataRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing the client data file
    #[error("client data in {path} is not valid")]
    ClientDataParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two clients share an identifier
    #[error("duplicate client id {id}")]
    DuplicateClientId { id: String },

    /// No client has the requested identifier
    #[error("Client not found")]
    ClientNotFound,

    /// Simple search without a query
    #[error("Search query is required")]
    MissingQuery,

    /// Advanced search without any criteria
    #[error("At least one search criterion is required")]
    MissingCriteria,

    /// Error deserialising the query string
    #[error("query parameters are not valid")]
    QueryRejection(#[from] QueryRejection),

    /// Error deserialising request data
    #[error("request data is not valid")]
    RequestDataJsonRejection(#[from] JsonRejection),

    /// Error validating request data
    #[error("request data is not valid")]
    RequestDataValidation(#[from] validator::ValidationErrors),

    /// Invalid listen address
    #[error("invalid host name, IP address or port number")]
    InvalidAddress(#[from] std::net::AddrParseError),

    /// TLS certificate or key file could not be located
    #[error("TLS {kind} file expected at '{path}' but not found")]
    TlsFileNotFound { kind: &'static str, path: String },

    /// Error running the HTTP server
    #[error("server error")]
    Server(#[from] std::io::Error),

    /// Error gathering metrics
    #[error("failed to encode metrics")]
    Metrics(#[from] prometheus::Error),
}

impl IntoResponse for RegistryError {
    /// Convert from a `RegistryError` into an [axum::response::Response].
    fn into_response(self) -> Response {
        ErrorResponse::from(self).into_response()
    }
}

/// Body of error response
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorBody {
    /// Always false for errors
    success: bool,

    /// Main error message
    message: String,

    /// Optional list of causes
    #[serde(skip_serializing_if = "Option::is_none")]
    caused_by: Option<Vec<String>>,
}

impl ErrorBody {
    /// Return a new ErrorBody
    ///
    /// # Arguments
    ///
    /// * `error`: The error that occurred
    fn new<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        let message = error.to_string();
        let mut caused_by = None;
        let mut current = error.source();
        while let Some(source) = current {
            let mut causes: Vec<String> = caused_by.unwrap_or_default();
            causes.push(source.to_string());
            caused_by = Some(causes);
            current = source.source();
        }
        // Remove duplicate entries.
        if let Some(caused_by) = caused_by.as_mut() {
            caused_by.dedup()
        }
        ErrorBody {
            success: false,
            message,
            caused_by,
        }
    }
}

/// A response to send in error cases
///
/// Implements serde (de)serialise.
#[derive(Deserialize, Serialize)]
struct ErrorResponse {
    /// HTTP status of the response
    #[serde(skip)]
    status: StatusCode,

    /// Response body
    #[serde(flatten)]
    error: ErrorBody,
}

impl ErrorResponse {
    /// Return a new ErrorResponse
    ///
    /// # Arguments
    ///
    /// * `status`: HTTP status of the response
    /// * `error`: The error that occurred. This will be formatted into a suitable `ErrorBody`
    fn new<E>(status: StatusCode, error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        ErrorResponse {
            status,
            error: ErrorBody::new(error),
        }
    }

    /// Return a 400 bad request ErrorResponse
    fn bad_request<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    /// Return a 404 not found ErrorResponse
    fn not_found<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    /// Return a 500 internal server error ErrorResponse
    fn internal_server_error<E>(error: &E) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }
}

impl From<RegistryError> for ErrorResponse {
    /// Convert from a `RegistryError` into an `ErrorResponse`.
    fn from(error: RegistryError) -> Self {
        let response = match &error {
            // Bad request
            RegistryError::MissingQuery
            | RegistryError::MissingCriteria
            | RegistryError::QueryRejection(_)
            | RegistryError::RequestDataJsonRejection(_)
            | RegistryError::RequestDataValidation(_) => Self::bad_request(&error),

            // Not found
            RegistryError::ClientNotFound => Self::not_found(&error),

            // Internal server error
            RegistryError::ClientDataRead { .. }
            | RegistryError::ClientDataParse { .. }
            | RegistryError::DuplicateClientId { .. }
            | RegistryError::InvalidAddress(_)
            | RegistryError::TlsFileNotFound { .. }
            | RegistryError::Server(_)
            | RegistryError::Metrics(_) => Self::internal_server_error(&error),
        };

        // Log server errors.
        if response.status.is_server_error() {
            event!(Level::ERROR, "{}", error.to_string());
            let mut current = error.source();
            while let Some(source) = current {
                event!(Level::ERROR, "Caused by: {}", source.to_string());
                current = source.source();
            }
        }

        response
    }
}

impl IntoResponse for ErrorResponse {
    /// Convert from an `ErrorResponse` into an `axum::response::Response`.
    ///
    /// Renders the response as JSON.
    fn into_response(self) -> Response {
        let json_body = serde_json::to_string_pretty(&self);
        match json_body {
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to serialise error response: {}", err),
            )
                .into_response(),
            Ok(json_body) => (
                self.status,
                [(&header::CONTENT_TYPE, mime::APPLICATION_JSON.to_string())],
                json_body,
            )
                .into_response(),
        }
    }
}
