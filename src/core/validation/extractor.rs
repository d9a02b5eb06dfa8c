//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that runs an
//! [`InputFilter`] over a JSON request body before it reaches the handler.

use crate::core::messages::MessageTree;
use crate::input_filter::InputFilter;
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::marker::PhantomData;

/// Trait for types that describe how their payload is filtered and validated
pub trait ProvidesInputFilter {
    /// Build the input filter for an operation (`"create"` or `"update"`)
    fn input_filter(operation: &str) -> InputFilter;
}

/// Axum extractor that filters and validates a JSON payload
///
/// The handler receives the *filtered* values of the input filter, unknown
/// payload keys dropped.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_user(
///     Validated(payload, _): Validated<UserInput>,
/// ) -> Json<Value> {
///     // payload is already filtered and validated
///     Json(payload)
/// }
/// ```
pub struct Validated<T>(pub Value, pub PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

// Allow dereferencing to Value
impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ProvidesInputFilter + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        // Determine operation from HTTP method
        let operation = match req.method().as_str() {
            "PUT" | "PATCH" => "update",
            _ => "create",
        };

        let Json(payload): Json<Value> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                return Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({
                        "error": "Invalid JSON",
                        "details": e.to_string()
                    })),
                )
                    .into_response());
            }
        };

        let mut filter = T::input_filter(operation);
        if let Err(e) = filter.set_data(payload) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid payload",
                    "code": e.error_code(),
                    "details": e.to_string()
                })),
            )
                .into_response());
        }

        if filter.is_valid(None) {
            Ok(Validated::new(Value::Object(filter.values())))
        } else {
            let errors = MessageTree::Nested(filter.messages().clone()).to_json();
            tracing::debug!(operation, "request payload failed validation");
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({
                    "error": "Validation failed",
                    "errors": errors
                })),
            )
                .into_response())
        }
    }
}
