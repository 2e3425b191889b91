use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt;

use super::GraphApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdsErrorKind {
    InvalidParams,
    MissingField,
    NotFound,
    NoOptions,
    Placeholder,
    RetryBudget,
    Timeout,
    Graph,
    Internal,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdsError {
    pub kind: AdsErrorKind,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph: Option<GraphApiError>,
}

impl AdsError {
    pub fn new(kind: AdsErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            message: message.into(),
            hint: None,
            details: None,
            graph: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(AdsErrorKind::InvalidParams, "INVALID_PARAMS", message)
    }

    pub fn missing_field(field: &str, element: &str) -> Self {
        Self::new(
            AdsErrorKind::MissingField,
            "MISSING_FIELD",
            format!("You must provide a {} for your {}", field, element),
        )
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AdsErrorKind::NotFound, "NOT_FOUND", message)
    }

    pub fn no_options(element: &str) -> Self {
        Self::new(
            AdsErrorKind::NoOptions,
            "NO_OPTIONS",
            format!("No {} available to select.", element),
        )
    }

    pub fn placeholder(name: &str) -> Self {
        Self::new(
            AdsErrorKind::Placeholder,
            "PLACEHOLDER_UNRESOLVED",
            format!("Could not resolve identifier for placeholder {}", name),
        )
    }

    pub fn retry_budget(attempts: usize) -> Self {
        Self::new(
            AdsErrorKind::RetryBudget,
            "RETRY_BUDGET_EXCEEDED",
            format!("Gave up after {} field-narrowing attempts", attempts),
        )
        .with_hint("The Graph API kept rejecting fields; check the requested field list.".to_string())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AdsErrorKind::Timeout, "TIMEOUT", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AdsErrorKind::Internal, "INTERNAL", message)
    }

    pub fn graph(error: GraphApiError) -> Self {
        let mut out = Self::new(AdsErrorKind::Graph, "GRAPH_API", error.message.clone());
        out.graph = Some(error);
        out
    }

    /// True for the one recoverable Graph failure: code 100 with no subcode,
    /// the shape used for "fields param" rejections.
    pub fn is_field_rejection(&self) -> bool {
        matches!(
            self.graph.as_ref(),
            Some(graph) if graph.code == 100 && graph.error_subcode.is_none()
        )
    }
}

impl fmt::Display for AdsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for AdsError {}

impl From<std::io::Error> for AdsError {
    fn from(err: std::io::Error) -> Self {
        AdsError::internal(err.to_string())
    }
}
