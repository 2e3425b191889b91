use serde::{Deserialize, Serialize};

/// The structured error payload the Graph API returns under the `error` key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphApiError {
    pub message: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    pub code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_subcode: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fbtrace_id: Option<String>,
}