#![allow(dead_code)]

use adgraph::errors::{AdsError, GraphApiError};
use adgraph::graph::transport::{FileUpload, GraphTransport};
use adgraph::utils::select::PromptInput;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One transport call as the managers issued it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub method: String,
    pub post_args: Option<Value>,
    pub file_fields: Vec<String>,
}

/// Scripted Graph transport: pops one canned response per call and records
/// what was asked for.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<Value, AdsError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<Value, AdsError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn pop(&self) -> Result<Value, AdsError> {
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(AdsError::internal("Mock transport ran out of responses")))
    }
}

#[async_trait]
impl GraphTransport for MockTransport {
    async fn get_object(&self, path: &str) -> Result<Value, AdsError> {
        self.requests.lock().expect("requests lock").push(RecordedRequest {
            path: path.to_string(),
            method: "GET".to_string(),
            post_args: None,
            file_fields: Vec::new(),
        });
        self.pop()
    }

    async fn request(
        &self,
        path: &str,
        method: &str,
        post_args: Option<&Value>,
        files: Option<Vec<FileUpload>>,
    ) -> Result<Value, AdsError> {
        self.requests.lock().expect("requests lock").push(RecordedRequest {
            path: path.to_string(),
            method: method.to_string(),
            post_args: post_args.cloned(),
            file_fields: files
                .unwrap_or_default()
                .into_iter()
                .map(|upload| upload.field)
                .collect(),
        });
        self.pop()
    }
}

/// Scripted prompt for the interactive flows.
pub struct ScriptedPrompt {
    indices: VecDeque<i64>,
    lines: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new(indices: Vec<i64>, lines: Vec<&str>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
            lines: lines.into_iter().map(str::to_string).collect(),
        }
    }
}

impl PromptInput for ScriptedPrompt {
    fn read_index(&mut self, _prompt: &str) -> Result<i64, AdsError> {
        self.indices
            .pop_front()
            .ok_or_else(|| AdsError::internal("Scripted prompt ran out of indices"))
    }

    fn read_line(&mut self, _prompt: &str) -> Result<String, AdsError> {
        self.lines
            .pop_front()
            .ok_or_else(|| AdsError::internal("Scripted prompt ran out of lines"))
    }
}

/// A Graph API error as the transport would surface it.
pub fn graph_error(code: i64, error_subcode: Option<i64>, message: &str) -> AdsError {
    AdsError::graph(GraphApiError {
        message: message.to_string(),
        error_type: Some("GraphMethodException".to_string()),
        code,
        error_subcode,
        fbtrace_id: None,
    })
}

/// The `me/?fields=adaccounts` envelope with one account.
pub fn account_listing(account_id: &str) -> Value {
    serde_json::json!({
        "adaccounts": {
            "data": [{ "id": account_id, "account_id": account_id.trim_start_matches("act_") }]
        },
        "id": "1010"
    })
}
