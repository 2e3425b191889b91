use crate::constants::graph as graph_constants;
use crate::errors::{AdsError, GraphApiError};
use crate::graph::transport::{FileUpload, GraphTransport};
use crate::services::logger::Logger;
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// reqwest-backed Graph API transport pinned to one API version.
pub struct GraphClient {
    logger: Logger,
    http: Client,
    token: Option<String>,
}

impl GraphClient {
    pub fn new(logger: Logger, token: Option<String>) -> Result<Self, AdsError> {
        let http = Client::builder()
            .timeout(Duration::from_millis(graph_constants::TIMEOUT_REQUEST_MS))
            .build()
            .map_err(map_reqwest_error)?;
        Ok(Self {
            logger: logger.child("graph"),
            http,
            token,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AdsError> {
        let raw = format!(
            "{}/{}/{}",
            graph_constants::BASE_URL,
            graph_constants::API_VERSION,
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|err| {
            AdsError::invalid_params(format!("Invalid Graph URL '{}': {}", path, err))
        })?;
        if let Some(token) = self.token.as_deref() {
            url.query_pairs_mut().append_pair("access_token", token);
        }
        Ok(url)
    }

    async fn decode(response: reqwest::Response) -> Result<Value, AdsError> {
        let status = response.status();
        let body: Value = response.json().await.map_err(map_reqwest_error)?;
        if let Some(error) = body.get("error") {
            let graph_error: GraphApiError =
                serde_json::from_value(error.clone()).map_err(|err| {
                    AdsError::internal(format!("Unparseable Graph API error payload: {}", err))
                })?;
            return Err(AdsError::graph(graph_error));
        }
        if !status.is_success() {
            return Err(AdsError::internal(format!(
                "Graph API returned HTTP {}",
                status.as_u16()
            )));
        }
        Ok(body)
    }
}

#[async_trait]
impl GraphTransport for GraphClient {
    async fn get_object(&self, path: &str) -> Result<Value, AdsError> {
        let url = self.endpoint(path)?;
        self.logger.debug(&format!("GET {}", path), None);
        let response = self.http.get(url).send().await.map_err(map_reqwest_error)?;
        Self::decode(response).await
    }

    async fn request(
        &self,
        path: &str,
        method: &str,
        post_args: Option<&Value>,
        files: Option<Vec<FileUpload>>,
    ) -> Result<Value, AdsError> {
        let url = self.endpoint(path)?;
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|_| AdsError::invalid_params(format!("Unsupported HTTP method '{}'", method)))?;
        self.logger.debug(&format!("{} {}", method, path), None);

        let mut request = self.http.request(method, url);
        if let Some(files) = files {
            let mut form = reqwest::multipart::Form::new();
            for (key, value) in form_pairs(post_args) {
                form = form.text(key, value);
            }
            for upload in files {
                let part =
                    reqwest::multipart::Part::bytes(upload.bytes).file_name(upload.file_name);
                form = form.part(upload.field, part);
            }
            request = request.multipart(form);
        } else if post_args.is_some() {
            request = request.form(&form_pairs(post_args));
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        Self::decode(response).await
    }
}

/// Graph POST bodies are flat form fields; nested values go over the wire as
/// serialized JSON.
fn form_pairs(post_args: Option<&Value>) -> Vec<(String, String)> {
    let Some(Value::Object(map)) = post_args else {
        return Vec::new();
    };
    map.iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(text) => text.clone(),
                other => serde_json::to_string(other).unwrap_or_default(),
            };
            (key.clone(), rendered)
        })
        .collect()
}

/// Timeouts get their own kind so they never enter the field-narrowing retry
/// path; everything else is an opaque transport failure.
pub fn map_reqwest_error(err: reqwest::Error) -> AdsError {
    if err.is_timeout() {
        return AdsError::timeout(format!("Graph API request timed out: {}", err));
    }
    if err.is_connect() {
        return AdsError::internal(format!("Could not reach the Graph API: {}", err));
    }
    AdsError::internal(err.to_string())
}
