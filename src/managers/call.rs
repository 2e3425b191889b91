use crate::constants::{placeholders, retry};
use crate::errors::AdsError;
use crate::graph::rejected::parse_rejected_fields;
use crate::graph::transport::GraphTransport;
use crate::managers::ads::AdsManager;
use crate::services::logger::Logger;
use crate::utils::fields::{drill, split_spec};
use crate::utils::render;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::Arc;

/// What a generic call learned about the requested fields along the way.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CallDiagnostics {
    /// Fields the API rejected outright, discovered through retries. Sorted.
    pub unsupported_fields: Vec<String>,
    /// Fields the API accepted but did not return. Sorted, informational.
    pub unfound_fields: Vec<String>,
    /// The URL of the final successful request, placeholders substituted.
    pub url: String,
}

/// Generic Graph call with placeholder resolution and adaptive field
/// narrowing: fields the API rejects are shed and the request reissued,
/// bounded by a fixed attempt ceiling.
pub struct CallManager {
    logger: Logger,
    transport: Arc<dyn GraphTransport>,
    ads: Arc<AdsManager>,
}

impl CallManager {
    pub fn new(logger: Logger, transport: Arc<dyn GraphTransport>, ads: Arc<AdsManager>) -> Self {
        Self {
            logger: logger.child("call"),
            transport,
            ads,
        }
    }

    /// Issues `url_template` with `fields`, resolving `{placeholder}` ids via
    /// silent lookups, and prints the diagnostic envelope when `output` is
    /// set.
    pub async fn call(
        &self,
        url_template: &str,
        fields: &str,
        filter: &[String],
        object_ids: &mut Map<String, Value>,
        output: bool,
    ) -> Result<Value, AdsError> {
        let (result, diagnostics) = self
            .call_with_diagnostics(url_template, fields, filter, object_ids)
            .await?;
        if output {
            let envelope = envelope(&result, &diagnostics, object_ids);
            println!("{}", render::to_pretty_sorted(&envelope)?);
        }
        Ok(result)
    }

    pub async fn call_with_diagnostics(
        &self,
        url_template: &str,
        fields: &str,
        filter: &[String],
        object_ids: &mut Map<String, Value>,
    ) -> Result<(Value, CallDiagnostics), AdsError> {
        self.resolve_placeholders(url_template, object_ids).await?;
        let base_url = substitute(url_template, object_ids);

        let mut current = split_spec(fields);
        let mut unsupported: BTreeSet<String> = BTreeSet::new();
        let mut attempt = 0usize;

        loop {
            let url = with_fields_param(&base_url, &current);
            match self.fetch(&url, filter).await {
                Ok(result) => {
                    let diagnostics = CallDiagnostics {
                        unsupported_fields: unsupported.iter().cloned().collect(),
                        unfound_fields: unfound_fields(&result, &current),
                        url,
                    };
                    return Ok((result, diagnostics));
                }
                Err(err) if err.is_field_rejection() => {
                    let message = err
                        .graph
                        .as_ref()
                        .map(|graph| graph.message.as_str())
                        .unwrap_or_default();
                    let Some(rejected) = parse_rejected_fields(message) else {
                        // Unexpected message shape: hand the error back unparsed.
                        return Err(err);
                    };
                    attempt += 1;
                    if attempt > retry::MAX_FIELD_RETRIES {
                        unsupported.extend(rejected);
                        let rejected_so_far: Vec<String> = unsupported.into_iter().collect();
                        return Err(AdsError::retry_budget(attempt).with_details(
                            serde_json::json!({ "unsupported_fields": rejected_so_far }),
                        ));
                    }
                    self.logger.warn(
                        &format!(
                            "Graph rejected {} field(s), retrying (attempt {})",
                            rejected.len(),
                            attempt
                        ),
                        Some(&serde_json::json!({ "rejected": rejected })),
                    );
                    current.retain(|field| !rejected.contains(field));
                    unsupported.extend(rejected);
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn fetch(&self, url: &str, filter: &[String]) -> Result<Value, AdsError> {
        let data = self.transport.get_object(url).await?;
        drill(&data, filter)
    }

    /// Fills in every `{placeholder}` named in the template but absent from
    /// `object_ids`, using the matching silent listing.
    async fn resolve_placeholders(
        &self,
        url_template: &str,
        object_ids: &mut Map<String, Value>,
    ) -> Result<(), AdsError> {
        for name in placeholders::OBJECT_IDS {
            let token = format!("{{{}}}", name);
            if !url_template.contains(&token) || object_ids.contains_key(*name) {
                continue;
            }
            let listing = match *name {
                "account_id" => self.ads.get_ad_account("", false).await?,
                "campaign_id" => self.ads.get_campaigns("", false).await?,
                "adset_id" => self.ads.get_adsets("", false).await?,
                "ad_id" => self.ads.get_ads("", false).await?,
                "adcreative_id" => self.ads.get_adcreatives("", false).await?,
                _ => Value::Null,
            };
            let id = extract_id(&listing).ok_or_else(|| AdsError::placeholder(name))?;
            self.logger
                .debug(&format!("resolved {} -> {}", name, id), None);
            object_ids.insert((*name).to_string(), Value::String(id));
        }
        Ok(())
    }
}

/// An object's own `id`, or the `id` of the first element of a listing.
fn extract_id(value: &Value) -> Option<String> {
    match value {
        Value::Object(map) => map.get("id").and_then(Value::as_str).map(str::to_string),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("id"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn substitute(url_template: &str, object_ids: &Map<String, Value>) -> String {
    let mut url = url_template.to_string();
    for (name, id) in object_ids {
        let rendered = match id {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        url = url.replace(&format!("{{{}}}", name), &rendered);
    }
    url
}

fn with_fields_param(base_url: &str, fields: &[String]) -> String {
    if fields.is_empty() {
        return base_url.to_string();
    }
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}fields={}", base_url, separator, fields.join(","))
}

/// Requested-but-absent fields; only meaningful for object results.
fn unfound_fields(result: &Value, requested: &[String]) -> Vec<String> {
    let Value::Object(map) = result else {
        return Vec::new();
    };
    let mut missing: Vec<String> = requested
        .iter()
        .filter(|field| !map.contains_key(field.as_str()))
        .cloned()
        .collect();
    missing.sort();
    missing
}

fn envelope(result: &Value, diagnostics: &CallDiagnostics, object_ids: &Map<String, Value>) -> Value {
    serde_json::json!({
        "object_ids": Value::Object(object_ids.clone()),
        "result": result,
        "unfound_fields": diagnostics.unfound_fields,
        "unsupported_fields": diagnostics.unsupported_fields,
        "url": diagnostics.url,
    })
}
