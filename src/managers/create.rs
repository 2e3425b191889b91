use crate::constants::defaults;
use crate::errors::AdsError;
use crate::graph::transport::{FileUpload, GraphTransport};
use crate::managers::ads::AdsManager;
use crate::services::logger::Logger;
use crate::services::validation::Validation;
use crate::utils::render;
use crate::utils::select::{select_option, PromptInput};
use serde_json::{Map, Value};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Write-side Graph operations. Missing identifiers are filled in through
/// interactive selection over the silent read operations; validation errors
/// propagate as typed errors for the binary boundary to report.
pub struct CreateManager {
    logger: Logger,
    transport: Arc<dyn GraphTransport>,
    ads: Arc<AdsManager>,
    validation: Validation,
    prompt: Mutex<Box<dyn PromptInput>>,
}

impl CreateManager {
    pub fn new(
        logger: Logger,
        transport: Arc<dyn GraphTransport>,
        ads: Arc<AdsManager>,
        validation: Validation,
        prompt: Box<dyn PromptInput>,
    ) -> Self {
        Self {
            logger: logger.child("create"),
            transport,
            ads,
            validation,
            prompt: Mutex::new(prompt),
        }
    }

    async fn create_object(
        &self,
        url: &str,
        definition: Option<&Value>,
        files: Option<Vec<FileUpload>>,
        output: bool,
    ) -> Result<Value, AdsError> {
        self.logger.debug(&format!("POST {}", url), None);
        let result = self.transport.request(url, "POST", definition, files).await?;
        if output {
            println!("{}", render::to_canonical(&result)?);
        }
        Ok(result)
    }

    pub async fn create_campaign(&self, definition: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.ads.account_id().await?;
        let definition = self.parse_definition(definition, "campaign")?;
        self.validation
            .require_fields(&definition, &["name"], "campaign")?;
        let merged = overlay(campaign_defaults(), definition);
        self.create_object(
            &format!("{}/campaigns", account_id),
            Some(&Value::Object(merged)),
            None,
            output,
        )
        .await
    }

    pub async fn create_adset(&self, definition: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.ads.account_id().await?;
        let definition = self.parse_definition(definition, "adset")?;
        self.validation
            .require_fields(&definition, &["name", "campaign_id"], "adset")?;
        let merged = overlay(adset_defaults(), definition);
        self.create_object(
            &format!("{}/adsets", account_id),
            Some(&Value::Object(merged)),
            None,
            output,
        )
        .await
    }

    pub async fn create_adimage(&self, image: &Path, output: bool) -> Result<Value, AdsError> {
        let account_id = self.ads.account_id().await?;
        let bytes = tokio::fs::read(image).await.map_err(|err| {
            AdsError::invalid_params(format!("Could not read image '{}': {}", image.display(), err))
        })?;
        let file_name = image
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload")
            .to_string();
        let upload = FileUpload {
            field: "filename".to_string(),
            file_name,
            bytes,
        };
        self.create_object(
            &format!("{}/adimages", account_id),
            None,
            Some(vec![upload]),
            output,
        )
        .await
    }

    pub async fn create_adcreative(
        &self,
        page_id: Option<String>,
        name: Option<String>,
        image_hash: Option<String>,
        image_url: Option<String>,
        image_message: Option<String>,
        output: bool,
    ) -> Result<Value, AdsError> {
        let account_id = self.ads.account_id().await?;
        let (image_hash, image_url) = match (image_hash, image_url) {
            (Some(hash), Some(url)) => (hash, url),
            _ => {
                let image = self.select_image().await?;
                let hash = string_field(&image, "hash", "image")?;
                let url = string_field(&image, "url", "image")?;
                (hash, url)
            }
        };
        let page_id = match page_id {
            Some(id) => id,
            None => self.prompt_page_id()?,
        };
        let definition = serde_json::json!({
            "name": name,
            "object_story_spec": {
                "link_data": {
                    "image_hash": image_hash,
                    "link": image_url,
                    "message": image_message
                        .unwrap_or_else(|| defaults::CREATIVE_MESSAGE.to_string()),
                },
                "page_id": page_id,
            },
        });
        self.create_object(
            &format!("{}/adcreatives", account_id),
            Some(&definition),
            None,
            output,
        )
        .await
    }

    pub async fn create_ad(
        &self,
        status: Option<String>,
        creative_id: Option<String>,
        adset_id: Option<String>,
        name: Option<String>,
        output: bool,
    ) -> Result<Value, AdsError> {
        let account_id = self.ads.account_id().await?;
        let status = status.unwrap_or_else(|| defaults::AD_STATUS.to_string());
        let adset_id = match adset_id {
            Some(id) => id,
            None => string_field(&self.select_adset().await?, "id", "adset")?,
        };
        let creative_id = match creative_id {
            Some(id) => id,
            None => string_field(&self.select_creative().await?, "id", "creative")?,
        };
        let definition = serde_json::json!({
            "name": name.unwrap_or_else(|| defaults::AD_NAME.to_string()),
            "status": status,
            "creative": { "creative_id": creative_id },
            "adset_id": adset_id,
        });
        self.create_object(&format!("{}/ads", account_id), Some(&definition), None, output)
            .await
    }

    async fn select_creative(&self) -> Result<Value, AdsError> {
        let creatives = self.ads.get_adcreatives("", false).await?;
        self.select_from(&creatives, "name", "Select a creative", "creative")
    }

    async fn select_image(&self) -> Result<Value, AdsError> {
        let images = self.ads.get_adimages("", false).await?;
        self.select_from(&images, "url", "Which image would you like to use?", "image")
    }

    async fn select_adset(&self) -> Result<Value, AdsError> {
        let adsets = self.ads.get_adsets("", false).await?;
        self.select_from(&adsets, "name", "Which adset would you like to use?", "adset")
    }

    fn select_from(
        &self,
        listing: &Value,
        display_field: &str,
        prompt: &str,
        element: &str,
    ) -> Result<Value, AdsError> {
        let options = listing.as_array().cloned().unwrap_or_default();
        let mut input = self
            .prompt
            .lock()
            .map_err(|_| AdsError::internal("Prompt lock poisoned"))?;
        select_option(&options, display_field, prompt, element, input.as_mut())
    }

    fn prompt_page_id(&self) -> Result<String, AdsError> {
        // The Graph API will not list pages for an ad-account token, so the
        // page id has to be typed in.
        let mut input = self
            .prompt
            .lock()
            .map_err(|_| AdsError::internal("Prompt lock poisoned"))?;
        loop {
            let page_id = input.read_line("Facebook Page ID")?;
            if !page_id.trim().is_empty() {
                return Ok(page_id.trim().to_string());
            }
        }
    }

    fn parse_definition(&self, raw: &str, element: &str) -> Result<Map<String, Value>, AdsError> {
        let value: Value = serde_json::from_str(raw).map_err(|err| {
            AdsError::invalid_params(format!(
                "Definition for {} is not valid JSON: {}",
                element, err
            ))
        })?;
        self.validation.ensure_object(&value, "definition")
    }
}

fn campaign_defaults() -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("objective".to_string(), Value::String("LINK_CLICKS".to_string()));
    map.insert("status".to_string(), Value::String("PAUSED".to_string()));
    map
}

fn adset_defaults() -> Map<String, Value> {
    let start = chrono::Utc::now();
    let end = start + chrono::Duration::days(defaults::ADSET_RUNTIME_DAYS);
    let value = serde_json::json!({
        "billing_event": "IMPRESSIONS",
        "bid_amount": 100,
        "daily_budget": 1000,
        "targeting": {
            "geo_locations": { "countries": ["US"] },
            "publisher_platforms": ["facebook"],
        },
        "start_time": start.to_rfc3339(),
        "end_time": end.to_rfc3339(),
        "optimization_goal": "REACH",
    });
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// User-supplied keys win over defaults. The merge is shallow: a caller
/// provided `targeting` replaces the stock one wholesale.
fn overlay(mut base: Map<String, Value>, definition: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in definition {
        base.insert(key, value);
    }
    base
}

fn string_field(object: &Value, field: &str, element: &str) -> Result<String, AdsError> {
    object
        .get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AdsError::not_found(format!("Selected {} has no '{}' field", element, field)))
}
