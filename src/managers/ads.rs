use crate::errors::AdsError;
use crate::graph::transport::GraphTransport;
use crate::services::logger::Logger;
use crate::utils::fields::{drill, project};
use crate::utils::render;
use serde_json::Value;
use std::sync::Arc;

/// Read-side Graph operations: the ad account plus the collection endpoints
/// hanging off it. Every operation supports a silent mode (`output: false`)
/// used by other handlers to resolve prerequisite ids without printing.
#[derive(Clone)]
pub struct AdsManager {
    logger: Logger,
    transport: Arc<dyn GraphTransport>,
}

impl AdsManager {
    pub fn new(logger: Logger, transport: Arc<dyn GraphTransport>) -> Self {
        Self {
            logger: logger.child("ads"),
            transport,
        }
    }

    /// GETs `url`, drills through `post_filter`, projects `fields`, and
    /// prints the projected result when `output` is set.
    pub async fn process_request(
        &self,
        url: &str,
        post_filter: &[&str],
        fields: &str,
        output: bool,
    ) -> Result<Value, AdsError> {
        self.logger.debug(&format!("fetch {}", url), None);
        let data = self.transport.get_object(url).await?;
        let data = drill(&data, post_filter)?;
        let result = project(&data, fields)?;
        if output {
            println!("{}", render::to_canonical(&result)?);
        }
        Ok(result)
    }

    pub async fn get_ad_account(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        self.process_request("me/?fields=adaccounts", &["adaccounts", "data"], fields, output)
            .await
    }

    pub async fn get_campaigns(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(&format!("{}/campaigns", account_id), &["data"], fields, output)
            .await
    }

    pub async fn get_adsets(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(
            &format!("{}/adsets?fields=id,name", account_id),
            &["data"],
            fields,
            output,
        )
        .await
    }

    pub async fn get_adimages(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(
            &format!("{}/adimages?fields=hash,id,url", account_id),
            &["data"],
            fields,
            output,
        )
        .await
    }

    pub async fn get_ads(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(&format!("{}/ads", account_id), &["data"], fields, output)
            .await
    }

    pub async fn get_adcreatives(&self, fields: &str, output: bool) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(&format!("{}/adcreatives", account_id), &["data"], fields, output)
            .await
    }

    pub async fn get_ad_account_insights(
        &self,
        fields: &str,
        output: bool,
    ) -> Result<Value, AdsError> {
        let account_id = self.account_id().await?;
        self.process_request(&format!("{}/insights", account_id), &["data"], fields, output)
            .await
    }

    /// Insights for one campaign; without an explicit id the first campaign
    /// on the account is used.
    pub async fn get_campaign_insights(
        &self,
        campaign_id: Option<&str>,
        fields: &str,
        output: bool,
    ) -> Result<Value, AdsError> {
        let campaign_id = match campaign_id {
            Some(id) => id.to_string(),
            None => self.first_campaign_id().await?,
        };
        self.process_request(&format!("{}/insights", campaign_id), &["data"], fields, output)
            .await
    }

    /// The id of the first ad account visible to the token.
    pub async fn account_id(&self) -> Result<String, AdsError> {
        let value = self.get_ad_account("0.id", false).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AdsError::placeholder("account_id"))
    }

    async fn first_campaign_id(&self) -> Result<String, AdsError> {
        let value = self.get_campaigns("0.id", false).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| AdsError::placeholder("campaign_id"))
    }
}
