mod common;

use adgraph::app::App;
use adgraph::errors::{AdsError, AdsErrorKind};
use adgraph::services::logger::Logger;
use common::{account_listing, MockTransport, ScriptedPrompt};
use serde_json::{json, Value};
use std::sync::Arc;

fn app_with(responses: Vec<Result<Value, AdsError>>) -> (Arc<MockTransport>, App) {
    let transport = Arc::new(MockTransport::new(responses));
    let app = App::wire(
        Logger::new("test"),
        transport.clone(),
        Box::new(ScriptedPrompt::new(vec![], vec![])),
    );
    (transport, app)
}

#[tokio::test]
async fn campaign_insights_fall_back_to_the_first_campaign() {
    let (transport, app) = app_with(vec![
        Ok(account_listing("act_1")),
        Ok(json!({"data": [{"id": "c_9", "name": "spring"}, {"id": "c_10", "name": "fall"}]})),
        Ok(json!({"data": [{"impressions": "120"}]})),
    ]);

    let result = app
        .ads
        .get_campaign_insights(None, "", false)
        .await
        .expect("insights");
    assert_eq!(result, json!([{"impressions": "120"}]));

    let requests = transport.recorded();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path, "me/?fields=adaccounts");
    assert_eq!(requests[1].path, "act_1/campaigns");
    assert_eq!(requests[2].path, "c_9/insights");
}

#[tokio::test]
async fn an_explicit_campaign_id_skips_the_listing() {
    let (transport, app) = app_with(vec![Ok(json!({"data": [{"impressions": "7"}]}))]);

    app.ads
        .get_campaign_insights(Some("c_42"), "", false)
        .await
        .expect("insights");

    let requests = transport.recorded();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, "c_42/insights");
}

#[tokio::test]
async fn a_non_string_campaign_id_fails_the_fallback() {
    let (transport, app) = app_with(vec![
        Ok(account_listing("act_1")),
        Ok(json!({"data": [{"id": 1234, "name": "spring"}]})),
    ]);

    let err = app
        .ads
        .get_campaign_insights(None, "", false)
        .await
        .expect_err("unusable id");

    assert_eq!(err.kind, AdsErrorKind::Placeholder);
    assert!(err.message.contains("campaign_id"), "got: {}", err.message);
    assert_eq!(transport.recorded().len(), 2);
}

#[tokio::test]
async fn an_empty_campaign_listing_fails_the_fallback() {
    let (_transport, app) = app_with(vec![
        Ok(account_listing("act_1")),
        Ok(json!({"data": []})),
    ]);

    let err = app
        .ads
        .get_campaign_insights(None, "", false)
        .await
        .expect_err("no campaigns");

    assert_eq!(err.kind, AdsErrorKind::NotFound);
    assert!(err.message.contains("out of range"), "got: {}", err.message);
}
