mod common;

use adgraph::app::App;
use adgraph::errors::{AdsError, AdsErrorKind};
use adgraph::services::logger::Logger;
use common::{account_listing, graph_error, MockTransport, ScriptedPrompt};
use serde_json::{json, Map, Value};
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
async fn rejected_fields_are_dropped_and_reported() {
    let (transport, app) = app_with(vec![
        Err(graph_error(
            100,
            None,
            "Fields foo, bar are not valid for fields param.",
        )),
        Ok(json!({"baz": 1})),
    ]);

    let mut object_ids = Map::new();
    let (result, diagnostics) = app
        .call
        .call_with_diagnostics("123/insights", "foo,bar,baz", &[], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(result, json!({"baz": 1}));
    assert_eq!(diagnostics.unsupported_fields, ["bar", "foo"]);
    assert!(diagnostics.unfound_fields.is_empty());

    let requests = transport.recorded();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].path, "123/insights?fields=foo,bar,baz");
    assert_eq!(requests[1].path, "123/insights?fields=baz");
    assert_eq!(diagnostics.url, "123/insights?fields=baz");
}

#[tokio::test]
async fn a_fifth_request_is_never_issued() {
    let (transport, app) = app_with(vec![
        Err(graph_error(100, None, "Fields a are not valid for fields param.")),
        Err(graph_error(100, None, "Fields b are not valid for fields param.")),
        Err(graph_error(100, None, "Fields c are not valid for fields param.")),
        Err(graph_error(100, None, "Fields d are not valid for fields param.")),
        Ok(json!({"e": 1})),
    ]);

    let mut object_ids = Map::new();
    let err = app
        .call
        .call_with_diagnostics("123/insights", "a,b,c,d,e", &[], &mut object_ids)
        .await
        .expect_err("budget exceeded");

    assert_eq!(err.kind, AdsErrorKind::RetryBudget);
    assert_eq!(transport.recorded().len(), 4);
    // Every field shed along the way is carried in the error details.
    assert_eq!(
        err.details,
        Some(json!({"unsupported_fields": ["a", "b", "c", "d"]}))
    );
}

#[tokio::test]
async fn errors_with_a_subcode_are_not_retried() {
    let (transport, app) = app_with(vec![Err(graph_error(
        100,
        Some(33),
        "Fields foo are not valid for fields param.",
    ))]);

    let mut object_ids = Map::new();
    let err = app
        .call
        .call_with_diagnostics("123/insights", "foo,bar", &[], &mut object_ids)
        .await
        .expect_err("fatal error");

    assert_eq!(err.kind, AdsErrorKind::Graph);
    assert_eq!(transport.recorded().len(), 1);
}

#[tokio::test]
async fn other_error_codes_are_not_retried() {
    let (transport, app) = app_with(vec![Err(graph_error(
        190,
        None,
        "Invalid OAuth access token.",
    ))]);

    let mut object_ids = Map::new();
    let err = app
        .call
        .call_with_diagnostics("123/insights", "foo", &[], &mut object_ids)
        .await
        .expect_err("fatal error");

    assert_eq!(err.kind, AdsErrorKind::Graph);
    assert_eq!(err.message, "Invalid OAuth access token.");
    assert_eq!(transport.recorded().len(), 1);
}

#[tokio::test]
async fn a_malformed_rejection_message_propagates_unparsed() {
    let (transport, app) = app_with(vec![Err(graph_error(
        100,
        None,
        "Unsupported get request.",
    ))]);

    let mut object_ids = Map::new();
    let err = app
        .call
        .call_with_diagnostics("123/insights", "foo", &[], &mut object_ids)
        .await
        .expect_err("propagated");

    assert_eq!(err.kind, AdsErrorKind::Graph);
    assert_eq!(err.message, "Unsupported get request.");
    assert_eq!(transport.recorded().len(), 1);
}

#[tokio::test]
async fn accepted_but_absent_fields_are_reported_as_unfound() {
    let (_transport, app) = app_with(vec![Ok(json!({"foo": 1}))]);

    let mut object_ids = Map::new();
    let (_, diagnostics) = app
        .call
        .call_with_diagnostics("123/insights", "foo,bar", &[], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(diagnostics.unfound_fields, ["bar"]);
    assert!(diagnostics.unsupported_fields.is_empty());
}

#[tokio::test]
async fn unfound_fields_are_skipped_for_non_object_results() {
    let (_transport, app) = app_with(vec![Ok(json!({"data": [1, 2, 3]}))]);

    let mut object_ids = Map::new();
    let (result, diagnostics) = app
        .call
        .call_with_diagnostics("123/things", "foo", &[String::from("data")], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(result, json!([1, 2, 3]));
    assert!(diagnostics.unfound_fields.is_empty());
}

#[tokio::test]
async fn placeholders_resolve_through_silent_lookups() {
    let (transport, app) = app_with(vec![
        // get_campaigns resolves the account first, then lists campaigns.
        Ok(account_listing("act_1")),
        Ok(json!({"data": [{"id": "c_9", "name": "spring"}, {"id": "c_10", "name": "fall"}]})),
        Ok(json!({"impressions": "120"})),
    ]);

    let mut object_ids = Map::new();
    let (result, diagnostics) = app
        .call
        .call_with_diagnostics("{campaign_id}/insights", "impressions", &[], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(result, json!({"impressions": "120"}));
    assert_eq!(diagnostics.url, "c_9/insights?fields=impressions");
    assert_eq!(object_ids.get("campaign_id"), Some(&json!("c_9")));

    let requests = transport.recorded();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[0].path, "me/?fields=adaccounts");
    assert_eq!(requests[1].path, "act_1/campaigns");
    assert_eq!(requests[2].path, "c_9/insights?fields=impressions");
}

#[tokio::test]
async fn supplied_object_ids_skip_the_lookup() {
    let (transport, app) = app_with(vec![Ok(json!({"impressions": "7"}))]);

    let mut object_ids = Map::new();
    object_ids.insert("campaign_id".to_string(), json!("c_42"));
    let (_, diagnostics) = app
        .call
        .call_with_diagnostics("{campaign_id}/insights", "impressions", &[], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(diagnostics.url, "c_42/insights?fields=impressions");
    assert_eq!(transport.recorded().len(), 1);
}

#[tokio::test]
async fn an_empty_listing_fails_placeholder_resolution() {
    let (_transport, app) = app_with(vec![
        Ok(account_listing("act_1")),
        Ok(json!({"data": []})),
    ]);

    let mut object_ids = Map::new();
    let err = app
        .call
        .call_with_diagnostics("{campaign_id}/insights", "impressions", &[], &mut object_ids)
        .await
        .expect_err("unresolvable placeholder");

    assert_eq!(err.kind, AdsErrorKind::Placeholder);
    assert!(err.message.contains("campaign_id"), "got: {}", err.message);
}

#[tokio::test]
async fn the_fields_param_joins_an_existing_query_with_an_ampersand() {
    let (transport, app) = app_with(vec![Ok(json!({"id": "x"}))]);

    let mut object_ids = Map::new();
    app.call
        .call_with_diagnostics("123/ads?limit=5", "id", &[], &mut object_ids)
        .await
        .expect("call result");

    assert_eq!(transport.recorded()[0].path, "123/ads?limit=5&fields=id");
}
