//! Tests for engine module

use super::*;
use crate::catalog::{self, Paging};
use crate::pagination::{PageParams, SignalKind};
use crate::types::Source;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(server: &MockServer, source: Source, page_size: u32) -> ExtractEngine {
    let config = HttpClientConfig::builder()
        .base_url(format!("{}/{}", server.uri(), source.api_root()))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    ExtractEngine::new(source, client, page_size)
}

fn jira_endpoint(name: &'static str, path: &'static str) -> EndpointDescriptor {
    EndpointDescriptor {
        source: Source::Jira,
        name,
        path,
        output_file: "out.json",
        items_key: "values",
        params: PageParams::START_AT,
        paging: Paging::Offset { expect: None },
    }
}

async fn mount_page(server: &MockServer, route: &str, start: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("startAt", start))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

// ============================================================================
// ExtractStats Tests
// ============================================================================

#[test]
fn test_extract_stats_mutations() {
    let mut stats = ExtractStats::default();
    stats.add_written(10, 2);
    stats.add_written(5, 1);
    stats.add_failure();
    stats.set_duration(1500);

    assert_eq!(stats.endpoints_written, 2);
    assert_eq!(stats.items_fetched, 15);
    assert_eq!(stats.pages_fetched, 3);
    assert_eq!(stats.endpoints_failed, 1);
    assert_eq!(stats.duration_ms, 1500);

    let mut total = ExtractStats::default();
    total.merge(&stats);
    total.merge(&stats);
    assert_eq!(total.items_fetched, 30);
    assert_eq!(total.endpoints_failed, 2);
}

#[test]
fn test_report_merge() {
    let mut report = ExtractReport::default();
    report.stats.add_failure();
    report.outcomes.push(EndpointOutcome::Failed {
        endpoint: "jira/users".to_string(),
        error: "HTTP 500".to_string(),
    });

    let mut other = ExtractReport::default();
    other.stats.add_written(1, 1);
    other.outcomes.push(EndpointOutcome::Written {
        endpoint: "confluence/spaces".to_string(),
        path: "x.json".into(),
        items: 1,
        pages: 1,
    });

    report.merge(other);
    assert_eq!(report.outcomes.len(), 2);
    assert!(!report.all_succeeded());
    assert_eq!(
        report.failures().map(EndpointOutcome::endpoint).collect::<Vec<_>>(),
        vec!["jira/users"]
    );
}

// ============================================================================
// Fetch Loop Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_total_and_offset() {
    let server = MockServer::start().await;
    let route = "/rest/api/2/project/search";

    mount_page(&server, route, "0", json!({"startAt": 0, "total": 5, "values": [1, 2]})).await;
    mount_page(&server, route, "2", json!({"startAt": 2, "total": 5, "values": [3, 4]})).await;
    mount_page(&server, route, "4", json!({"startAt": 4, "total": 5, "values": [5]})).await;

    let engine = engine(&server, Source::Jira, 2);
    let result = engine
        .fetch(&jira_endpoint("projects", "project/search"))
        .await
        .unwrap();

    // ceil(5 / 2) requests, every item once
    assert_eq!(result.pages, 3);
    assert_eq!(result.items, vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);
    assert_eq!(result.stop, StopReason::TotalReached);
}

#[tokio::test]
async fn test_fetch_sends_page_size() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/group"))
        .and(query_param("startAt", "0"))
        .and(query_param("maxResults", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0, "total": 1, "values": [{"name": "admins"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 50);
    let result = engine.fetch(&jira_endpoint("groups", "group")).await.unwrap();
    assert_eq!(result.items, vec![json!({"name": "admins"})]);
}

#[tokio::test]
async fn test_fetch_no_signal_single_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Open"}, {"name": "In Progress"}, {"name": "Done"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 2);
    let result = engine.fetch(&jira_endpoint("statuses", "status")).await.unwrap();

    assert_eq!(result.pages, 1);
    assert_eq!(result.len(), 3);
    assert_eq!(result.stop, StopReason::NoSignal);
}

#[tokio::test]
async fn test_fetch_is_last_sequence() {
    let server = MockServer::start().await;
    let route = "/rest/api/2/dashboard/search";

    mount_page(&server, route, "0", json!({"values": [1, 2]})).await;
    mount_page(&server, route, "2", json!({"values": [3]})).await;
    mount_page(&server, route, "4", json!({"isLast": true})).await;

    let mut endpoint = jira_endpoint("dashboards", "dashboard/search");
    endpoint.paging = Paging::Offset {
        expect: Some(SignalKind::IsLast),
    };

    let engine = engine(&server, Source::Jira, 2);
    let result = engine.fetch(&endpoint).await.unwrap();

    assert_eq!(result.items, vec![json!(1), json!(2), json!(3)]);
    assert_eq!(result.pages, 3);
    assert_eq!(result.stop, StopReason::LastPage);
}

#[tokio::test]
async fn test_fetch_confluence_next_link() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/space"))
        .and(query_param("start", "0"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"key": "A"}, {"key": "B"}],
            "start": 0, "limit": 2, "size": 2,
            "_links": {"next": "/rest/api/space?start=2&limit=2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/api/space"))
        .and(query_param("start", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"key": "C"}],
            "start": 2, "limit": 2, "size": 1,
            "_links": {"self": "/rest/api/space"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Confluence, 2);
    let spaces = catalog::find(Source::Confluence, "spaces").unwrap();
    let result = engine.fetch(spaces).await.unwrap();

    assert_eq!(
        result.items,
        vec![json!({"key": "A"}), json!({"key": "B"}), json!({"key": "C"})]
    );
    assert_eq!(result.stop, StopReason::NoNextLink);
}

#[tokio::test]
async fn test_fetch_empty_first_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/rest/api/2/filter/search",
        "0",
        json!({"startAt": 0, "maxResults": 50, "total": 0, "isLast": true, "values": []}),
    )
    .await;

    let engine = engine(&server, Source::Jira, 50);
    let result = engine
        .fetch(&jira_endpoint("filters", "filter/search"))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.pages, 1);
}

#[tokio::test]
async fn test_fetch_total_zero_stops_immediately() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        "/rest/api/2/issuetypescheme",
        "0",
        json!({"startAt": 0, "total": 0, "values": []}),
    )
    .await;

    let engine = engine(&server, Source::Jira, 50);
    let result = engine
        .fetch(&jira_endpoint("issue_type_schemes", "issuetypescheme"))
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.stop, StopReason::TotalReached);
}

#[tokio::test]
async fn test_fetch_single_object_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/api/2/serverInfo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "baseUrl": "https://jira.example.com", "version": "9.4.0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 50);
    let endpoint = catalog::find(Source::Jira, "system_info").unwrap();
    let result = engine.fetch(endpoint).await.unwrap();

    assert_eq!(
        result.items,
        vec![json!({"baseUrl": "https://jira.example.com", "version": "9.4.0"})]
    );
    assert_eq!(result.stop, StopReason::SinglePage);

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_fetch_error_names_endpoint() {
    let server = MockServer::start().await;
    let route = "/rest/api/2/screens";

    mount_page(&server, route, "0", json!({"startAt": 0, "total": 4, "values": [1, 2]})).await;
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("startAt", "2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 2);
    let err = engine
        .fetch(&jira_endpoint("screens", "screens"))
        .await
        .unwrap_err();

    match err {
        Error::Endpoint { endpoint, source } => {
            assert_eq!(endpoint, "jira/screens");
            assert!(matches!(*source, Error::HttpStatus { status: 500, .. }));
        }
        other => panic!("Expected Endpoint error, got {other}"),
    }
}

// ============================================================================
// Batch Run Tests
// ============================================================================

#[tokio::test]
async fn test_run_catalog_skips_failed_endpoint() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let writer = JsonWriter::new(dir.path());

    // priorities: page 1 ok, page 2 fails
    mount_page(
        &server,
        "/rest/api/2/priority",
        "0",
        json!({"startAt": 0, "total": 3, "values": [1, 2]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/priority"))
        .and(query_param("startAt", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    // statuses: fine
    Mock::given(method("GET"))
        .and(path("/rest/api/2/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"name": "Open"}])))
        .expect(1)
        .mount(&server)
        .await;

    let mut priorities = jira_endpoint("priorities", "priority");
    priorities.output_file = "jira_priorities.json";
    let mut statuses = jira_endpoint("statuses", "status");
    statuses.output_file = "jira_statuses.json";

    let engine = engine(&server, Source::Jira, 2);
    let report = engine.run_catalog(&[priorities, statuses], &writer).await;

    assert_eq!(report.stats.endpoints_failed, 1);
    assert_eq!(report.stats.endpoints_written, 1);
    assert!(report.outcomes[0].is_failed());
    assert_eq!(report.outcomes[0].endpoint(), "jira/priorities");

    assert!(!dir.path().join("jira_priorities.json").exists());
    let written = crate::output::read_snapshot(dir.path().join("jira_statuses.json")).unwrap();
    assert_eq!(written, vec![json!({"name": "Open"})]);
}

#[tokio::test]
async fn test_run_catalog_all_written() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let writer = JsonWriter::new(dir.path());

    for route in ["/rest/api/space", "/rest/api/content", "/rest/api/group", "/rest/api/user"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{"route": route}],
                "start": 0, "limit": 50, "size": 1,
                "_links": {}
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let engine = engine(&server, Source::Confluence, 50);
    let report = engine
        .run_catalog(catalog::catalog(Source::Confluence), &writer)
        .await;

    assert!(report.all_succeeded());
    assert_eq!(report.stats.endpoints_written, 4);
    assert_eq!(report.stats.items_fetched, 4);
    for file in [
        "confluence_spaces.json",
        "confluence_content.json",
        "confluence_groups.json",
        "confluence_users.json",
    ] {
        assert!(dir.path().join(file).is_file(), "{file}");
    }
}

// ============================================================================
// Issue Search Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_issues() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let writer = JsonWriter::new(dir.path());

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("jql", "project = TEST"))
        .and(query_param("startAt", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 0, "maxResults": 1, "total": 2, "issues": [{"key": "TEST-1"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .and(query_param("jql", "project = TEST"))
        .and(query_param("startAt", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startAt": 1, "maxResults": 1, "total": 2, "issues": [{"key": "TEST-2"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 1);
    let (path, result) = engine
        .fetch_issues("project = TEST", catalog::ISSUES_OUTPUT_FILE, &writer)
        .await
        .unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(
        crate::output::read_snapshot(path).unwrap(),
        vec![json!({"key": "TEST-1"}), json!({"key": "TEST-2"})]
    );
}

#[tokio::test]
async fn test_fetch_issues_failure_is_returned() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let writer = JsonWriter::new(dir.path());

    Mock::given(method("GET"))
        .and(path("/rest/api/2/search"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad jql"))
        .mount(&server)
        .await;

    let engine = engine(&server, Source::Jira, 50);
    let err = engine
        .fetch_issues("project = ", "issues.json", &writer)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("jira/issues"));
    assert!(!dir.path().join("issues.json").exists());
}

#[tokio::test]
async fn test_fetch_issues_rejects_confluence() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let engine = engine(&server, Source::Confluence, 50);
    let result = engine
        .fetch_issues("x", "issues.json", &JsonWriter::new(dir.path()))
        .await;
    assert!(matches!(result, Err(Error::Config { .. })));
}
