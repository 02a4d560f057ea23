use serde_json::json;
use snow_client::{Credentials, DisplayValue, QueryOptions, SnowClient, SnowError};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SYS_ID: &str = "ef2706c29707d510b2a3b68fe153af7d";

/// Helper to create a client pointed at the mock server
fn create_test_client(server: &MockServer) -> SnowClient {
    SnowClient::new(Credentials::new("admin", "admin", server.uri()))
        .expect("Failed to create client")
}

/// Test listing records with pagination headers
#[tokio::test]
async fn test_list_records() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;
    let link = "<https://dev.example.com/api/now/table/incident?sysparm_offset=1&sysparm_limit=1>;rel=\"next\"";

    Mock::given(method("GET"))
        .and(path("/api/now/table/incident"))
        .and(query_param("sysparm_limit", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Total-Count", "1")
                .insert_header("Link", link)
                .set_body_json(json!({"result": [{"sys_id": "abc", "short_description": "x"}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let query = QueryOptions::new().with_limit(1);
    let page = client
        .table()
        .list("incident", Some(&query))
        .await
        .expect("Failed to list records");

    assert_eq!(page.count, Some(1));
    assert_eq!(page.link.as_deref(), Some(link));
    assert_eq!(page.result.len(), 1);
    assert_eq!(page.result[0]["sys_id"], "abc");
    assert_eq!(page.result[0]["short_description"], "x");
}

/// Test listing without count or link headers
#[tokio::test]
async fn test_list_without_headers() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/now/table/sc_request"))
        .and(query_param("sysparm_no_count", "true"))
        .and(query_param("sysparm_suppress_pagination_header", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": []})))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let query = QueryOptions::new()
        .with_no_count(true)
        .with_suppress_pagination_header(true);
    let page = client.table().list("sc_request", Some(&query)).await.unwrap();

    assert_eq!(page.count, None);
    assert_eq!(page.link, None);
    assert!(page.result.is_empty());
}

/// Test a non-JSON success body is a decode error
#[tokio::test]
async fn test_list_malformed_body() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>Instance Hibernating</html>"))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.table().list("incident", None).await.unwrap_err();
    assert!(matches!(err, SnowError::Decode(_)), "unexpected error: {err:?}");
}

/// Test getting a single untyped record
#[tokio::test]
async fn test_get_record() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/api/now/table/incident/{SYS_ID}")))
        .and(query_param("sysparm_display_value", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {
                "sys_id": SYS_ID,
                "priority": {"display_value": "1 - Critical", "value": "1"}
            }
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let query = QueryOptions::new().with_display_value(DisplayValue::Both);
    let record = client
        .table()
        .get("incident", SYS_ID, Some(&query))
        .await
        .expect("Failed to get record");

    assert_eq!(record.result["sys_id"], SYS_ID);
    assert_eq!(record.result["priority"]["display_value"], "1 - Critical");
}

/// Test getting a record that does not exist
#[tokio::test]
async fn test_get_missing_record() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "No Record found", "detail": "Record doesn't exist or ACL restricts the record retrieval"},
            "status": "failure"
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let err = client.table().get("incident", "missing", None).await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
}

/// Test the create / update / delete lifecycle
#[tokio::test]
async fn test_record_lifecycle() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/now/table/incident"))
        .and(body_json(json!({"short_description": "VPN down"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "result": {"sys_id": SYS_ID, "short_description": "VPN down", "state": "1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(format!("/api/now/table/incident/{SYS_ID}")))
        .and(body_json(json!({"state": "2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": {"sys_id": SYS_ID, "short_description": "VPN down", "state": "2"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/api/now/table/incident/{SYS_ID}")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let table = client.table();

    let created = table
        .create("incident", &json!({"short_description": "VPN down"}))
        .await
        .expect("Failed to create record");
    assert_eq!(created.result["sys_id"], SYS_ID);

    let updated = table
        .update("incident", SYS_ID, &json!({"state": "2"}))
        .await
        .expect("Failed to update record");
    assert_eq!(updated.result["state"], "2");

    table
        .delete("incident", SYS_ID)
        .await
        .expect("Failed to delete record");
}

/// Test dot segments never reach the server
#[tokio::test]
async fn test_dot_segment_ids_are_rejected() {
    let _ = env_logger::try_init();
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    for sys_id in [".", ".."] {
        let err = client.table().delete("incident", sys_id).await.unwrap_err();
        assert!(matches!(err, SnowError::InvalidParameter(_)), "unexpected error: {err:?}");
    }

    let err = client
        .table()
        .update("incident", "..", &json!({"state": "2"}))
        .await
        .unwrap_err();
    assert!(matches!(err, SnowError::InvalidParameter(_)), "unexpected error: {err:?}");
}
