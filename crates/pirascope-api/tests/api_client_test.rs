#![allow(clippy::unwrap_used)]
// Integration tests for `ApiClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pirascope_api::models::{AddEmployeeBody, EditEmployeeBody};
use pirascope_api::{ApiClient, Error, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let client = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    (server, client)
}

fn user_json() -> serde_json::Value {
    json!({
        "user_id": 7,
        "name": "Dana Ops",
        "email": "dana@studio.test",
        "profile": "https://cdn.test/dana.png",
        "company_id": 3,
        "user_type": "company",
        "logged_in": true
    })
}

// ── Authentication tests ────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_sets_cookie() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/company_login"))
        .and(body_json(json!({ "email": "dana@studio.test", "password": "hunter2" })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=s3cr3t; Path=/")
                .set_body_json(json!({ "user": user_json(), "message": "ok" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "hunter2".to_string().into();
    let user = client.login("dana@studio.test", &secret).await.unwrap();

    assert_eq!(user.user_id, 7);
    assert_eq!(user.email, "dana@studio.test");
    assert!(client.cookie_header().unwrap().contains("session=s3cr3t"));
}

#[tokio::test]
async fn test_login_failure_carries_server_message() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/company_login"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.login("dana@studio.test", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => assert_eq!(message, "Invalid credentials"),
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_check_session_without_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    assert!(client.check_session().await.unwrap().is_none());
}

#[tokio::test]
async fn test_restored_cookie_is_sent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/check_session"))
        .and(header("cookie", "session=restored"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .mount(&server)
        .await;

    client.restore_cookies("session=restored");
    let user = client.check_session().await.unwrap().unwrap();
    assert_eq!(user.name, "Dana Ops");
}

// ── Asset tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_assets_sends_pagination() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 12,
            "page": 2,
            "limit": 5,
            "total_pages": 3,
            "assets": [{
                "id": 41,
                "name": "Midnight Run",
                "description": "Feature film",
                "image": null,
                "torrent_id": 9,
                "start_date": "2024-03-01",
                "end_date": "2024-06-01",
                "status": "active",
                "project_id": 2,
                "created_at": "2024-02-20T10:00:00Z",
                "updated_at": "2024-02-21T10:00:00Z"
            }]
        })))
        .mount(&server)
        .await;

    let page = client.list_assets(2, 5).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.assets.len(), 1);
    assert_eq!(page.assets[0].torrent_id, Some(9));
}

#[tokio::test]
async fn test_asset_detail_without_torrent() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_asset_detail/41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "asset": { "id": 41, "name": "Midnight Run", "status": "active" },
            "count": {
                "detected": [{ "name": "YouTube", "link_count": 4, "color_code": "#FF0000" }],
                "enforced": [],
                "removed": []
            },
            "statistics": {
                "today": { "detected": 1, "enforced": 0, "removed": 0 }
            }
        })))
        .mount(&server)
        .await;

    let detail = client.get_asset_detail(41).await.unwrap();

    assert!(detail.torrent.is_none());
    assert_eq!(detail.count.detected[0].link_count, 4);
    assert_eq!(detail.statistics.today.detected, 1);
    assert_eq!(detail.statistics.last_week.detected, 0);
    assert!(detail.activity.daily.is_empty());
}

// ── Employee tests ──────────────────────────────────────────────────

#[tokio::test]
async fn test_list_employees_omits_blank_search() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .and(query_param("search", "ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 1, "page": 1, "limit": 10, "total_pages": 1,
            "employees": [{ "id": 5, "name": "Ana", "email": "ana@studio.test", "status": "active" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": 0, "page": 1, "limit": 10, "total_pages": 1, "employees": []
        })))
        .mount(&server)
        .await;

    let searched = client.list_employees(1, 10, Some("ana")).await.unwrap();
    assert_eq!(searched.employees.len(), 1);

    let blank = client.list_employees(1, 10, Some("   ")).await.unwrap();
    assert!(blank.employees.is_empty());
}

#[tokio::test]
async fn test_employee_writes() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_employee"))
        .and(body_json(json!({
            "name": "Ana", "email": "ana@studio.test", "password": "secret1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "added" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/company/edit_employee/5"))
        .and(body_json(json!({
            "name": "Ana B", "email": "ana@studio.test", "status": "inactive"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/company/deactivate_employee/5"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .add_employee(&AddEmployeeBody {
            name: "Ana",
            email: "ana@studio.test",
            password: "secret1",
            profile: None,
            phone: None,
        })
        .await
        .unwrap();

    client
        .edit_employee(
            5,
            &EditEmployeeBody {
                name: "Ana B",
                email: "ana@studio.test",
                phone: None,
                profile: None,
                status: Some("inactive"),
            },
        )
        .await
        .unwrap();

    client.deactivate_employee(5).await.unwrap();
}

#[tokio::test]
async fn test_get_employee_unwraps_envelope() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employee/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "employee": { "id": 5, "name": "Ana", "email": "ana@studio.test", "status": "inactive",
                          "company_name": "Studio" }
        })))
        .mount(&server)
        .await;

    let employee = client.get_employee(5).await.unwrap();
    assert_eq!(employee.status, "inactive");
    assert_eq!(employee.company_name.as_deref(), Some("Studio"));
}

// ── Report tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_then_list_reports() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_piray_link"))
        .and(body_json(json!({ "link": "https://x.com/y" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_external_report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_reports": [
                { "id": 1, "reporter_id": 7, "link": "https://x.com/y", "status": 0,
                  "created_at": "2024-03-05T08:00:00Z", "updated_at": "2024-03-05T08:00:00Z" }
            ]
        })))
        .mount(&server)
        .await;

    client.add_report("https://x.com/y").await.unwrap();
    let reports = client.list_reports().await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].status, 0);
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_session_expired() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_reports().await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(message.contains("session expired"), "got: {message}");
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_message_extracted() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })),
        )
        .mount(&server)
        .await;

    let err = client.list_assets(1, 10).await.unwrap_err();
    assert_eq!(err.server_message(), Some("Database unavailable"));
    assert!(matches!(err, Error::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_not_found_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employee/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = client.get_employee(99).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.server_message(), None);
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_assets(1, 10).await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_malformed_non_ascii_body_is_deserialization_error() {
    let (server, client) = setup().await;

    // A two-byte character straddles the preview cut-off.
    let body = format!("{}é and more", "x".repeat(199));
    Mock::given(method("GET"))
        .and(path("/api/company/get_external_report"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .mount(&server)
        .await;

    let err = client.list_reports().await.unwrap_err();
    match err {
        Error::Deserialization { body: raw, .. } => assert_eq!(raw, body),
        other => panic!("expected Deserialization, got {other:?}"),
    }
}
