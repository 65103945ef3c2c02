#![allow(clippy::unwrap_used)]
// Store behaviour against a mocked API, using wiremock.

use std::sync::Arc;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pirascope_api::{ApiClient, TransportConfig};
use pirascope_core::charts::{self, Panel, Timeframe};
use pirascope_core::{
    CoreError, Dashboard, EmployeeStatus, MemorySessionStore, NoticeLevel, PersistedSession,
    RecordingNotifier, SessionStore, SessionUser,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    server: MockServer,
    dashboard: Dashboard,
    notices: Arc<RecordingNotifier>,
    sessions: Arc<MemorySessionStore>,
}

async fn harness_with(sessions: MemorySessionStore) -> Harness {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/api", server.uri())).unwrap();
    let api = ApiClient::new(base_url, &TransportConfig::default()).unwrap();
    let notices = Arc::new(RecordingNotifier::new());
    let sessions = Arc::new(sessions);
    let dashboard = Dashboard::with_api(api, notices.clone(), sessions.clone());
    Harness {
        server,
        dashboard,
        notices,
        sessions,
    }
}

async fn harness() -> Harness {
    harness_with(MemorySessionStore::new()).await
}

fn user_json() -> serde_json::Value {
    json!({
        "user_id": 7,
        "name": "Dana Ops",
        "email": "dana@studio.test",
        "company_id": 3,
        "user_type": "company",
        "logged_in": true
    })
}

fn asset_json(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "status": "active",
        "torrent_id": null,
        "start_date": "2024-03-01",
        "end_date": "2024-06-01"
    })
}

fn asset_page_json(page: u32, ids: std::ops::RangeInclusive<u64>) -> serde_json::Value {
    let assets: Vec<_> = ids.map(|id| asset_json(id, &format!("Asset {id}"))).collect();
    json!({ "total": 12, "page": page, "limit": 5, "total_pages": 3, "assets": assets })
}

fn detail_json(id: u64) -> serde_json::Value {
    json!({
        "asset": asset_json(id, "Midnight Run"),
        "count": {
            "detected": [{ "name": "YouTube", "link_count": 4, "color_code": "#FF0000" }],
            "enforced": [{ "name": "YouTube", "link_count": 2 }],
            "removed": []
        },
        "statistics": {
            "today": { "detected": 3, "enforced": 1, "removed": 0 },
            "yesterday": { "detected": 1, "enforced": 0, "removed": 0 }
        },
        "activity": {
            "daily": [{ "name": "2024-03-05", "detected": 3, "enforced": 1, "removed": 0 }]
        }
    })
}

fn employee_json(status: &str) -> serde_json::Value {
    json!({
        "total": 1, "page": 1, "limit": 10, "total_pages": 1,
        "employees": [{ "id": 5, "name": "Ana", "email": "ana@studio.test", "status": status }]
    })
}

fn secret(s: &str) -> SecretString {
    s.to_string().into()
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success_authenticates_and_persists() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/company_login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=live; Path=/")
                .set_body_json(json!({ "user": user_json() })),
        )
        .mount(&h.server)
        .await;

    h.dashboard
        .auth()
        .login("dana@studio.test", &secret("hunter2"))
        .await
        .unwrap();

    let state = h.dashboard.auth().state();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.user.as_ref().unwrap().name, "Dana Ops");
    assert_eq!(state.error, None);
    assert_eq!(h.notices.messages(NoticeLevel::Success), vec!["Login successful"]);

    let saved = h.sessions.load().unwrap().unwrap();
    assert!(saved.is_authenticated);
    assert!(saved.cookies.unwrap().contains("session=live"));
    assert_eq!(h.dashboard.require_session().unwrap().user_id, 7);
}

#[tokio::test]
async fn test_login_invalid_credentials_sets_error() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/company_login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&h.server)
        .await;

    let result = h
        .dashboard
        .auth()
        .login("dana@studio.test", &secret("wrong"))
        .await;

    assert!(matches!(result, Err(CoreError::AuthenticationFailed { .. })));
    let state = h.dashboard.auth().state();
    assert!(!state.is_authenticated);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert_eq!(h.notices.messages(NoticeLevel::Error), vec!["Invalid credentials"]);
    assert!(h.sessions.load().unwrap().is_none());
    assert!(matches!(
        h.dashboard.require_session(),
        Err(CoreError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn test_login_failure_without_message_uses_fallback() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/company_login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    let _ = h.dashboard.auth().login("a@b.test", &secret("x")).await;
    assert_eq!(h.dashboard.auth().state().error.as_deref(), Some("Login failed"));
}

#[tokio::test]
async fn test_saved_session_is_restored_and_rechecked() {
    let saved = PersistedSession {
        user: Some(SessionUser {
            user_id: 7,
            name: "Dana Ops".into(),
            email: "dana@studio.test".into(),
            profile: None,
            company_id: Some(3),
            user_type: None,
            logged_in: true,
        }),
        is_authenticated: true,
        cookies: Some("session=saved".into()),
    };
    let h = harness_with(MemorySessionStore::with_session(saved)).await;
    assert!(h.dashboard.auth().is_authenticated());

    Mock::given(method("GET"))
        .and(path("/api/auth/check_session"))
        .and(header("cookie", "session=saved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": user_json() })))
        .expect(1)
        .mount(&h.server)
        .await;

    h.dashboard.auth().fetch_auth_status().await;
    assert!(h.dashboard.auth().is_authenticated());
}

#[tokio::test]
async fn test_failed_session_check_signs_out() {
    let saved = PersistedSession {
        user: None,
        is_authenticated: true,
        cookies: None,
    };
    let h = harness_with(MemorySessionStore::with_session(saved)).await;

    Mock::given(method("GET"))
        .and(path("/api/auth/check_session"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&h.server)
        .await;

    h.dashboard.auth().fetch_auth_status().await;

    let state = h.dashboard.auth().state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(h.sessions.load().unwrap().is_none());
}

#[tokio::test]
async fn test_session_without_user_is_unauthenticated() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/check_session"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "user": null })))
        .mount(&h.server)
        .await;

    h.dashboard.auth().fetch_auth_status().await;
    assert!(!h.dashboard.auth().is_authenticated());
}

#[tokio::test]
async fn test_logout_clears_state_and_storage() {
    let h = harness_with(MemorySessionStore::with_session(PersistedSession {
        user: None,
        is_authenticated: true,
        cookies: Some("session=x".into()),
    }))
    .await;

    h.dashboard.auth().logout();

    assert!(!h.dashboard.auth().is_authenticated());
    assert!(h.sessions.load().unwrap().is_none());
    assert_eq!(h.notices.messages(NoticeLevel::Info), vec!["Logged out successfully"]);
}

// ── Assets ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_assets_second_page() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_page_json(2, 6..=10)))
        .mount(&h.server)
        .await;

    h.dashboard.assets().get_assets(2, 5).await.unwrap();

    let state = h.dashboard.assets().state();
    assert_eq!(state.current_page, 2);
    assert_eq!(state.total_pages, 3);
    assert_eq!(state.total_assets, 12);
    assert!(state.assets.len() <= 5);
    assert_eq!(state.assets[0].id, 6);
    assert_eq!(state.page_info().showing_range(), Some((6, 10)));
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_assets() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_page_json(1, 1..=5)))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&h.server)
        .await;

    h.dashboard.assets().get_assets(1, 5).await.unwrap();
    let err = h.dashboard.assets().get_assets(2, 5).await.unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(503), .. }));

    let state = h.dashboard.assets().state();
    assert_eq!(state.assets.len(), 5);
    assert_eq!(state.current_page, 1);
    assert!(!state.is_loading);
    assert_eq!(state.error.as_deref(), Some("Failed to fetch assets"));
    assert_eq!(h.notices.messages(NoticeLevel::Error), vec!["Failed to fetch assets"]);
}

#[tokio::test]
async fn test_select_asset_loads_then_clears_detail() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_assets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(asset_page_json(1, 41..=41)))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_asset_detail/41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(41)))
        .expect(1)
        .mount(&h.server)
        .await;

    let assets = h.dashboard.assets();
    assets.get_assets(1, 10).await.unwrap();
    let first = assets.state().assets[0].clone();

    assets.select_asset(Some(first)).await.unwrap();
    let state = assets.state();
    assert_eq!(state.selected_detail().unwrap().asset.id, 41);

    // Clearing the selection must not hit the detail endpoint again.
    assets.select_asset(None).await.unwrap();
    let state = assets.state();
    assert!(state.selected_asset.is_none());
    assert!(state.asset_detail.is_none());
}

#[tokio::test]
async fn test_select_by_id_outside_cache_fetches_detail() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_asset_detail/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(77)))
        .expect(1)
        .mount(&h.server)
        .await;

    h.dashboard.assets().select_asset_by_id(77).await.unwrap();

    let state = h.dashboard.assets().state();
    assert_eq!(state.selected_asset.as_ref().unwrap().id, 77);
    assert_eq!(state.selected_detail().unwrap().links.detected.len(), 1);
}

#[tokio::test]
async fn test_detail_without_torrent_renders_every_panel() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_asset_detail/41"))
        .respond_with(ResponseTemplate::new(200).set_body_json(detail_json(41)))
        .mount(&h.server)
        .await;

    h.dashboard.assets().get_asset_detail(41).await.unwrap();
    let state = h.dashboard.assets().state();
    let detail = state.asset_detail.as_ref().unwrap();
    assert!(detail.torrent.is_none());

    let bars = charts::platform_breakdown(detail);
    assert_eq!(bars[0].total(), 6);
    assert_eq!(charts::platform_distribution(detail).len(), 1);
    assert_eq!(charts::platform_rows(detail).len(), 2);
    assert_eq!(charts::period_slices(detail.statistics.today).len(), 2);
    assert!(charts::period_slices(detail.statistics.last_week).is_empty());
    assert_eq!(charts::period_comparison(&detail.statistics)[0].delta(), 2);
    assert_eq!(charts::detection_series(detail, Timeframe::Daily)[0].label, "Mar 5");
    assert!(charts::detection_series(detail, Timeframe::Monthly).is_empty());

    assert_eq!(charts::client_distribution(detail), Panel::NoData);
    assert_eq!(charts::top_clients(detail), Panel::NoData);
    assert_eq!(charts::country_distribution(detail), Panel::NoData);
    assert_eq!(charts::isp_distribution(detail), Panel::NoData);
    assert_eq!(charts::peer_points(detail), Panel::NoData);
    assert_eq!(charts::torrent_activity(detail), Panel::NoData);
    assert_eq!(charts::latest_peers(detail), Panel::NoData);
}

// ── Employees ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_deactivate_then_refetch_shows_inactive() {
    let h = harness().await;

    // The first list call sees the active record; later calls see it deactivated.
    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(employee_json("active")))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(employee_json("inactive")))
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/company/deactivate_employee/5"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let employees = h.dashboard.employees();
    employees.get_employees(1, 10, None).await.unwrap();
    assert_eq!(employees.state().employees[0].status, EmployeeStatus::Active);

    employees.deactivate_employee(5).await.unwrap();
    employees.get_employees(1, 10, None).await.unwrap();

    let state = employees.state();
    assert_eq!(state.employees.len(), 1);
    assert_eq!(state.employees[0].id, 5);
    assert_eq!(state.employees[0].status, EmployeeStatus::Inactive);
    assert_eq!(
        h.notices.messages(NoticeLevel::Success),
        vec!["Employee deactivated successfully"]
    );
}

#[tokio::test]
async fn test_refetch_reuses_last_query() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .and(query_param("page", "2"))
        .and(query_param("search", "ana"))
        .respond_with(ResponseTemplate::new(200).set_body_json(employee_json("active")))
        .expect(2)
        .mount(&h.server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/company/edit_employee/5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&h.server)
        .await;

    let employees = h.dashboard.employees();
    employees.get_employees(2, 10, Some(" ana ")).await.unwrap();
    employees
        .update_employee(
            5,
            &pirascope_core::EmployeeUpdate {
                name: "Ana".into(),
                email: "ana@studio.test".into(),
                phone: None,
                profile: None,
                status: Some(EmployeeStatus::Active),
            },
        )
        .await
        .unwrap();

    assert_eq!(employees.state().query.search.as_deref(), Some("ana"));
}

#[tokio::test]
async fn test_failed_write_skips_refetch() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_employee"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({ "message": "Email already registered" })),
        )
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(employee_json("active")))
        .expect(0)
        .mount(&h.server)
        .await;

    let result = h
        .dashboard
        .employees()
        .add_employee(&pirascope_core::NewEmployee {
            name: "Ana".into(),
            email: "ana@studio.test".into(),
            password: secret("secret1"),
            profile: None,
            phone: None,
        })
        .await;

    assert!(result.is_err());
    assert_eq!(
        h.dashboard.employees().state().error.as_deref(),
        Some("Email already registered")
    );
}

#[tokio::test]
async fn test_committed_write_succeeds_when_refetch_fails() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_employee"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employees"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&h.server)
        .await;

    h.dashboard
        .employees()
        .add_employee(&pirascope_core::NewEmployee {
            name: "Ana".into(),
            email: "ana@studio.test".into(),
            password: secret("secret1"),
            profile: None,
            phone: None,
        })
        .await
        .unwrap();

    let state = h.dashboard.employees().state();
    assert_eq!(state.error.as_deref(), Some("Failed to fetch employees"));
    assert!(!state.is_loading);
    assert_eq!(
        h.notices.notices(),
        vec![
            (NoticeLevel::Success, "Employee added successfully".to_owned()),
            (NoticeLevel::Error, "Failed to fetch employees".to_owned()),
        ]
    );
}

#[tokio::test]
async fn test_get_employee_not_found() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_employee/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.server)
        .await;

    let err = h.dashboard.employees().get_employee(99).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    assert!(h.dashboard.employees().state().current_employee.is_none());
}

// ── Reports ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_add_report_rejects_bad_links_without_http() {
    let h = harness().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&h.server)
        .await;

    let reports = h.dashboard.reports();
    assert!(!reports.add_report("not-a-url").await);
    assert_eq!(reports.state().error.as_deref(), Some("Please enter a valid URL"));

    assert!(!reports.add_report("").await);
    assert_eq!(reports.state().error.as_deref(), Some("Please enter a link"));
}

#[tokio::test]
async fn test_add_report_posts_then_refetches_once() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_piray_link"))
        .and(body_json(json!({ "link": "https://x.com/y" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_external_report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_reports": [
                { "id": 1, "reporter_id": 7, "link": "https://x.com/y", "status": 0 }
            ]
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let reports = h.dashboard.reports();
    assert!(reports.add_report("https://x.com/y").await);

    let state = reports.state();
    assert_eq!(state.reports.len(), 1);
    assert_eq!(state.error, None);
    assert_eq!(
        h.notices.messages(NoticeLevel::Success),
        vec!["Report added successfully"]
    );
}

#[tokio::test]
async fn test_add_report_http_failure_returns_false() {
    let h = harness().await;

    Mock::given(method("POST"))
        .and(path("/api/company/add_piray_link"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_external_report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "external_reports": [] })))
        .expect(0)
        .mount(&h.server)
        .await;

    assert!(!h.dashboard.reports().add_report("https://x.com/y").await);
    assert_eq!(
        h.dashboard.reports().state().error.as_deref(),
        Some("Failed to add report")
    );
}

// ── Subscriptions ───────────────────────────────────────────────────

#[tokio::test]
async fn test_subscribers_see_store_updates() {
    let h = harness().await;

    Mock::given(method("GET"))
        .and(path("/api/company/get_external_report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "external_reports": [{ "id": 3, "link": "https://t.me/x", "status": 1 }]
        })))
        .mount(&h.server)
        .await;

    let mut stream = h.dashboard.reports().subscribe();
    assert!(stream.current().reports.is_empty());

    h.dashboard.reports().get_reports().await.unwrap();
    assert_eq!(stream.latest().reports.len(), 1);
    assert_eq!(
        stream.changed().await.unwrap().reports[0].status,
        pirascope_core::ReportStatus::Processed
    );
}
