#![allow(clippy::unwrap_used)]
// Lazy pagination and endpoint-wrapper tests against a wiremock controller.

use futures_util::{StreamExt, TryStreamExt};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use omada_api::{ClientConfig, Error, EventFilter, LevelFilter, ModuleFilter, OmadaClient};

const CID: &str = "cid";
const TOKEN: &str = "t0k3n";
const SITE_KEY: &str = "0bf476c155ea24942722c5a8b516adfe";

// ── Helpers ─────────────────────────────────────────────────────────

fn api(suffix: &str) -> String {
    format!("/{CID}/api/v2/{suffix}")
}

fn ok(result: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "errorCode": 0,
        "msg": "Success.",
        "result": result,
    }))
}

fn page(ids: std::ops::Range<u64>, total_rows: u64, current_page: u64) -> ResponseTemplate {
    let data: Vec<Value> = ids.map(|id| json!({"id": id})).collect();
    ok(json!({
        "totalRows": total_rows,
        "currentPage": current_page,
        "currentSize": 10,
        "data": data,
    }))
}

async fn logged_in() -> (MockServer, OmadaClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(api("login")))
        .respond_with(ok(json!({"omadacId": CID, "roleType": 0, "token": TOKEN})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("users/current")))
        .respond_with(ok(json!({
            "name": "admin",
            "email": "admin@example.com",
            "privilege": {
                "all": true,
                "sites": [{"name": "Default", "category": "site", "key": SITE_KEY}]
            }
        })))
        .mount(&server)
        .await;

    let config = ClientConfig::new(Url::parse(&server.uri()).unwrap(), CID);
    let mut client = OmadaClient::new(config).unwrap();
    client
        .login("admin", &SecretString::from("pw".to_string()))
        .await
        .unwrap();
    (server, client)
}

fn ids(records: &[Value]) -> Vec<u64> {
    records.iter().map(|r| r["id"].as_u64().unwrap()).collect()
}

async fn requests_to(server: &MockServer, suffix: &str) -> Vec<wiremock::Request> {
    let target = api(suffix);
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path() == target)
        .collect()
}

fn query_value(request: &wiremock::Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_walks_every_page_in_order() {
    let (server, client) = logged_in().await;
    let clients = format!("sites/{SITE_KEY}/clients");
    for (n, range) in [(1, 0..10), (2, 10..20), (3, 20..30), (4, 30..32)] {
        Mock::given(method("GET"))
            .and(path(api(&clients)))
            .and(query_param("currentPage", n.to_string()))
            .and(query_param("currentPageSize", "10"))
            .and(query_param("filters.active", "true"))
            .and(query_param("token", TOKEN))
            .respond_with(page(range, 32, n))
            .expect(1)
            .mount(&server)
            .await;
    }

    let records: Vec<Value> = client
        .list_site_clients(None)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&records), (0..32).collect::<Vec<_>>());

    let pages: Vec<String> = requests_to(&server, &clients)
        .await
        .iter()
        .map(|r| query_value(r, "currentPage").unwrap())
        .collect();
    assert_eq!(pages, ["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_empty_first_page_is_one_request() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .respond_with(ok(json!({"totalRows": 0, "currentPage": 1, "currentSize": 10, "data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let records: Vec<Value> = client.list_sites().try_collect().await.unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_empty_page_ends_stream_despite_total() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "1"))
        .respond_with(page(0..10, 50, 1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "2"))
        .respond_with(page(0..0, 50, 2))
        .expect(1)
        .mount(&server)
        .await;

    let records: Vec<Value> = client.list_sites().try_collect().await.unwrap();

    assert_eq!(records.len(), 10);
}

#[tokio::test]
async fn test_follows_shrinking_total() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "1"))
        .respond_with(page(0..10, 40, 1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "2"))
        .respond_with(page(10..20, 15, 2))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "3"))
        .respond_with(page(20..30, 15, 3))
        .expect(0)
        .mount(&server)
        .await;

    let records: Vec<Value> = client.list_sites().try_collect().await.unwrap();

    assert_eq!(ids(&records), (0..20).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_is_lazy() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "1"))
        .respond_with(page(0..10, 100, 1))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "2"))
        .respond_with(page(10..20, 100, 2))
        .expect(0)
        .mount(&server)
        .await;

    let stream = client.list_sites();
    // Nothing is fetched until the first poll.
    assert!(requests_to(&server, "sites").await.is_empty());

    let first: Vec<Value> = stream.take(3).try_collect().await.unwrap();
    assert_eq!(ids(&first), [0, 1, 2]);
}

#[tokio::test]
async fn test_caller_page_overrides() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "3"))
        .and(query_param("currentPageSize", "100"))
        .respond_with(page(200..250, 250, 3))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "4"))
        .respond_with(page(200..250, 250, 4))
        .expect(0)
        .mount(&server)
        .await;

    let records: Vec<Value> = client
        .paginated_get(
            "sites",
            &[("currentPage", "3".into()), ("currentPageSize", "100".into())],
        )
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&records), (200..250).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_start_page_on_last_page_stops() {
    let (server, client) = logged_in().await;
    // A controller that clamps out-of-range pages would repeat page 3.
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .respond_with(page(20..25, 25, 3))
        .mount(&server)
        .await;

    let records: Vec<Value> = client
        .paginated_get("sites", &[("currentPage", "3".into())])
        .try_collect()
        .await
        .unwrap();

    assert_eq!(ids(&records), (20..25).collect::<Vec<_>>());
    let pages: Vec<String> = requests_to(&server, "sites")
        .await
        .iter()
        .map(|r| query_value(r, "currentPage").unwrap())
        .collect();
    assert_eq!(pages, ["3"]);
}

#[tokio::test]
async fn test_typed_records() {
    #[derive(Debug, Deserialize)]
    struct Row {
        id: u64,
    }

    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .respond_with(page(0..3, 3, 1))
        .expect(1)
        .mount(&server)
        .await;

    let rows: Vec<Row> = client
        .paginated::<Row>("sites", &[])
        .try_collect()
        .await
        .unwrap();

    assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), [0, 1, 2]);
}

#[tokio::test]
async fn test_error_mid_traversal_surfaces_once() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "1"))
        .respond_with(page(0..10, 30, 1))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(api("sites")))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorCode": -1,
            "msg": "General error."
        })))
        .mount(&server)
        .await;

    let results: Vec<Result<Value, Error>> = client.list_sites().collect().await;

    assert_eq!(results.len(), 11);
    assert!(results[..10].iter().all(Result::is_ok));
    assert_eq!(results[10].as_ref().unwrap_err().code(), Some(-1));
}

// ── Endpoint wrappers ───────────────────────────────────────────────

#[tokio::test]
async fn test_events_send_filters_on_every_page() {
    let (server, client) = logged_in().await;
    let events = format!("sites/{SITE_KEY}/events");
    for (n, range) in [(1, 0..10), (2, 10..12)] {
        Mock::given(method("GET"))
            .and(path(api(&events)))
            .and(query_param("currentPage", n.to_string()))
            .and(query_param("filters.module", "system"))
            .and(query_param("filters.level", "error"))
            .and(query_param("filters.timeStart", "1682000000000"))
            .respond_with(page(range, 12, n))
            .expect(1)
            .mount(&server)
            .await;
    }

    let filter = EventFilter {
        time_start: Some(1_682_000_000_000),
        level: Some(LevelFilter::Error),
        module: Some(ModuleFilter::System),
        ..EventFilter::default()
    };
    let records: Vec<Value> = client
        .list_site_events(Some("Default"), &filter)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 12);
}

#[tokio::test]
async fn test_alerts_pass_archived_flag() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api(&format!("sites/{SITE_KEY}/alerts"))))
        .and(query_param("filters.archived", "true"))
        .respond_with(page(0..1, 1, 1))
        .expect(1)
        .mount(&server)
        .await;

    let records: Vec<Value> = client
        .list_site_alerts(None, true, &EventFilter::default())
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn test_unknown_site_fails_before_stream() {
    let (server, client) = logged_in().await;

    let result = client.list_site_clients(Some("Nowhere")).await;

    assert!(matches!(result, Err(Error::UnknownSite { ref name }) if name == "Nowhere"));
    assert!(
        requests_to(&server, &format!("sites/{SITE_KEY}/clients"))
            .await
            .is_empty()
    );
}

#[tokio::test]
async fn test_site_groups_by_type() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api(&format!(
            "sites/{SITE_KEY}/setting/profiles/groups/0"
        ))))
        .respond_with(ok(json!([{
            "count": 2,
            "groupId": "6460b6cc4b1e3c1e1e1b1f70",
            "name": "IPGroup_Any",
            "type": 0,
            "buildIn": true
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let groups = client.get_site_groups(None, Some("0")).await.unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "IPGroup_Any");
    assert!(groups[0].build_in);
}

#[tokio::test]
async fn test_settings_round_trip() {
    let (server, client) = logged_in().await;
    let setting = format!("sites/{SITE_KEY}/setting");
    let document = json!({"led": {"enable": false}, "remoteLog": {"enable": true}});
    Mock::given(method("GET"))
        .and(path(api(&setting)))
        .respond_with(ok(document.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(api(&setting)))
        .and(body_json(document.clone()))
        .respond_with(ok(document.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = client.get_site_settings(None).await.unwrap();
    let updated = client.set_site_settings(&fetched, None).await.unwrap();

    assert_eq!(updated, document);
}

#[tokio::test]
async fn test_scenarios() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api("scenarios")))
        .respond_with(ok(json!(["Hotel", "Office", "Restaurant"])))
        .expect(1)
        .mount(&server)
        .await;

    let scenarios = client.get_scenarios().await.unwrap();

    assert_eq!(scenarios, ["Hotel", "Office", "Restaurant"]);
}

#[tokio::test]
async fn test_wireless_group_id_stays_one_segment() {
    let (server, client) = logged_in().await;
    Mock::given(method("GET"))
        .and(path(api(&format!(
            "sites/{SITE_KEY}/setting/wlans/lab%2Fguest%3Fx/ssids"
        ))))
        .respond_with(ok(json!({"data": [{"name": "Guest"}]})))
        .expect(1)
        .mount(&server)
        .await;

    let ssids = client
        .get_wireless_networks("lab/guest?x", None)
        .await
        .unwrap();

    assert_eq!(ssids["data"][0]["name"], "Guest");
}
