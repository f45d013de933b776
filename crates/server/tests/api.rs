use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use configs::StorageConfig;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestData {
    storage: StorageConfig,
}

impl TestData {
    fn new() -> Self {
        let data_dir = PathBuf::from(format!("target/test-data/{}", Uuid::new_v4()));
        Self { storage: StorageConfig { data_dir, ..StorageConfig::default() } }
    }

    async fn app(&self) -> anyhow::Result<Router> {
        Ok(server::build_app(&self.storage).await?)
    }

    async fn accounts_file(&self) -> anyhow::Result<String> {
        Ok(tokio::fs::read_to_string(self.storage.accounts_path()).await?)
    }
}

impl Drop for TestData {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.storage.data_dir);
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

async fn send_raw(app: &Router, uri: &str, content_type: &str, body: &'static str) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body))?;
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn account_body(name: &str) -> Value {
    json!({"type": "checking", "person_name": name, "address": format!("{name} street 1")})
}

#[tokio::test]
async fn create_then_get_account_roundtrips_fields() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;

    let (status, body) = send(&app, "POST", "/accounts/", Some(json!({"type": "savings", "person_name": "Ada Lovelace", "address": "12 Analytical Way"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account created successfully");
    let id = body["account_id"].as_i64().expect("account_id");
    assert_eq!(id, 1);

    let (status, body) = send(&app, "GET", &format!("/accounts/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "type": "savings", "person_name": "Ada Lovelace", "address": "12 Analytical Way"}));

    assert_eq!(data.accounts_file().await?, "1,savings,Ada Lovelace,12 Analytical Way\n");
    Ok(())
}

#[tokio::test]
async fn account_ids_never_reused_after_delete() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;
    for name in ["Ada", "Bob", "Cy"] {
        let (status, _) = send(&app, "POST", "/accounts/", Some(account_body(name))).await?;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, "DELETE", "/accounts/2", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account deleted successfully");

    let (_, list) = send(&app, "GET", "/accounts/", None).await?;
    let ids: Vec<i64> = list.as_array().unwrap().iter().map(|a| a["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 3]);

    let (_, body) = send(&app, "POST", "/accounts/", Some(account_body("Dee"))).await?;
    assert_eq!(body["account_id"], 4);

    let (status, body) = send(&app, "GET", "/accounts/2", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Account not found"}));
    Ok(())
}

#[tokio::test]
async fn delete_unknown_account_is_not_found_and_file_untouched() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;
    send(&app, "POST", "/accounts/", Some(account_body("Ada"))).await?;
    let before = data.accounts_file().await?;

    let (status, body) = send(&app, "DELETE", "/accounts/77", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Account not found"}));

    assert_eq!(data.accounts_file().await?, before);
    let (_, list) = send(&app, "GET", "/accounts/", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);
    Ok(())
}

#[tokio::test]
async fn payments_create_list_get() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;

    let (status, body) = send(
        &app,
        "POST",
        "/payments/",
        Some(json!({"from_account_id": 1, "to_account_id": 2, "amount_in_euros": 125, "payment_date": "2024-06-01"})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Payment created successfully", "payment_id": 1}));

    let (status, body) = send(&app, "GET", "/payments/1", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "from_account_id": 1, "to_account_id": 2, "amount_in_euros": 125, "payment_date": "2024-06-01"}));

    let (_, list) = send(&app, "GET", "/payments", None).await?;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/payments/9", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Payment not found"}));

    let raw = tokio::fs::read_to_string(data.storage.payments_path()).await?;
    assert_eq!(raw, "1,1,2,125,2024-06-01\n");
    Ok(())
}

#[tokio::test]
async fn report_substitutes_unknown_names() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;
    send(&app, "POST", "/accounts/", Some(account_body("Ada"))).await?;
    send(&app, "POST", "/accounts/", Some(account_body("Bob"))).await?;
    send(&app, "POST", "/payments/", Some(json!({"from_account_id": 1, "to_account_id": 2, "amount_in_euros": 10, "payment_date": "2024-01-02"}))).await?;
    send(&app, "POST", "/payments/", Some(json!({"from_account_id": 42, "to_account_id": 2, "amount_in_euros": 20, "payment_date": "2024-01-03"}))).await?;

    let (status, report) = send(&app, "GET", "/report", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        report,
        json!([
            {"from_person_name": "Ada", "to_person_name": "Bob", "amount_in_euros": 10, "payment_date": "2024-01-02"},
            {"from_person_name": "Unknown", "to_person_name": "Bob", "amount_in_euros": 20, "payment_date": "2024-01-03"}
        ])
    );

    // deleting an account turns its side of the report into Unknown
    send(&app, "DELETE", "/accounts/2", None).await?;
    let (_, report) = send(&app, "GET", "/report", None).await?;
    assert_eq!(report[0]["to_person_name"], "Unknown");
    assert_eq!(report[0]["from_person_name"], "Ada");
    Ok(())
}

#[tokio::test]
async fn restart_reloads_same_state() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;
    for name in ["Ada", "Bob", "Cy"] {
        send(&app, "POST", "/accounts/", Some(account_body(name))).await?;
    }
    send(&app, "DELETE", "/accounts/1", None).await?;
    send(&app, "POST", "/payments/", Some(json!({"from_account_id": 2, "to_account_id": 3, "amount_in_euros": 7, "payment_date": "2023-12-31"}))).await?;
    let (_, accounts) = send(&app, "GET", "/accounts/", None).await?;
    let (_, payments) = send(&app, "GET", "/payments/", None).await?;
    drop(app);

    let restarted = data.app().await?;
    let (_, accounts_after) = send(&restarted, "GET", "/accounts/", None).await?;
    let (_, payments_after) = send(&restarted, "GET", "/payments/", None).await?;
    assert_eq!(accounts_after, accounts);
    assert_eq!(payments_after, payments);

    let (_, body) = send(&restarted, "POST", "/accounts/", Some(account_body("Dee"))).await?;
    assert_eq!(body["account_id"], 4);
    let (_, body) = send(&restarted, "POST", "/payments/", Some(json!({"from_account_id": 2, "to_account_id": 3, "amount_in_euros": 1, "payment_date": "2024-01-01"}))).await?;
    assert_eq!(body["payment_id"], 2);
    Ok(())
}

#[tokio::test]
async fn malformed_requests_are_client_errors() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;

    let (status, body) = send_raw(&app, "/accounts/", "application/json", "{not json").await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(&app, "POST", "/accounts/", Some(json!({"type": "checking", "person_name": "Ada"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/payments/", Some(json!({"from_account_id": "one", "to_account_id": 2, "amount_in_euros": 5, "payment_date": "2024-01-01"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "POST", "/payments/", Some(json!({"from_account_id": 1, "to_account_id": 2, "amount_in_euros": 5, "payment_date": "01/02/2024"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send_raw(&app, "/payments/", "text/plain", "{}").await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let (status, body) = send(&app, "GET", "/accounts/abc", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // nothing was written by any of the rejected requests
    assert_eq!(data.accounts_file().await?, "");
    let (_, body) = send(&app, "POST", "/accounts/", Some(account_body("Ada"))).await?;
    assert_eq!(body["account_id"], 1);
    Ok(())
}

#[tokio::test]
async fn comma_in_field_is_rejected() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;
    let (status, body) = send(&app, "POST", "/accounts/", Some(json!({"type": "checking", "person_name": "Ada", "address": "Main St 1, Berlin"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "address must not contain commas or line breaks");
    assert_eq!(data.accounts_file().await?, "");
    Ok(())
}

#[tokio::test]
async fn corrupt_table_refuses_to_start() -> anyhow::Result<()> {
    let data = TestData::new();
    tokio::fs::create_dir_all(&data.storage.data_dir).await?;
    tokio::fs::write(data.storage.accounts_path(), "1,checking,Ada\n").await?;
    assert!(server::build_app(&data.storage).await.is_err());
    Ok(())
}

#[tokio::test]
async fn ops_endpoints() -> anyhow::Result<()> {
    let data = TestData::new();
    let app = data.app().await?;

    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/accounts/{id}"].is_object());
    assert!(doc["paths"]["/report"]["get"].is_object());

    send(&app, "POST", "/accounts/", Some(account_body("Ada"))).await?;
    let req = Request::builder().uri("/metrics").body(Body::empty())?;
    let resp = app.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let text = String::from_utf8(axum::body::to_bytes(resp.into_body(), usize::MAX).await?.to_vec())?;
    assert!(text.contains("ledger_accounts_created_total"));
    assert!(text.contains("ledger_storage_errors_total"));
    Ok(())
}
