//! Accounts export against a mock backend, with the written workbook read
//! back to verify sheet names, headers, and the derived unpaid sheet.

mod common;

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use calamine::{open_workbook_auto, Data, Reader};
use serde_json::json;

use lease_admin_client::{export_accounts, ApiClient, ExportError, ExportFilters};

fn accounts_router() -> Router {
    Router::new()
        .route(
            "/accounts/receivables",
            get(|| async {
                Json(json!([
                    common::receivable_row(1, "L-001", 10_000.0, "未收"),
                    common::receivable_row(2, "L-002", 8_000.0, "已收款"),
                    common::receivable_row(3, "B-003", 58_000.0, "部分收款"),
                ]))
            }),
        )
        .route(
            "/accounts/payables/unpaid",
            get(|| async { Json(json!([common::payable_row("L-001", 5_000.0, "未付款")])) }),
        )
        .route("/accounts/payables/paid", get(|| async { Json(json!([])) }))
        .route(
            "/accounts/service",
            get(|| async { Json(json!([common::service_row(1, "L-001", 1_200.0)])) }),
        )
}

#[tokio::test]
async fn export_writes_named_sheets_with_derived_unpaid_view() -> Result<()> {
    common::init_tracing();
    let (base, _log) = common::spawn_backend(accounts_router()).await;
    let client = ApiClient::with_base_url(base);
    let dir = tempfile::tempdir()?;

    let path = export_accounts(&client, &ExportFilters::default(), dir.path()).await?;
    assert!(path.exists());
    let name = path.file_name().expect("file name").to_string_lossy().into_owned();
    assert!(name.starts_with("帳款資料_"));
    assert!(name.ends_with(".xlsx"));

    let mut workbook = open_workbook_auto(&path)?;
    let names = workbook.sheet_names();
    assert!(names.contains(&"總應收帳款".to_string()));
    assert!(names.contains(&"總未收帳款".to_string()));
    assert!(names.contains(&"未出帳款".to_string()));
    assert!(names.contains(&"服務費用".to_string()));
    // The paid-payables dataset was empty, so its sheet is not written.
    assert!(!names.contains(&"已出帳款".to_string()));

    // Header row plus all three receivables.
    let all = workbook.worksheet_range("總應收帳款")?;
    assert_eq!(all.height(), 4);
    assert_eq!(all.get_value((0, 0)), Some(&Data::String("類型".into())));

    // The derived view drops the fully-paid row.
    let unpaid = workbook.worksheet_range("總未收帳款")?;
    assert_eq!(unpaid.height(), 3);
    let codes: Vec<String> = (1..unpaid.height() as u32)
        .filter_map(|row| match unpaid.get_value((row, 1)) {
            Some(Data::String(code)) => Some(code.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(codes, vec!["L-001".to_string(), "B-003".to_string()]);
    Ok(())
}

#[tokio::test]
async fn export_with_no_rows_writes_nothing() -> Result<()> {
    common::init_tracing();
    let router = Router::new()
        .route("/accounts/receivables", get(|| async { Json(json!([])) }))
        .route("/accounts/payables/unpaid", get(|| async { Json(json!([])) }))
        .route("/accounts/payables/paid", get(|| async { Json(json!([])) }))
        .route("/accounts/service", get(|| async { Json(json!([])) }));
    let (base, _log) = common::spawn_backend(router).await;
    let client = ApiClient::with_base_url(base);
    let dir = tempfile::tempdir()?;

    let result = export_accounts(&client, &ExportFilters::default(), dir.path()).await;
    assert!(matches!(result, Err(ExportError::NoRows)));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn one_failing_dataset_degrades_to_a_partial_workbook() -> Result<()> {
    common::init_tracing();
    let router = Router::new()
        .route(
            "/accounts/receivables",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "資料庫錯誤" })),
                )
            }),
        )
        .route(
            "/accounts/payables/unpaid",
            get(|| async { Json(json!([common::payable_row("L-001", 5_000.0, "未付款")])) }),
        )
        .route("/accounts/payables/paid", get(|| async { Json(json!([])) }))
        .route(
            "/accounts/service",
            get(|| async { Json(json!([common::service_row(1, "L-001", 1_200.0)])) }),
        );
    let (base, _log) = common::spawn_backend(router).await;
    let client = ApiClient::with_base_url(base);
    let dir = tempfile::tempdir()?;

    let path = export_accounts(&client, &ExportFilters::default(), dir.path()).await?;

    let workbook = open_workbook_auto(&path)?;
    let names = workbook.sheet_names();
    assert!(!names.contains(&"總應收帳款".to_string()));
    assert!(!names.contains(&"總未收帳款".to_string()));
    assert!(names.contains(&"未出帳款".to_string()));
    assert!(names.contains(&"服務費用".to_string()));
    Ok(())
}
