//! Accounts workbook export.
//!
//! Fetches every account view with the filters its tab currently holds (all
//! four concurrently; one failing dataset degrades to an empty sheet rather
//! than aborting the rest), reshapes rows into named sheets with
//! human-readable headers, and writes a timestamped workbook. The write has
//! a two-stage path: save straight to the target file, and on failure fall
//! back to in-memory serialization plus a manual write.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::{Workbook, XlsxError};
use thiserror::Error;

use shared::{
    Payable, PayablesFilter, Receivable, ReceivableStatus, ReceivablesFilter, ServiceExpense,
    ServiceFilter,
};

use crate::api::ApiClient;
use crate::present::{headers, render_rows, Cell, Column};

pub const SHEET_RECEIVABLES: &str = "總應收帳款";
pub const SHEET_UNPAID_RECEIVABLES: &str = "總未收帳款";
pub const SHEET_UNPAID_PAYABLES: &str = "未出帳款";
pub const SHEET_PAID_PAYABLES: &str = "已出帳款";
pub const SHEET_SERVICE: &str = "服務費用";

const EXPORT_LABEL: &str = "帳款資料";

#[derive(Debug, Error)]
pub enum ExportError {
    /// Nothing to write; surfaced as a warning, no file is produced.
    #[error("選定的範圍內沒有資料可匯出")]
    NoRows,

    #[error("匯出失敗：{0}")]
    Workbook(#[from] XlsxError),

    #[error("匯出失敗：{0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot of the per-tab filters taken at the moment of export.
#[derive(Debug, Clone, Default)]
pub struct ExportFilters {
    pub receivables: ReceivablesFilter,
    pub payables: PayablesFilter,
    pub service: ServiceFilter,
}

/// One named worksheet; only non-empty datasets become sheets.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

fn receivable_columns() -> Vec<Column<Receivable>> {
    vec![
        Column { header: "類型", cell: |r: &Receivable| Cell::text(r.kind.to_string()) },
        Column { header: "合約編號", cell: |r| Cell::text(r.contract_code.clone()) },
        Column { header: "客戶代碼", cell: |r| Cell::text(r.customer_code.clone()) },
        Column { header: "客戶名稱", cell: |r| Cell::text(r.customer_name.clone()) },
        Column { header: "日期", cell: |r| Cell::text(r.date.format("%Y-%m-%d").to_string()) },
        Column {
            header: "結束日期",
            cell: |r| match r.end_date {
                Some(d) => Cell::text(d.format("%Y-%m-%d").to_string()),
                None => Cell::Empty,
            },
        },
        Column { header: "金額", cell: |r| Cell::number(r.amount) },
        Column { header: "手續費", cell: |r| Cell::number(r.fee) },
        Column { header: "已收金額", cell: |r| Cell::number(r.received_amount) },
        Column { header: "應收總額", cell: |r| Cell::number(r.total_due()) },
        Column { header: "未收金額", cell: |r| Cell::number(r.outstanding()) },
        Column { header: "繳費狀況", cell: |r| Cell::text(r.payment_status.to_string()) },
    ]
}

fn payable_columns() -> Vec<Column<Payable>> {
    vec![
        Column { header: "合約編號", cell: |p: &Payable| Cell::text(p.contract_code.clone()) },
        Column { header: "類型", cell: |p| Cell::text(p.contract_type.to_string()) },
        Column { header: "客戶代碼", cell: |p| Cell::text(p.customer_code.clone()) },
        Column { header: "客戶名稱", cell: |p| Cell::text(p.customer_name.clone()) },
        Column { header: "日期", cell: |p| Cell::text(p.date.format("%Y-%m-%d").to_string()) },
        Column { header: "付款對象", cell: |p| Cell::text(p.payable_type.to_string()) },
        Column { header: "公司代碼", cell: |p| Cell::opt_text(&p.company_code) },
        Column { header: "金額", cell: |p| Cell::number(p.amount) },
        Column { header: "付款狀況", cell: |p| Cell::text(p.payment_status.to_string()) },
    ]
}

fn service_columns() -> Vec<Column<ServiceExpense>> {
    vec![
        Column { header: "合約編號", cell: |s: &ServiceExpense| Cell::text(s.contract_code.clone()) },
        Column { header: "客戶代碼", cell: |s| Cell::text(s.customer_code.clone()) },
        Column { header: "客戶名稱", cell: |s| Cell::text(s.customer_name.clone()) },
        Column { header: "服務日期", cell: |s| Cell::text(s.service_date.format("%Y-%m-%d").to_string()) },
        Column {
            header: "確認日期",
            cell: |s| match s.confirm_date {
                Some(d) => Cell::text(d.format("%Y-%m-%d").to_string()),
                None => Cell::Empty,
            },
        },
        Column { header: "服務類型", cell: |s| Cell::opt_text(&s.service_type) },
        Column { header: "維修公司代碼", cell: |s| Cell::opt_text(&s.repair_company_code) },
        Column { header: "總金額", cell: |s| Cell::number(s.total_amount) },
        Column { header: "繳費狀況", cell: |s| Cell::text(s.payment_status.to_string()) },
    ]
}

fn sheet_from<T>(name: &'static str, columns: &[Column<T>], rows: &[T]) -> Option<Sheet> {
    if rows.is_empty() {
        return None;
    }
    Some(Sheet {
        name,
        headers: headers(columns),
        rows: render_rows(columns, rows),
    })
}

fn or_empty<T>(result: Result<Vec<T>, crate::error::ApiError>, dataset: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!(dataset, error = %e, "export dataset fetch failed, continuing with empty sheet");
            Vec::new()
        }
    }
}

/// Fetch all four datasets concurrently and reshape the non-empty ones into
/// sheets. The derived unpaid sheet excludes fully-paid receivables.
pub async fn fetch_export_sheets(client: &ApiClient, filters: &ExportFilters) -> Vec<Sheet> {
    let (receivables, unpaid, paid, service) = tokio::join!(
        client.list_receivables(&filters.receivables),
        client.list_unpaid_payables(&filters.payables),
        client.list_paid_payables(&filters.payables),
        client.list_service_expenses(&filters.service),
    );
    let receivables = or_empty(receivables, "receivables");
    let unpaid = or_empty(unpaid, "unpaid payables");
    let paid = or_empty(paid, "paid payables");
    let service = or_empty(service, "service expenses");

    let outstanding: Vec<Receivable> = receivables
        .iter()
        .filter(|r| r.payment_status != ReceivableStatus::Paid)
        .cloned()
        .collect();

    let receivable_cols = receivable_columns();
    let payable_cols = payable_columns();
    let service_cols = service_columns();

    let mut sheets = Vec::new();
    sheets.extend(sheet_from(SHEET_RECEIVABLES, &receivable_cols, &receivables));
    sheets.extend(sheet_from(SHEET_UNPAID_RECEIVABLES, &receivable_cols, &outstanding));
    sheets.extend(sheet_from(SHEET_UNPAID_PAYABLES, &payable_cols, &unpaid));
    sheets.extend(sheet_from(SHEET_PAID_PAYABLES, &payable_cols, &paid));
    sheets.extend(sheet_from(SHEET_SERVICE, &service_cols, &service));
    sheets
}

/// `帳款資料_YYYYMMDD_HHmmss.xlsx`
pub fn workbook_filename(at: DateTime<Local>) -> String {
    format!("{EXPORT_LABEL}_{}.xlsx", at.format("%Y%m%d_%H%M%S"))
}

fn build_workbook(sheets: &[Sheet]) -> Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;
        for (col, header) in sheet.headers.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }
        for (row_idx, row) in sheet.rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                let (row_idx, col) = (row_idx as u32 + 1, col as u16);
                match cell {
                    Cell::Empty => {}
                    Cell::Text(t) => {
                        worksheet.write_string(row_idx, col, t)?;
                    }
                    Cell::Number(n) => {
                        worksheet.write_number(row_idx, col, *n)?;
                    }
                }
            }
        }
    }
    Ok(workbook)
}

/// Write the workbook with the two-stage fallback. No sheets means no file.
pub fn write_workbook(sheets: &[Sheet], path: &Path) -> Result<(), ExportError> {
    if sheets.is_empty() {
        tracing::warn!("no rows in any export dataset, skipping file write");
        return Err(ExportError::NoRows);
    }
    let mut workbook = build_workbook(sheets)?;
    if let Err(primary) = workbook.save(path) {
        tracing::warn!(error = %primary, "direct workbook save failed, retrying via buffer");
        let mut workbook = build_workbook(sheets)?;
        let buffer = workbook.save_to_buffer()?;
        std::fs::write(path, buffer)?;
    }
    Ok(())
}

/// Full export flow: fetch with the tab filters, write a timestamped
/// workbook into `dir`, and hand back the file path.
pub async fn export_accounts(
    client: &ApiClient,
    filters: &ExportFilters,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let sheets = fetch_export_sheets(client, filters).await;
    let path = dir.join(workbook_filename(Local::now()));
    write_workbook(&sheets, &path)?;
    tracing::info!(path = %path.display(), sheets = sheets.len(), "exported accounts workbook");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::ContractKind;

    fn receivable(status: ReceivableStatus) -> Receivable {
        Receivable {
            id: 1,
            kind: ContractKind::Leasing,
            contract_code: "L-001".into(),
            customer_code: "C001".into(),
            customer_name: "測試".into(),
            date: chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: None,
            amount: 10_000.0,
            fee: 150.0,
            received_amount: 0.0,
            payment_status: status,
        }
    }

    #[test]
    fn filename_carries_label_and_timestamp() {
        let at = Local.with_ymd_and_hms(2024, 8, 25, 14, 30, 9).unwrap();
        assert_eq!(workbook_filename(at), "帳款資料_20240825_143009.xlsx");
    }

    #[test]
    fn empty_dataset_yields_no_sheet() {
        let cols = receivable_columns();
        assert!(sheet_from(SHEET_RECEIVABLES, &cols, &[]).is_none());
    }

    #[test]
    fn receivable_sheet_includes_derived_columns() {
        let cols = receivable_columns();
        let sheet = sheet_from(SHEET_RECEIVABLES, &cols, &[receivable(ReceivableStatus::Unpaid)])
            .unwrap();
        assert!(sheet.headers.contains(&"應收總額"));
        assert!(sheet.headers.contains(&"未收金額"));
        let row = &sheet.rows[0];
        let total_idx = sheet.headers.iter().position(|h| *h == "應收總額").unwrap();
        assert_eq!(row[total_idx], Cell::Number(10_150.0));
    }

    #[test]
    fn write_refuses_when_every_sheet_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let result = write_workbook(&[], &path);
        assert!(matches!(result, Err(ExportError::NoRows)));
        assert!(!path.exists());
    }
}
