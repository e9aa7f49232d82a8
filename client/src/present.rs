//! Derived-value presentation: pure formatting and aggregation, no side
//! effects and nothing cached. Tables are described by declarative column
//! lists (header plus cell closure) consumed by a generic row renderer; the
//! exporter reuses the same machinery.

use shared::{ContractStatus, LedgerEntry, PayableStatus, ReceivableStatus};

/// One table/sheet cell. Numbers stay numeric so the exporter can write
/// real number cells; display collapses empty to a dash.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn opt_text(value: &Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Cell::Text(v.clone()),
            _ => Cell::Empty,
        }
    }

    pub fn number(value: f64) -> Self {
        Cell::Number(value)
    }

    pub fn display(&self) -> String {
        match self {
            Cell::Empty => "-".to_string(),
            Cell::Text(t) => t.clone(),
            Cell::Number(n) => format_number(*n),
        }
    }
}

/// Declarative column descriptor: header text plus a cell projection.
pub struct Column<T> {
    pub header: &'static str,
    pub cell: fn(&T) -> Cell,
}

pub fn headers<T>(columns: &[Column<T>]) -> Vec<&'static str> {
    columns.iter().map(|c| c.header).collect()
}

/// Project rows through a column list. Generic table glue; every list page
/// and every export sheet goes through here.
pub fn render_rows<T>(columns: &[Column<T>], rows: &[T]) -> Vec<Vec<Cell>> {
    rows.iter()
        .map(|row| columns.iter().map(|c| (c.cell)(row)).collect())
        .collect()
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        // Separator wherever the remaining digit count is a multiple of three.
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = (value.abs() * 100.0).round() / 100.0;
    let integer = rounded.trunc() as i64;
    let fraction = ((rounded - rounded.trunc()) * 100.0).round() as i64;
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&integer.to_string()));
    if fraction != 0 {
        if fraction % 10 == 0 {
            out.push_str(&format!(".{}", fraction / 10));
        } else {
            out.push_str(&format!(".{fraction:02}"));
        }
    }
    out
}

/// Currency display: zero and absent collapse to a dash, everything else is
/// grouped thousands behind the NT$ prefix.
pub fn format_currency(value: f64) -> String {
    if value == 0.0 {
        return "-".to_string();
    }
    format!("NT$ {}", format_number(value))
}

pub fn format_currency_opt(value: Option<f64>) -> String {
    match value {
        Some(v) => format_currency(v),
        None => "-".to_string(),
    }
}

/// Fixed badge palette over the closed status vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeColor {
    Green,
    Orange,
    Red,
}

impl BadgeColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeColor::Green => "green",
            BadgeColor::Orange => "orange",
            BadgeColor::Red => "red",
        }
    }
}

pub fn receivable_status_badge(status: ReceivableStatus) -> BadgeColor {
    match status {
        ReceivableStatus::Unpaid => BadgeColor::Red,
        ReceivableStatus::Partial => BadgeColor::Orange,
        ReceivableStatus::Paid => BadgeColor::Green,
    }
}

pub fn payable_status_badge(status: PayableStatus) -> BadgeColor {
    match status {
        PayableStatus::Unpaid => BadgeColor::Red,
        PayableStatus::Paid => BadgeColor::Green,
    }
}

/// Contract status tag: label and color.
pub fn contract_status_badge(status: ContractStatus) -> (&'static str, BadgeColor) {
    match status {
        ContractStatus::Active => ("進行中", BadgeColor::Green),
        ContractStatus::Paused => ("已暫停", BadgeColor::Orange),
    }
}

/// Reconciliation column text for a ledger row: a dash while unmatched,
/// otherwise the one receivable or payable the entry was matched against.
pub fn reconciliation_display(entry: &LedgerEntry) -> String {
    if !entry.is_reconciled {
        return "-".to_string();
    }
    if let Some(id) = entry.reconciled_ar_id {
        let kind = entry.reconciled_ar_type.as_deref().unwrap_or("");
        return format!("應收帳款 #{id} ({kind})");
    }
    if let Some(code) = &entry.reconciled_payable_contract_code {
        let kind = entry
            .reconciled_payable_type
            .map(|k| k.to_string())
            .unwrap_or_default();
        return format!("合約 {code} ({kind})");
    }
    "-".to_string()
}

/// Page-level sums over the currently loaded ledger rows. Recomputed from
/// the dataset on every call, never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSummary {
    pub total_income: f64,
    pub total_expense: f64,
}

impl LedgerSummary {
    pub fn net(&self) -> f64 {
        self.total_income - self.total_expense
    }
}

pub fn summarize_ledger(entries: &[LedgerEntry]) -> LedgerSummary {
    LedgerSummary {
        total_income: entries.iter().map(|e| e.income).sum(),
        total_expense: entries.iter().map(|e| e.expense).sum(),
    }
}
