//! Wire types shared by every consumer of the leasing back-office API.
//!
//! Everything here mirrors the backend's JSON surface: resource DTOs,
//! create/update payloads, and the per-resource list filters. The backend is
//! the source of truth for all of it; these are transient, re-fetchable
//! copies.

use serde::{Deserialize, Serialize};
use std::fmt;

use chrono::NaiveDate;

/// Contract variant. Serialized with the labels the backend emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractKind {
    #[serde(rename = "租賃")]
    Leasing,
    #[serde(rename = "買斷")]
    Buyout,
}

impl fmt::Display for ContractKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractKind::Leasing => write!(f, "租賃"),
            ContractKind::Buyout => write!(f, "買斷"),
        }
    }
}

/// Which partner a payable is owed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayableKind {
    #[serde(rename = "業務")]
    Sales,
    #[serde(rename = "維護")]
    Service,
}

impl fmt::Display for PayableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayableKind::Sales => write!(f, "業務"),
            PayableKind::Service => write!(f, "維護"),
        }
    }
}

/// Payment status for receivables and service expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceivableStatus {
    #[serde(rename = "未收")]
    Unpaid,
    #[serde(rename = "部分收款")]
    Partial,
    #[serde(rename = "已收款")]
    Paid,
}

impl fmt::Display for ReceivableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceivableStatus::Unpaid => write!(f, "未收"),
            ReceivableStatus::Partial => write!(f, "部分收款"),
            ReceivableStatus::Paid => write!(f, "已收款"),
        }
    }
}

/// Payment status for payables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayableStatus {
    #[serde(rename = "未付款")]
    Unpaid,
    #[serde(rename = "已付款")]
    Paid,
}

impl fmt::Display for PayableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayableStatus::Unpaid => write!(f, "未付款"),
            PayableStatus::Paid => write!(f, "已付款"),
        }
    }
}

/// Contract lifecycle state. Only these two states exist; transitions go
/// through the pause/resume endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractStatus {
    Active,
    Paused,
}

/// Role filter for the companies list (`?type=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyRole {
    Sales,
    Service,
}

impl CompanyRole {
    pub fn as_query_value(self) -> &'static str {
        match self {
            CompanyRole::Sales => "sales",
            CompanyRole::Service => "service",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    /// Unique business code; immutable after creation.
    pub customer_code: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep_name: Option<String>,
    pub remark: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerCreate {
    pub customer_code: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep_name: Option<String>,
    pub remark: Option<String>,
}

/// Update payload; the code travels in the path, not the body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep_name: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub company_code: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep: Option<String>,
    /// Independent role flags: a company may hold either, both, or neither.
    pub is_sales: bool,
    pub is_service: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub company_code: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep: Option<String>,
    pub is_sales: bool,
    pub is_service: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub name: String,
    pub contact_name: Option<String>,
    pub mobile: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
    pub sales_rep: Option<String>,
    pub is_sales: bool,
    pub is_service: bool,
}

/// Monthly recurring contract for leased equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasingContract {
    pub id: i64,
    pub contract_code: String,
    pub customer_code: String,
    pub customer_name: Option<String>,
    pub start_date: NaiveDate,
    pub model: Option<String>,
    pub quantity: i32,
    pub monthly_rent: Option<f64>,
    pub payment_cycle_months: i32,
    pub overprint: Option<String>,
    pub contract_months: Option<i32>,
    pub sales_company_code: Option<String>,
    pub sales_amount: Option<f64>,
    pub service_company_code: Option<String>,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
    pub sales_payment_status: PayableStatus,
    pub service_payment_status: PayableStatus,
    pub status: ContractStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Create and update share one body shape; the backend regenerates derived
/// receivables on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeasingContractPayload {
    pub contract_code: String,
    pub customer_code: String,
    pub start_date: NaiveDate,
    pub model: Option<String>,
    pub quantity: i32,
    pub monthly_rent: Option<f64>,
    pub payment_cycle_months: i32,
    pub overprint: Option<String>,
    pub contract_months: Option<i32>,
    pub sales_company_code: Option<String>,
    pub sales_amount: Option<f64>,
    pub service_company_code: Option<String>,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
}

/// One-time equipment sale contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyoutContract {
    pub id: i64,
    pub contract_code: String,
    pub customer_code: String,
    pub customer_name: Option<String>,
    pub deal_date: NaiveDate,
    pub deal_amount: Option<f64>,
    pub sales_company_code: Option<String>,
    pub sales_amount: Option<f64>,
    pub service_company_code: Option<String>,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
    pub sales_payment_status: PayableStatus,
    pub service_payment_status: PayableStatus,
    pub status: ContractStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuyoutContractPayload {
    pub contract_code: String,
    pub customer_code: String,
    pub deal_date: NaiveDate,
    pub deal_amount: Option<f64>,
    pub sales_company_code: Option<String>,
    pub sales_amount: Option<f64>,
    pub service_company_code: Option<String>,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
}

/// Body for `POST /contracts/{variant}/{code}/resume`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContract {
    pub resume_date: NaiveDate,
}

/// Receivable projection derived server-side from contracts. Read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ContractKind,
    pub contract_code: String,
    pub customer_code: String,
    pub customer_name: String,
    pub date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub amount: f64,
    pub fee: f64,
    pub received_amount: f64,
    pub payment_status: ReceivableStatus,
}

impl Receivable {
    /// Amount plus handling fee.
    pub fn total_due(&self) -> f64 {
        self.amount + self.fee
    }

    /// Still outstanding after partial payments.
    pub fn outstanding(&self) -> f64 {
        self.total_due() - self.received_amount
    }
}

/// Payable projection (commission owed to a sales or maintenance partner).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payable {
    pub contract_code: String,
    pub contract_type: ContractKind,
    pub customer_code: String,
    pub customer_name: String,
    pub date: NaiveDate,
    pub payable_type: PayableKind,
    pub company_code: Option<String>,
    pub amount: f64,
    pub payment_status: PayableStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceExpense {
    pub id: i64,
    pub contract_code: String,
    pub customer_code: String,
    pub customer_name: String,
    pub service_date: NaiveDate,
    pub confirm_date: Option<NaiveDate>,
    pub service_type: Option<String>,
    pub repair_company_code: Option<String>,
    pub total_amount: f64,
    pub payment_status: ReceivableStatus,
}

/// One dated bank transaction. Exactly one of `income`/`expense` is non-zero,
/// and a reconciled entry links to one receivable or one payable, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: i64,
    pub txn_date: NaiveDate,
    pub payer: Option<String>,
    pub expense: f64,
    pub income: f64,
    pub note: Option<String>,
    #[serde(default)]
    pub is_reconciled: bool,
    #[serde(default)]
    pub reconciled_ar_id: Option<i64>,
    #[serde(default)]
    pub reconciled_ar_type: Option<String>,
    #[serde(default)]
    pub reconciled_payable_contract_code: Option<String>,
    #[serde(default)]
    pub reconciled_payable_type: Option<PayableKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntryPayload {
    pub txn_date: NaiveDate,
    pub payer: Option<String>,
    pub expense: f64,
    pub income: f64,
    pub note: Option<String>,
}

impl LedgerEntryPayload {
    /// Money coming in. The expense side is forced to zero so the
    /// mutual-exclusion invariant holds by construction.
    pub fn income(txn_date: NaiveDate, amount: f64, payer: Option<String>, note: Option<String>) -> Self {
        Self { txn_date, payer, expense: 0.0, income: amount, note }
    }

    /// Money going out.
    pub fn expense(txn_date: NaiveDate, amount: f64, payer: Option<String>, note: Option<String>) -> Self {
        Self { txn_date, payer, expense: amount, income: 0.0, note }
    }
}

/// Error body the backend produces on failure. Anything else degrades to a
/// generic message at the call site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

fn push_text(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(v) = value {
        if !v.trim().is_empty() {
            pairs.push((key, v.clone()));
        }
    }
}

fn push_date(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<NaiveDate>) {
    if let Some(d) = value {
        pairs.push((key, d.format("%Y-%m-%d").to_string()));
    }
}

/// Free-text search over a single resource (`?search=`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchFilter {
    pub search: Option<String>,
}

impl SearchFilter {
    pub fn new(search: impl Into<String>) -> Self {
        Self { search: Some(search.into()) }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "search", &self.search);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompanyFilter {
    pub role: Option<CompanyRole>,
    pub search: Option<String>,
}

impl CompanyFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(role) = self.role {
            pairs.push(("type", role.as_query_value().to_string()));
        }
        push_text(&mut pairs, "search", &self.search);
        pairs
    }
}

/// Multi-field receivables search. All fields optional; empty fields are
/// omitted from the request, never sent as empty strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReceivablesFilter {
    pub contract_code: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub payment_status: Option<ReceivableStatus>,
    pub contract_type: Option<ContractKind>,
}

impl ReceivablesFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "contract_code", &self.contract_code);
        push_text(&mut pairs, "customer_code", &self.customer_code);
        push_text(&mut pairs, "customer_name", &self.customer_name);
        push_date(&mut pairs, "from_date", &self.from_date);
        push_date(&mut pairs, "to_date", &self.to_date);
        if let Some(status) = self.payment_status {
            pairs.push(("payment_status", status.to_string()));
        }
        if let Some(kind) = self.contract_type {
            pairs.push(("type", kind.to_string()));
        }
        pairs
    }
}

/// Shared by the unpaid and paid payables views.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayablesFilter {
    pub contract_code: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub payment_status: Option<PayableStatus>,
    pub payable_type: Option<PayableKind>,
    pub contract_type: Option<ContractKind>,
}

impl PayablesFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "contract_code", &self.contract_code);
        push_text(&mut pairs, "customer_code", &self.customer_code);
        push_text(&mut pairs, "customer_name", &self.customer_name);
        push_date(&mut pairs, "from_date", &self.from_date);
        push_date(&mut pairs, "to_date", &self.to_date);
        if let Some(status) = self.payment_status {
            pairs.push(("payment_status", status.to_string()));
        }
        if let Some(kind) = self.payable_type {
            pairs.push(("payable_type", kind.to_string()));
        }
        if let Some(kind) = self.contract_type {
            pairs.push(("contract_type", kind.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceFilter {
    pub contract_code: Option<String>,
    pub customer_code: Option<String>,
    pub customer_name: Option<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub payment_status: Option<ReceivableStatus>,
    pub service_type: Option<String>,
}

impl ServiceFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_text(&mut pairs, "contract_code", &self.contract_code);
        push_text(&mut pairs, "customer_code", &self.customer_code);
        push_text(&mut pairs, "customer_name", &self.customer_name);
        push_date(&mut pairs, "from_date", &self.from_date);
        push_date(&mut pairs, "to_date", &self.to_date);
        if let Some(status) = self.payment_status {
            pairs.push(("payment_status", status.to_string()));
        }
        push_text(&mut pairs, "service_type", &self.service_type);
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerFilter {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub search: Option<String>,
}

impl LedgerFilter {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_date(&mut pairs, "from_date", &self.from_date);
        push_date(&mut pairs, "to_date", &self.to_date);
        push_text(&mut pairs, "search", &self.search);
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filters_produce_no_query_pairs() {
        assert!(SearchFilter::default().query_pairs().is_empty());
        assert!(CompanyFilter::default().query_pairs().is_empty());
        assert!(ReceivablesFilter::default().query_pairs().is_empty());
        assert!(PayablesFilter::default().query_pairs().is_empty());
        assert!(ServiceFilter::default().query_pairs().is_empty());
        assert!(LedgerFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn blank_strings_are_omitted_not_sent_empty() {
        let filter = SearchFilter { search: Some("   ".to_string()) };
        assert!(filter.query_pairs().is_empty());

        let filter = ReceivablesFilter {
            contract_code: Some(String::new()),
            customer_name: Some("大同".to_string()),
            ..Default::default()
        };
        let pairs = filter.query_pairs();
        assert_eq!(pairs, vec![("customer_name", "大同".to_string())]);
    }

    #[test]
    fn receivables_filter_serializes_all_fields() {
        let filter = ReceivablesFilter {
            contract_code: Some("L-2024".to_string()),
            customer_code: Some("C001".to_string()),
            customer_name: Some("大同公司".to_string()),
            from_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            to_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            payment_status: Some(ReceivableStatus::Partial),
            contract_type: Some(ContractKind::Leasing),
        };
        let pairs = filter.query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("contract_code", "L-2024".to_string()),
                ("customer_code", "C001".to_string()),
                ("customer_name", "大同公司".to_string()),
                ("from_date", "2024-01-01".to_string()),
                ("to_date", "2024-12-31".to_string()),
                ("payment_status", "部分收款".to_string()),
                ("type", "租賃".to_string()),
            ]
        );
    }

    #[test]
    fn status_vocabularies_round_trip_through_json() {
        let json = serde_json::to_string(&ReceivableStatus::Paid).unwrap();
        assert_eq!(json, "\"已收款\"");
        let back: ReceivableStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ReceivableStatus::Paid);

        let json = serde_json::to_string(&PayableStatus::Unpaid).unwrap();
        assert_eq!(json, "\"未付款\"");

        let json = serde_json::to_string(&ContractStatus::Paused).unwrap();
        assert_eq!(json, "\"paused\"");

        let kind: ContractKind = serde_json::from_str("\"買斷\"").unwrap();
        assert_eq!(kind, ContractKind::Buyout);
    }

    #[test]
    fn ledger_payload_constructors_keep_sides_exclusive() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let income = LedgerEntryPayload::income(date, 12_000.0, Some("王小明".into()), None);
        assert_eq!(income.income, 12_000.0);
        assert_eq!(income.expense, 0.0);

        let expense = LedgerEntryPayload::expense(date, 3_500.0, None, Some("碳粉".into()));
        assert_eq!(expense.expense, 3_500.0);
        assert_eq!(expense.income, 0.0);
    }

    #[test]
    fn receivable_derived_amounts() {
        let r = Receivable {
            id: 1,
            kind: ContractKind::Leasing,
            contract_code: "L-001".into(),
            customer_code: "C001".into(),
            customer_name: "測試".into(),
            date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            end_date: None,
            amount: 10_000.0,
            fee: 150.0,
            received_amount: 4_000.0,
            payment_status: ReceivableStatus::Partial,
        };
        assert_eq!(r.total_due(), 10_150.0);
        assert_eq!(r.outstanding(), 6_150.0);
    }

    #[test]
    fn receivable_deserializes_backend_row() {
        let json = r#"{
            "id": 7,
            "type": "買斷",
            "contract_code": "B-009",
            "customer_code": "C042",
            "customer_name": "光華行",
            "date": "2024-06-15",
            "end_date": null,
            "amount": 58000.0,
            "fee": 0.0,
            "received_amount": 58000.0,
            "payment_status": "已收款"
        }"#;
        let r: Receivable = serde_json::from_str(json).unwrap();
        assert_eq!(r.kind, ContractKind::Buyout);
        assert_eq!(r.payment_status, ReceivableStatus::Paid);
        assert_eq!(r.date, NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    }
}
