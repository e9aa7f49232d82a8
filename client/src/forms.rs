//! Per-resource form drafts.
//!
//! Drafts hold what the user typed (strings stay strings until submit) and
//! validate into the wire payloads. Contract drafts own the tax-markup rule:
//! [`apply_invoice_markup`] runs exactly once at submit time, and drafts
//! seeded from a stored record that already carries the markup never
//! re-apply it.

use chrono::NaiveDate;

use shared::{
    BuyoutContract, BuyoutContractPayload, Company, CompanyCreate, CompanyUpdate, Customer,
    CustomerCreate, CustomerUpdate, LeasingContract, LeasingContractPayload, LedgerEntry,
    LedgerEntryPayload,
};

use crate::editor::{Draft, ValidationErrors};

/// Tax-inclusive conversion for the "needs invoice" flag: 5% uplift on the
/// base amount, applied once at submit time, never in a render path.
pub fn apply_invoice_markup(amount: f64) -> f64 {
    amount * 1.05
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerDraft {
    pub customer_code: String,
    pub name: String,
    pub contact_name: String,
    pub mobile: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub tax_id: String,
    pub sales_rep_name: String,
    pub remark: String,
}

impl CustomerDraft {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            customer_code: customer.customer_code.clone(),
            name: customer.name.clone(),
            contact_name: customer.contact_name.clone().unwrap_or_default(),
            mobile: customer.mobile.clone().unwrap_or_default(),
            phone: customer.phone.clone().unwrap_or_default(),
            address: customer.address.clone().unwrap_or_default(),
            email: customer.email.clone().unwrap_or_default(),
            tax_id: customer.tax_id.clone().unwrap_or_default(),
            sales_rep_name: customer.sales_rep_name.clone().unwrap_or_default(),
            remark: customer.remark.clone().unwrap_or_default(),
        }
    }

    /// The update body drops the immutable code.
    pub fn to_update(&self) -> CustomerUpdate {
        CustomerUpdate {
            name: self.name.trim().to_string(),
            contact_name: non_empty(&self.contact_name),
            mobile: non_empty(&self.mobile),
            phone: non_empty(&self.phone),
            address: non_empty(&self.address),
            email: non_empty(&self.email),
            tax_id: non_empty(&self.tax_id),
            sales_rep_name: non_empty(&self.sales_rep_name),
            remark: non_empty(&self.remark),
        }
    }
}

impl Draft for CustomerDraft {
    type Payload = CustomerCreate;

    fn validate(&self) -> Result<CustomerCreate, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.customer_code.trim().is_empty() {
            errors.push("customer_code", "請輸入客戶代碼");
        }
        if self.name.trim().is_empty() {
            errors.push("name", "請輸入客戶名稱");
        }
        let update = self.to_update();
        errors.into_result(CustomerCreate {
            customer_code: self.customer_code.trim().to_string(),
            name: update.name,
            contact_name: update.contact_name,
            mobile: update.mobile,
            phone: update.phone,
            address: update.address,
            email: update.email,
            tax_id: update.tax_id,
            sales_rep_name: update.sales_rep_name,
            remark: update.remark,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompanyDraft {
    pub company_code: String,
    pub name: String,
    pub contact_name: String,
    pub mobile: String,
    pub phone: String,
    pub address: String,
    pub email: String,
    pub tax_id: String,
    pub sales_rep: String,
    pub is_sales: bool,
    pub is_service: bool,
}

impl CompanyDraft {
    pub fn from_company(company: &Company) -> Self {
        Self {
            company_code: company.company_code.clone(),
            name: company.name.clone(),
            contact_name: company.contact_name.clone().unwrap_or_default(),
            mobile: company.mobile.clone().unwrap_or_default(),
            phone: company.phone.clone().unwrap_or_default(),
            address: company.address.clone().unwrap_or_default(),
            email: company.email.clone().unwrap_or_default(),
            tax_id: company.tax_id.clone().unwrap_or_default(),
            sales_rep: company.sales_rep.clone().unwrap_or_default(),
            is_sales: company.is_sales,
            is_service: company.is_service,
        }
    }

    pub fn to_update(&self) -> CompanyUpdate {
        CompanyUpdate {
            name: self.name.trim().to_string(),
            contact_name: non_empty(&self.contact_name),
            mobile: non_empty(&self.mobile),
            phone: non_empty(&self.phone),
            address: non_empty(&self.address),
            email: non_empty(&self.email),
            tax_id: non_empty(&self.tax_id),
            sales_rep: non_empty(&self.sales_rep),
            is_sales: self.is_sales,
            is_service: self.is_service,
        }
    }
}

impl Draft for CompanyDraft {
    type Payload = CompanyCreate;

    fn validate(&self) -> Result<CompanyCreate, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.company_code.trim().is_empty() {
            errors.push("company_code", "請輸入公司代碼");
        }
        if self.name.trim().is_empty() {
            errors.push("name", "請輸入公司名稱");
        }
        let update = self.to_update();
        errors.into_result(CompanyCreate {
            company_code: self.company_code.trim().to_string(),
            name: update.name,
            contact_name: update.contact_name,
            mobile: update.mobile,
            phone: update.phone,
            address: update.address,
            email: update.email,
            tax_id: update.tax_id,
            sales_rep: update.sales_rep,
            is_sales: update.is_sales,
            is_service: update.is_service,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct LeasingContractDraft {
    pub contract_code: String,
    pub customer_code: String,
    pub start_date: Option<NaiveDate>,
    pub model: String,
    pub quantity: i32,
    pub monthly_rent: Option<f64>,
    pub payment_cycle_months: i32,
    pub overprint: String,
    pub contract_months: Option<i32>,
    pub sales_company_code: String,
    pub sales_amount: Option<f64>,
    pub service_company_code: String,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
    /// True when the draft was seeded from a record whose stored rent
    /// already includes the invoice markup; submit must not apply it again.
    pub markup_applied: bool,
}

impl LeasingContractDraft {
    pub fn new() -> Self {
        Self {
            quantity: 1,
            payment_cycle_months: 1,
            ..Default::default()
        }
    }

    pub fn from_contract(contract: &LeasingContract) -> Self {
        Self {
            contract_code: contract.contract_code.clone(),
            customer_code: contract.customer_code.clone(),
            start_date: Some(contract.start_date),
            model: contract.model.clone().unwrap_or_default(),
            quantity: contract.quantity,
            monthly_rent: contract.monthly_rent,
            payment_cycle_months: contract.payment_cycle_months,
            overprint: contract.overprint.clone().unwrap_or_default(),
            contract_months: contract.contract_months,
            sales_company_code: contract.sales_company_code.clone().unwrap_or_default(),
            sales_amount: contract.sales_amount,
            service_company_code: contract.service_company_code.clone().unwrap_or_default(),
            service_amount: contract.service_amount,
            needs_invoice: contract.needs_invoice,
            // Stored rent is already tax-inclusive when the flag was set.
            markup_applied: contract.needs_invoice,
        }
    }
}

impl Draft for LeasingContractDraft {
    type Payload = LeasingContractPayload;

    fn validate(&self) -> Result<LeasingContractPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.contract_code.trim().is_empty() {
            errors.push("contract_code", "請輸入合約編號");
        }
        if self.customer_code.trim().is_empty() {
            errors.push("customer_code", "請選擇客戶");
        }
        let start_date = match self.start_date {
            Some(d) => d,
            None => {
                errors.push("start_date", "請選擇合約起始日");
                NaiveDate::default()
            }
        };
        let monthly_rent = if self.needs_invoice && !self.markup_applied {
            self.monthly_rent.map(apply_invoice_markup)
        } else {
            self.monthly_rent
        };
        errors.into_result(LeasingContractPayload {
            contract_code: self.contract_code.trim().to_string(),
            customer_code: self.customer_code.trim().to_string(),
            start_date,
            model: non_empty(&self.model),
            quantity: self.quantity,
            monthly_rent,
            payment_cycle_months: self.payment_cycle_months,
            overprint: non_empty(&self.overprint),
            contract_months: self.contract_months,
            sales_company_code: non_empty(&self.sales_company_code),
            sales_amount: self.sales_amount,
            service_company_code: non_empty(&self.service_company_code),
            service_amount: self.service_amount,
            needs_invoice: self.needs_invoice,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct BuyoutContractDraft {
    pub contract_code: String,
    pub customer_code: String,
    pub deal_date: Option<NaiveDate>,
    pub deal_amount: Option<f64>,
    pub sales_company_code: String,
    pub sales_amount: Option<f64>,
    pub service_company_code: String,
    pub service_amount: Option<f64>,
    pub needs_invoice: bool,
    pub markup_applied: bool,
}

impl BuyoutContractDraft {
    pub fn from_contract(contract: &BuyoutContract) -> Self {
        Self {
            contract_code: contract.contract_code.clone(),
            customer_code: contract.customer_code.clone(),
            deal_date: Some(contract.deal_date),
            deal_amount: contract.deal_amount,
            sales_company_code: contract.sales_company_code.clone().unwrap_or_default(),
            sales_amount: contract.sales_amount,
            service_company_code: contract.service_company_code.clone().unwrap_or_default(),
            service_amount: contract.service_amount,
            needs_invoice: contract.needs_invoice,
            markup_applied: contract.needs_invoice,
        }
    }
}

impl Draft for BuyoutContractDraft {
    type Payload = BuyoutContractPayload;

    fn validate(&self) -> Result<BuyoutContractPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.contract_code.trim().is_empty() {
            errors.push("contract_code", "請輸入合約編號");
        }
        if self.customer_code.trim().is_empty() {
            errors.push("customer_code", "請選擇客戶");
        }
        let deal_date = match self.deal_date {
            Some(d) => d,
            None => {
                errors.push("deal_date", "請選擇成交日期");
                NaiveDate::default()
            }
        };
        let deal_amount = if self.needs_invoice && !self.markup_applied {
            self.deal_amount.map(apply_invoice_markup)
        } else {
            self.deal_amount
        };
        errors.into_result(BuyoutContractPayload {
            contract_code: self.contract_code.trim().to_string(),
            customer_code: self.customer_code.trim().to_string(),
            deal_date,
            deal_amount,
            sales_company_code: non_empty(&self.sales_company_code),
            sales_amount: self.sales_amount,
            service_company_code: non_empty(&self.service_company_code),
            service_amount: self.service_amount,
            needs_invoice: self.needs_invoice,
        })
    }
}

/// Which side of the ledger the amount lands on. The payload constructors
/// zero the other side, so both-non-zero entries cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryDirection {
    Income,
    Expense,
}

#[derive(Debug, Clone, Default)]
pub struct LedgerDraft {
    pub txn_date: Option<NaiveDate>,
    pub payer: String,
    pub direction: Option<EntryDirection>,
    pub amount: Option<f64>,
    pub note: String,
}

impl LedgerDraft {
    pub fn from_entry(entry: &LedgerEntry) -> Self {
        let (direction, amount) = if entry.income > 0.0 {
            (Some(EntryDirection::Income), Some(entry.income))
        } else {
            (Some(EntryDirection::Expense), Some(entry.expense))
        };
        Self {
            txn_date: Some(entry.txn_date),
            payer: entry.payer.clone().unwrap_or_default(),
            direction,
            amount,
            note: entry.note.clone().unwrap_or_default(),
        }
    }
}

impl Draft for LedgerDraft {
    type Payload = LedgerEntryPayload;

    fn validate(&self) -> Result<LedgerEntryPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let txn_date = match self.txn_date {
            Some(d) => d,
            None => {
                errors.push("txn_date", "請選擇日期");
                NaiveDate::default()
            }
        };
        let direction = match self.direction {
            Some(d) => d,
            None => {
                errors.push("transaction_type", "請選擇交易類型");
                EntryDirection::Income
            }
        };
        let amount = match self.amount {
            Some(a) if a > 0.0 => a,
            _ => {
                errors.push("amount", "請輸入金額");
                0.0
            }
        };
        let payer = non_empty(&self.payer);
        let note = non_empty(&self.note);
        let payload = match direction {
            EntryDirection::Income => LedgerEntryPayload::income(txn_date, amount, payer, note),
            EntryDirection::Expense => LedgerEntryPayload::expense(txn_date, amount, payer, note),
        };
        errors.into_result(payload)
    }
}
