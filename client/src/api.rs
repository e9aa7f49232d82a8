//! Typed gateway to the backend REST service.
//!
//! One method per endpoint, no business logic. Filters are serialized by the
//! `shared` filter types; absent fields never reach the query string.

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use shared::{
    BuyoutContract, BuyoutContractPayload, Company, CompanyCreate, CompanyFilter, CompanyUpdate,
    Customer, CustomerCreate, CustomerUpdate, ErrorDetail, LeasingContract, LeasingContractPayload,
    LedgerEntry, LedgerEntryPayload, LedgerFilter, Payable, PayablesFilter, Receivable,
    ReceivablesFilter, ResumeContract, SearchFilter, ServiceExpense, ServiceFilter,
};

use crate::config;
use crate::error::ApiError;

/// REST client for the leasing back office.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Client against the configured base URL (`LEASE_ADMIN_API_URL` or the
    /// local default).
    pub fn new() -> Self {
        Self::with_base_url(config::api_base_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T, ApiError> {
        tracing::debug!(path, params = query.len(), "GET");
        let mut request = self.http.get(self.url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let response = self.http.post(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        tracing::debug!(path, "POST");
        let response = self.http.post(self.url(path)).send().await?;
        Self::read_json(response).await
    }

    async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        tracing::debug!(path, "PUT");
        let response = self.http.put(self.url(path)).json(body).send().await?;
        Self::read_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        tracing::debug!(path, "DELETE");
        let response = self.http.delete(self.url(path)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let response = Self::check(response).await?;
        Ok(response.json::<T>().await?)
    }

    /// Map non-2xx responses to `ApiError::Backend`, keeping a `{ detail }`
    /// body verbatim when the backend sent one.
    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let detail = response
            .json::<ErrorDetail>()
            .await
            .ok()
            .map(|body| body.detail);
        Err(ApiError::Backend { status, detail })
    }

    // --- customers -------------------------------------------------------

    pub async fn list_customers(&self, filter: &SearchFilter) -> Result<Vec<Customer>, ApiError> {
        self.get_json("/customers", &filter.query_pairs()).await
    }

    pub async fn get_customer(&self, code: &str) -> Result<Customer, ApiError> {
        self.get_json(&format!("/customers/{code}"), &[]).await
    }

    pub async fn create_customer(&self, payload: &CustomerCreate) -> Result<Customer, ApiError> {
        self.post_json("/customers", payload).await
    }

    pub async fn update_customer(
        &self,
        code: &str,
        payload: &CustomerUpdate,
    ) -> Result<Customer, ApiError> {
        self.put_json(&format!("/customers/{code}"), payload).await
    }

    pub async fn delete_customer(&self, code: &str) -> Result<(), ApiError> {
        self.delete(&format!("/customers/{code}")).await
    }

    // --- companies -------------------------------------------------------

    pub async fn list_companies(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ApiError> {
        self.get_json("/companies", &filter.query_pairs()).await
    }

    pub async fn get_company(&self, code: &str) -> Result<Company, ApiError> {
        self.get_json(&format!("/companies/{code}"), &[]).await
    }

    pub async fn create_company(&self, payload: &CompanyCreate) -> Result<Company, ApiError> {
        self.post_json("/companies", payload).await
    }

    pub async fn update_company(
        &self,
        code: &str,
        payload: &CompanyUpdate,
    ) -> Result<Company, ApiError> {
        self.put_json(&format!("/companies/{code}"), payload).await
    }

    pub async fn delete_company(&self, code: &str) -> Result<(), ApiError> {
        self.delete(&format!("/companies/{code}")).await
    }

    // --- contracts -------------------------------------------------------

    pub async fn list_leasing_contracts(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<LeasingContract>, ApiError> {
        self.get_json("/contracts/leasing", &filter.query_pairs()).await
    }

    pub async fn list_buyout_contracts(
        &self,
        filter: &SearchFilter,
    ) -> Result<Vec<BuyoutContract>, ApiError> {
        self.get_json("/contracts/buyout", &filter.query_pairs()).await
    }

    pub async fn create_leasing_contract(
        &self,
        payload: &LeasingContractPayload,
    ) -> Result<LeasingContract, ApiError> {
        self.post_json("/contracts/leasing", payload).await
    }

    pub async fn create_buyout_contract(
        &self,
        payload: &BuyoutContractPayload,
    ) -> Result<BuyoutContract, ApiError> {
        self.post_json("/contracts/buyout", payload).await
    }

    pub async fn update_leasing_contract(
        &self,
        code: &str,
        payload: &LeasingContractPayload,
    ) -> Result<LeasingContract, ApiError> {
        self.put_json(&format!("/contracts/leasing/{code}"), payload).await
    }

    pub async fn update_buyout_contract(
        &self,
        code: &str,
        payload: &BuyoutContractPayload,
    ) -> Result<BuyoutContract, ApiError> {
        self.put_json(&format!("/contracts/buyout/{code}"), payload).await
    }

    pub async fn delete_leasing_contract(&self, code: &str) -> Result<(), ApiError> {
        self.delete(&format!("/contracts/leasing/{code}")).await
    }

    pub async fn delete_buyout_contract(&self, code: &str) -> Result<(), ApiError> {
        self.delete(&format!("/contracts/buyout/{code}")).await
    }

    /// Pause an active contract; the backend cancels its future receivables.
    pub async fn pause_leasing_contract(&self, code: &str) -> Result<LeasingContract, ApiError> {
        self.post_empty(&format!("/contracts/leasing/{code}/pause")).await
    }

    pub async fn pause_buyout_contract(&self, code: &str) -> Result<BuyoutContract, ApiError> {
        self.post_empty(&format!("/contracts/buyout/{code}/pause")).await
    }

    /// Resume a paused contract; the backend regenerates receivables from
    /// `resume_date` forward.
    pub async fn resume_leasing_contract(
        &self,
        code: &str,
        body: &ResumeContract,
    ) -> Result<LeasingContract, ApiError> {
        self.post_json(&format!("/contracts/leasing/{code}/resume"), body).await
    }

    pub async fn resume_buyout_contract(
        &self,
        code: &str,
        body: &ResumeContract,
    ) -> Result<BuyoutContract, ApiError> {
        self.post_json(&format!("/contracts/buyout/{code}/resume"), body).await
    }

    // --- accounts --------------------------------------------------------

    pub async fn list_receivables(
        &self,
        filter: &ReceivablesFilter,
    ) -> Result<Vec<Receivable>, ApiError> {
        self.get_json("/accounts/receivables", &filter.query_pairs()).await
    }

    pub async fn list_unpaid_payables(
        &self,
        filter: &PayablesFilter,
    ) -> Result<Vec<Payable>, ApiError> {
        self.get_json("/accounts/payables/unpaid", &filter.query_pairs()).await
    }

    pub async fn list_paid_payables(
        &self,
        filter: &PayablesFilter,
    ) -> Result<Vec<Payable>, ApiError> {
        self.get_json("/accounts/payables/paid", &filter.query_pairs()).await
    }

    pub async fn list_service_expenses(
        &self,
        filter: &ServiceFilter,
    ) -> Result<Vec<ServiceExpense>, ApiError> {
        self.get_json("/accounts/service", &filter.query_pairs()).await
    }

    // --- bank ledger -----------------------------------------------------

    pub async fn list_bank_ledger(
        &self,
        filter: &LedgerFilter,
    ) -> Result<Vec<LedgerEntry>, ApiError> {
        self.get_json("/bank-ledger", &filter.query_pairs()).await
    }

    pub async fn create_ledger_entry(
        &self,
        payload: &LedgerEntryPayload,
    ) -> Result<LedgerEntry, ApiError> {
        self.post_json("/bank-ledger", payload).await
    }

    pub async fn update_ledger_entry(
        &self,
        id: i64,
        payload: &LedgerEntryPayload,
    ) -> Result<LedgerEntry, ApiError> {
        self.put_json(&format!("/bank-ledger/{id}"), payload).await
    }

    pub async fn delete_ledger_entry(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/bank-ledger/{id}")).await
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}
