//! Accounts page coordinator: four tabbed views over the derived account
//! projections, each with its own filter set (the two payables tabs share
//! one, as the richer search-form variant of the source does). Only the
//! active tab reloads on a filter change or tab switch; the exporter
//! snapshots every tab's current filters.

use shared::{Payable, PayablesFilter, Receivable, ReceivablesFilter, ServiceExpense, ServiceFilter};

use crate::api::ApiClient;
use crate::export::ExportFilters;
use crate::list::ListController;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountsTab {
    Receivables,
    UnpaidPayables,
    PaidPayables,
    Service,
}

#[derive(Debug)]
pub struct AccountsView {
    tab: AccountsTab,
    pub receivables: ListController<ReceivablesFilter, Receivable>,
    pub unpaid_payables: ListController<PayablesFilter, Payable>,
    pub paid_payables: ListController<PayablesFilter, Payable>,
    pub service: ListController<ServiceFilter, ServiceExpense>,
}

impl AccountsView {
    pub fn new() -> Self {
        Self {
            tab: AccountsTab::Receivables,
            receivables: ListController::default(),
            unpaid_payables: ListController::default(),
            paid_payables: ListController::default(),
            service: ListController::default(),
        }
    }

    pub fn tab(&self) -> AccountsTab {
        self.tab
    }

    /// Switch tabs, then reload the newly active view.
    pub async fn set_tab(&mut self, client: &ApiClient, tab: AccountsTab) {
        self.tab = tab;
        self.reload_active(client).await;
    }

    pub async fn set_receivables_filter(&mut self, client: &ApiClient, filter: ReceivablesFilter) {
        self.receivables.replace_filter(filter);
        if self.tab == AccountsTab::Receivables {
            self.reload_active(client).await;
        }
    }

    /// One filter set drives both payables tabs.
    pub async fn set_payables_filter(&mut self, client: &ApiClient, filter: PayablesFilter) {
        self.unpaid_payables.replace_filter(filter.clone());
        self.paid_payables.replace_filter(filter);
        if matches!(self.tab, AccountsTab::UnpaidPayables | AccountsTab::PaidPayables) {
            self.reload_active(client).await;
        }
    }

    pub async fn set_service_filter(&mut self, client: &ApiClient, filter: ServiceFilter) {
        self.service.replace_filter(filter);
        if self.tab == AccountsTab::Service {
            self.reload_active(client).await;
        }
    }

    pub async fn reload_active(&mut self, client: &ApiClient) {
        match self.tab {
            AccountsTab::Receivables => {
                let filter = self.receivables.filter().clone();
                self.receivables.load_with(client.list_receivables(&filter)).await;
            }
            AccountsTab::UnpaidPayables => {
                let filter = self.unpaid_payables.filter().clone();
                self.unpaid_payables
                    .load_with(client.list_unpaid_payables(&filter))
                    .await;
            }
            AccountsTab::PaidPayables => {
                let filter = self.paid_payables.filter().clone();
                self.paid_payables
                    .load_with(client.list_paid_payables(&filter))
                    .await;
            }
            AccountsTab::Service => {
                let filter = self.service.filter().clone();
                self.service
                    .load_with(client.list_service_expenses(&filter))
                    .await;
            }
        }
    }

    /// Snapshot of every tab's current filters for the exporter.
    pub fn export_filters(&self) -> ExportFilters {
        ExportFilters {
            receivables: self.receivables.filter().clone(),
            payables: self.unpaid_payables.filter().clone(),
            service: self.service.filter().clone(),
        }
    }
}

impl Default for AccountsView {
    fn default() -> Self {
        Self::new()
    }
}
