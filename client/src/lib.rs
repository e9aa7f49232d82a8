//! Administrative client for a printer-leasing back office.
//!
//! Talks to the REST backend through a typed gateway ([`api::ApiClient`]) and
//! layers the page-level state on top: filtered list controllers with
//! stale-response protection, a record editor state machine, contract
//! pause/resume guards, derived-value presentation, and the accounts
//! workbook exporter.

pub mod accounts;
pub mod api;
pub mod config;
pub mod contracts;
pub mod editor;
pub mod error;
pub mod export;
pub mod forms;
pub mod list;
pub mod present;

pub use accounts::{AccountsTab, AccountsView};
pub use api::ApiClient;
pub use editor::{Draft, EditMode, Editor, SubmitBlocked, SubmitOutcome, ValidationErrors};
pub use error::ApiError;
pub use export::{export_accounts, ExportError, ExportFilters};
pub use list::{ListController, LoadTicket};
