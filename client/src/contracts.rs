//! Contract pause/resume helpers.
//!
//! Only two lifecycle states exist. Pausing cancels (not deletes) the
//! contract's future receivables server-side; resuming regenerates them from
//! the resume date forward. The guard keeps the transitions sequential per
//! contract: while one pause/resume is in flight, further ones for the same
//! code are refused, since backend ordering for overlapping calls is
//! undefined.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use shared::ResumeContract;

/// Client-side default for the resume date.
pub fn default_resume_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Build the resume body, defaulting to today when no date was picked.
pub fn resume_body(resume_date: Option<NaiveDate>) -> ResumeContract {
    ResumeContract {
        resume_date: resume_date.unwrap_or_else(default_resume_date),
    }
}

/// Tracks which contract codes have a pause/resume call in flight.
#[derive(Debug, Default)]
pub struct TransitionGuard {
    in_flight: HashSet<String>,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the contract for a transition. Returns `false` when one is
    /// already pending for this code; the caller must then skip the call.
    pub fn try_begin(&mut self, contract_code: &str) -> bool {
        if self.in_flight.contains(contract_code) {
            tracing::warn!(contract_code, "pause/resume already in flight, suppressed");
            return false;
        }
        self.in_flight.insert(contract_code.to_string());
        true
    }

    /// Release the contract once the backend has answered, success or not.
    pub fn finish(&mut self, contract_code: &str) {
        self.in_flight.remove(contract_code);
    }

    pub fn is_busy(&self, contract_code: &str) -> bool {
        self.in_flight.contains(contract_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_transition_for_same_contract_is_suppressed() {
        let mut guard = TransitionGuard::new();
        assert!(guard.try_begin("L-001"));
        assert!(!guard.try_begin("L-001"));
        assert!(guard.is_busy("L-001"));

        guard.finish("L-001");
        assert!(guard.try_begin("L-001"));
    }

    #[test]
    fn different_contracts_transition_independently() {
        let mut guard = TransitionGuard::new();
        assert!(guard.try_begin("L-001"));
        assert!(guard.try_begin("B-002"));
    }

    #[test]
    fn resume_body_uses_supplied_date_over_today() {
        let picked = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        assert_eq!(resume_body(Some(picked)).resume_date, picked);
        assert_eq!(resume_body(None).resume_date, default_resume_date());
    }
}
