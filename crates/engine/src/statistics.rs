//! Review load statistics, derived from the full PR set on every read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::PrStatus;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub open: u64,
    pub merged: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Reviewer slots across every PR.
    pub total_assignments: u64,
    pub by_user: BTreeMap<String, u64>,
    pub by_status: StatusCounts,
}

impl Statistics {
    /// Accounts for one PR. An unknown status still counts its reviewers but
    /// stays out of the status breakdown.
    pub fn record<'a>(
        &mut self,
        status: Option<PrStatus>,
        reviewers: impl IntoIterator<Item = &'a str>,
    ) {
        for reviewer in reviewers {
            self.total_assignments += 1;
            *self.by_user.entry(reviewer.to_string()).or_default() += 1;
        }
        match status {
            Some(PrStatus::Open) => self.by_status.open += 1,
            Some(PrStatus::Merged) => self.by_status.merged += 1,
            None => {}
        }
    }
}
