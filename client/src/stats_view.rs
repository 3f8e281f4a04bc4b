//! Store-wide aggregates.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::format::{fmt_size_mb, fmt_timestamp_opt, NOT_AVAILABLE};
use crate::list_view::RefreshOutcome;
use crate::remote::RemoteStore;
use crate::sequence::Sequencer;
use crate::types::StoreStats;

pub const STATS_ERROR_MESSAGE: &str = "Error fetching database information. Please try again.";

/// The four display fields of the stats sub-view.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsFields {
    pub total_files: String,
    pub total_size: String,
    pub latest_upload: String,
    pub latest_upload_date: String,
}

impl From<&StoreStats> for StatsFields {
    fn from(s: &StoreStats) -> Self {
        Self {
            total_files: s.total_files.to_string(),
            total_size: fmt_size_mb(s.total_size_mb),
            latest_upload: s
                .latest_upload
                .clone()
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            latest_upload_date: fmt_timestamp_opt(s.latest_upload_date.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsView {
    pub fields: Option<StatsFields>,
    pub message: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct StatsState {
    stats: Option<StoreStats>,
    error: Option<String>,
    loading: bool,
}

pub struct StatsViewController<R> {
    remote: Rc<R>,
    state: RefCell<StatsState>,
    seq: Sequencer,
}

impl<R: RemoteStore> StatsViewController<R> {
    pub fn new(remote: Rc<R>) -> Self {
        Self { remote, state: RefCell::new(StatsState::default()), seq: Sequencer::new() }
    }

    pub fn stats(&self) -> Option<StoreStats> {
        self.state.borrow().stats.clone()
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.seq.issue();
        self.state.borrow_mut().loading = true;

        let result = self.remote.store_stats().await;
        if !self.seq.is_latest(ticket) {
            debug!("dropping stale store stats response");
            return RefreshOutcome::Stale;
        }

        let mut st = self.state.borrow_mut();
        st.loading = false;
        match result {
            Ok(stats) => {
                st.stats = Some(stats);
                st.error = None;
                RefreshOutcome::Applied
            }
            Err(e) => {
                warn!(error = %e, "fetching store stats failed");
                st.error = Some(STATS_ERROR_MESSAGE.to_string());
                RefreshOutcome::Failed
            }
        }
    }

    pub fn view(&self) -> StatsView {
        let st = self.state.borrow();
        if let Some(err) = &st.error {
            return StatsView { fields: None, message: Some(err.clone()), loading: st.loading };
        }
        StatsView { fields: st.stats.as_ref().map(StatsFields::from), message: None, loading: st.loading }
    }
}
