//! Coordinator that ties panels, views and transfers together.

use std::rc::Rc;

use futures::join;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::list_view::{ListViewController, RefreshOutcome};
use crate::popover::{ClickTarget, Panel, PanelState, PopoverManager, PopoverMode, Rect};
use crate::remote::RemoteStore;
use crate::stats_view::StatsViewController;
use crate::transfer::TransferClient;
use crate::types::{FileId, FileUpload, SavedFile};
use crate::view_toggle::{ViewMode, ViewToggle};

pub const UPLOAD_OK_MESSAGE: &str = "File uploaded successfully!";
pub const UPLOAD_FAILED_MESSAGE: &str = "Error uploading file. Please try again.";
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Error downloading file. Please try again.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowserOptions {
    #[serde(default)]
    pub popover_mode: PopoverMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Must be acknowledged before the user continues (an `alert`).
    Blocking,
    /// A toast that goes away on its own.
    Transient,
}

/// A user-visible message produced by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

impl Notice {
    pub fn blocking(message: impl Into<String>) -> Self {
        Self { severity: Severity::Blocking, message: message.into() }
    }

    pub fn transient(message: impl Into<String>) -> Self {
        Self { severity: Severity::Transient, message: message.into() }
    }
}

/// Outcome of [`FileBrowser::upload`].
#[derive(Debug, Clone, PartialEq)]
pub struct UploadReport {
    pub notice: Notice,
    pub succeeded: bool,
    /// List and stats refresh results; `None` when the upload failed.
    pub refreshed: Option<(RefreshOutcome, RefreshOutcome)>,
}

/// One browser page session: both popovers and their views over a single store.
pub struct FileBrowser<R> {
    popovers: PopoverManager,
    transfer: TransferClient<R>,
    list: ListViewController<R>,
    stats: StatsViewController<R>,
    toggle: ViewToggle,
}

impl<R: RemoteStore> FileBrowser<R> {
    pub fn new(remote: R) -> Self {
        Self::with_options(remote, BrowserOptions::default())
    }

    pub fn with_options(remote: R, options: BrowserOptions) -> Self {
        let remote = Rc::new(remote);
        Self {
            popovers: PopoverManager::new(options.popover_mode),
            transfer: TransferClient::new(remote.clone()),
            list: ListViewController::new(remote.clone()),
            stats: StatsViewController::new(remote),
            toggle: ViewToggle::new(),
        }
    }

    pub fn popovers(&self) -> &PopoverManager {
        &self.popovers
    }

    pub fn list(&self) -> &ListViewController<R> {
        &self.list
    }

    pub fn stats(&self) -> &StatsViewController<R> {
        &self.stats
    }

    pub fn toggle(&self) -> &ViewToggle {
        &self.toggle
    }

    pub fn view_mode(&self) -> ViewMode {
        self.toggle.mode()
    }

    /// Trigger-button click without the fetches. In exclusive mode the click also acts
    /// as an outside click for the other panel; loose mode leaves that panel alone.
    pub fn press_trigger(&self, panel: Panel, trigger: Rect) -> PanelState {
        if self.popovers.mode() == PopoverMode::Exclusive {
            self.document_click(ClickTarget::trigger(panel));
        }
        self.popovers.open(panel, trigger)
    }

    /// Trigger-button click. Opening the browse panel refreshes list and stats.
    pub async fn open_panel(&self, panel: Panel, trigger: Rect) -> PanelState {
        let state = self.press_trigger(panel, trigger);
        if panel == Panel::Browse && state.is_visible() {
            self.refresh_views().await;
        }
        state
    }

    /// Document-level click.
    pub fn document_click(&self, target: ClickTarget) -> Vec<Panel> {
        self.popovers.close_if_outside(target)
    }

    /// Switches the browse sub-view and refreshes the one that became visible.
    pub async fn toggle_view(&self) -> (ViewMode, RefreshOutcome) {
        let mode = self.toggle.toggle();
        let outcome = match mode {
            ViewMode::FileList => self.list.refresh().await,
            ViewMode::Stats => self.stats.refresh().await,
        };
        (mode, outcome)
    }

    pub async fn search(&self, term: &str) -> RefreshOutcome {
        self.list.set_search_term(term).await
    }

    pub async fn go_to_page(&self, page: u32) -> RefreshOutcome {
        self.list.set_page(page).await
    }

    /// Refreshes list and stats concurrently.
    pub async fn refresh_views(&self) -> (RefreshOutcome, RefreshOutcome) {
        join!(self.list.refresh(), self.stats.refresh())
    }

    /// Uploads `file`. On success both views are resynchronised.
    pub async fn upload(&self, file: FileUpload) -> UploadReport {
        match self.transfer.upload(file).await {
            Ok(ack) => {
                let refreshed = self.refresh_views().await;
                info!(id = %ack.id, "views refreshed after upload");
                UploadReport { notice: Notice::blocking(UPLOAD_OK_MESSAGE), succeeded: true, refreshed: Some(refreshed) }
            }
            Err(_) => UploadReport { notice: Notice::blocking(UPLOAD_FAILED_MESSAGE), succeeded: false, refreshed: None },
        }
    }

    /// Downloads a listed file. Failures leave every view as it was.
    pub async fn download(&self, id: &FileId) -> Result<SavedFile, Notice> {
        self.transfer.download(id).await.map_err(|_| Notice::transient(DOWNLOAD_FAILED_MESSAGE))
    }
}
