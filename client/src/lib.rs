//! # Ablage Client
//!
//! State and coordination logic behind the Ablage web UI: an upload popover and a
//! browse popover with a paginated, searchable file list and a store statistics view.
//! The crate has no DOM dependency; the UI crate renders the view models produced here
//! and implements [`remote::RemoteStore`] over `fetch`.
//!
//! ## Core Components
//!
//! - [`popover`]: visibility, mutual exclusion and placement of the two panels
//! - [`transfer`]: upload and download, including download file naming
//! - [`list_view`]: page and search state, file rows, pagination buttons
//! - [`stats_view`]: aggregate statistics display
//! - [`view_toggle`]: file list / stats switch of the browse panel
//! - [`browser`]: the [`FileBrowser`] coordinator owning all of the above
//!
//! Every controller guards its refreshes with a [`sequence::Sequencer`] so that an
//! older response arriving late never overwrites a newer one.

pub mod browser;
pub mod error;
pub mod format;
pub mod list_view;
pub mod popover;
pub mod remote;
pub mod sequence;
pub mod stats_view;
pub mod transfer;
pub mod types;
pub mod view_toggle;

pub use browser::{BrowserOptions, FileBrowser, Notice, Severity, UploadReport};
pub use error::{ClientError, ClientResult};
pub use list_view::{ListView, RefreshOutcome};
pub use popover::{ClickTarget, Panel, PanelState, PopoverMode, Rect};
pub use remote::RemoteStore;
pub use types::{FileId, FileRecord, FileUpload, ListPage, ListQuery, SavedFile, StoreStats, UploadAck};
pub use view_toggle::ViewMode;
