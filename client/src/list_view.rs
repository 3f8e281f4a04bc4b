//! Paginated, searchable file list.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::format::{fmt_size_mb, fmt_timestamp};
use crate::remote::RemoteStore;
use crate::sequence::Sequencer;
use crate::types::{FileId, FileRecord, ListQuery};

pub const LIST_ERROR_MESSAGE: &str = "Error fetching files. Please try again.";
pub const LIST_EMPTY_MESSAGE: &str = "No files found.";

/// What happened to a refresh once its response came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response was rendered.
    Applied,
    /// The request failed; an inline error is rendered.
    Failed,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale,
    /// Nothing was requested (e.g. page out of range).
    Ignored,
}

/// Number of pagination buttons for `total_files`.
pub fn total_pages(total_files: u64, items_per_page: u32) -> u32 {
    if items_per_page == 0 {
        return 0;
    }
    let per = u64::from(items_per_page);
    u32::try_from(total_files.div_ceil(per)).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileRow {
    pub id: FileId,
    pub file_name: String,
    pub uploaded: String,
    pub size: String,
}

impl From<&FileRecord> for FileRow {
    fn from(rec: &FileRecord) -> Self {
        Self {
            id: rec.id.clone(),
            file_name: rec.file_name.clone(),
            uploaded: fmt_timestamp(&rec.uploaded_date),
            size: fmt_size_mb(rec.size_mb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub page: u32,
    pub label: String,
    pub current: bool,
}

/// Render model of the list sub-view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListView {
    pub rows: Vec<FileRow>,
    pub pages: Vec<PageButton>,
    /// Inline message shown in place of the rows (error or empty result).
    pub message: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct ListState {
    files: Vec<FileRecord>,
    total_files: u64,
    error: Option<String>,
    loading: bool,
    loaded: bool,
}

pub struct ListViewController<R> {
    remote: Rc<R>,
    query: RefCell<ListQuery>,
    /// Search text as typed; the query carries its lower-cased form.
    search_input: RefCell<String>,
    state: RefCell<ListState>,
    seq: Sequencer,
}

impl<R: RemoteStore> ListViewController<R> {
    pub fn new(remote: Rc<R>) -> Self {
        Self {
            remote,
            query: RefCell::new(ListQuery::default()),
            search_input: RefCell::new(String::new()),
            state: RefCell::new(ListState::default()),
            seq: Sequencer::new(),
        }
    }

    pub fn query(&self) -> ListQuery {
        self.query.borrow().clone()
    }

    pub fn page(&self) -> u32 {
        self.query.borrow().page
    }

    pub fn search_term(&self) -> String {
        self.query.borrow().search.clone()
    }

    pub fn search_input(&self) -> String {
        self.search_input.borrow().clone()
    }

    pub fn total_files(&self) -> u64 {
        self.state.borrow().total_files
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_files(), self.query.borrow().items_per_page)
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.state.borrow().files.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    /// Searches for the lower-cased `term`, goes back to page 1 and refreshes.
    pub async fn set_search_term(&self, term: &str) -> RefreshOutcome {
        *self.search_input.borrow_mut() = term.to_string();
        {
            let mut q = self.query.borrow_mut();
            q.search = term.to_lowercase();
            q.page = 1;
        }
        self.refresh().await
    }

    /// Selects page `n` and refreshes. Pages outside `1..=total_pages` are ignored.
    pub async fn set_page(&self, n: u32) -> RefreshOutcome {
        let last = self.total_pages().max(1);
        if n == 0 || n > last {
            warn!(page = n, last, "page out of range, ignoring");
            return RefreshOutcome::Ignored;
        }
        self.query.borrow_mut().page = n;
        self.refresh().await
    }

    /// Fetches the current query and replaces the rendered page wholesale.
    pub async fn refresh(&self) -> RefreshOutcome {
        loop {
            let ticket = self.seq.issue();
            let query = self.query();
            self.state.borrow_mut().loading = true;

            let result = self.remote.list_files(&query).await;
            if !self.seq.is_latest(ticket) {
                debug!(page = query.page, search = %query.search, "dropping stale file list response");
                return RefreshOutcome::Stale;
            }

            match result {
                Ok(mut page) => {
                    let per_page = query.items_per_page as usize;
                    if page.files.len() > per_page {
                        warn!(received = page.files.len(), per_page, "store returned an oversized page, truncating");
                        page.files.truncate(per_page);
                    }
                    // The store shrank under us: refetch its last page. `page` strictly
                    // decreases on every pass, so this ends at page 1 at the latest.
                    let last = total_pages(page.total_files, query.items_per_page).max(1);
                    if query.page > last {
                        debug!(page = query.page, last, "current page beyond last page, refetching");
                        self.query.borrow_mut().page = last;
                        continue;
                    }
                    let mut st = self.state.borrow_mut();
                    st.files = page.files;
                    st.total_files = page.total_files;
                    st.error = None;
                    st.loading = false;
                    st.loaded = true;
                    return RefreshOutcome::Applied;
                }
                Err(e) => {
                    warn!(error = %e, page = query.page, "fetching file list failed");
                    let mut st = self.state.borrow_mut();
                    st.error = Some(LIST_ERROR_MESSAGE.to_string());
                    st.loading = false;
                    return RefreshOutcome::Failed;
                }
            }
        }
    }

    pub fn view(&self) -> ListView {
        let st = self.state.borrow();
        let current = self.page();
        let pages = (1..=self.total_pages())
            .map(|page| PageButton { page, label: page.to_string(), current: page == current })
            .collect();

        if let Some(err) = &st.error {
            return ListView { rows: Vec::new(), pages, message: Some(err.clone()), loading: st.loading };
        }
        let rows: Vec<FileRow> = st.files.iter().map(FileRow::from).collect();
        let message = (st.loaded && rows.is_empty()).then(|| LIST_EMPTY_MESSAGE.to_string());
        ListView { rows, pages, message, loading: st.loading }
    }
}
