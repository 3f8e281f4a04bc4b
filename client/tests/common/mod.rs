//! In-memory stand-in for the store's HTTP endpoints.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use ablage_client::remote::RemoteStore;
use ablage_client::types::DownloadBody;
use ablage_client::{ClientError, ClientResult, FileId, FileRecord, FileUpload, ListPage, ListQuery, StoreStats, UploadAck};
use async_trait::async_trait;
use futures::channel::oneshot;

#[derive(Default)]
struct Inner {
    files: RefCell<Vec<FileRecord>>,
    next_id: Cell<i64>,
    list_queries: RefCell<Vec<ListQuery>>,
    stats_calls: Cell<usize>,
    download_calls: Cell<usize>,
    fail_list: Cell<bool>,
    fail_stats: Cell<bool>,
    fail_upload: Cell<bool>,
    list_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    stats_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    disposition: RefCell<Option<String>>,
}

/// Cloneable handle; clones share the same store.
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Rc<Inner>,
}

impl FakeStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.inner.next_id.set(1);
        store
    }

    /// Store pre-filled with `n` files named `file-01.txt`, ... (newest first).
    pub fn with_files(n: usize) -> Self {
        let store = Self::new();
        for i in 1..=n {
            store.insert(&format!("file-{:02}.txt", i), 0.5);
        }
        store
    }

    pub fn insert(&self, name: &str, size_mb: f64) -> FileId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let rec = FileRecord {
            id: FileId::from(id),
            file_name: name.to_string(),
            uploaded_date: format!("2024-05-01T10:{:02}:00", id % 60),
            size_mb,
        };
        self.inner.files.borrow_mut().insert(0, rec);
        FileId::from(id)
    }

    pub fn truncate(&self, n: usize) {
        self.inner.files.borrow_mut().truncate(n);
    }

    pub fn list_queries(&self) -> Vec<ListQuery> {
        self.inner.list_queries.borrow().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.inner.list_queries.borrow().len()
    }

    pub fn stats_calls(&self) -> usize {
        self.inner.stats_calls.get()
    }

    pub fn download_calls(&self) -> usize {
        self.inner.download_calls.get()
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.fail_list.set(fail);
    }

    pub fn fail_stats(&self, fail: bool) {
        self.inner.fail_stats.set(fail);
    }

    pub fn fail_upload(&self, fail: bool) {
        self.inner.fail_upload.set(fail);
    }

    pub fn set_disposition(&self, header: Option<&str>) {
        *self.inner.disposition.borrow_mut() = header.map(str::to_string);
    }

    /// The next list request waits until the returned sender fires.
    pub fn gate_next_list(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.list_gates.borrow_mut().push_back(rx);
        tx
    }

    pub fn gate_next_stats(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.inner.stats_gates.borrow_mut().push_back(rx);
        tx
    }

    fn current_stats(&self) -> StoreStats {
        let files = self.inner.files.borrow();
        StoreStats {
            total_files: files.len() as u64,
            total_size_mb: files.iter().map(|f| f.size_mb).sum(),
            latest_upload: files.first().map(|f| f.file_name.clone()),
            latest_upload_date: files.first().map(|f| f.uploaded_date.clone()),
        }
    }
}

#[async_trait(?Send)]
impl RemoteStore for FakeStore {
    async fn upload(&self, file: FileUpload) -> ClientResult<UploadAck> {
        if self.inner.fail_upload.get() {
            return Err(ClientError::status(500, "disk full"));
        }
        let size_mb = file.bytes.len() as f64 / (1024.0 * 1024.0);
        let id = self.insert(&file.file_name, size_mb);
        Ok(UploadAck { id, file_name: Some(file.file_name) })
    }

    async fn list_files(&self, query: &ListQuery) -> ClientResult<ListPage> {
        self.inner.list_queries.borrow_mut().push(query.clone());
        let gate = self.inner.list_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.inner.fail_list.get() {
            return Err(ClientError::Network("connection refused".into()));
        }
        let files = self.inner.files.borrow();
        let matching: Vec<FileRecord> = files
            .iter()
            .filter(|f| f.file_name.to_lowercase().contains(&query.search))
            .cloned()
            .collect();
        let per = query.items_per_page as usize;
        let start = (query.page.saturating_sub(1) as usize) * per;
        Ok(ListPage {
            total_files: matching.len() as u64,
            files: matching.into_iter().skip(start).take(per).collect(),
        })
    }

    async fn store_stats(&self) -> ClientResult<StoreStats> {
        self.inner.stats_calls.set(self.inner.stats_calls.get() + 1);
        let gate = self.inner.stats_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        if self.inner.fail_stats.get() {
            return Err(ClientError::status(503, "unavailable"));
        }
        Ok(self.current_stats())
    }

    async fn download(&self, id: &FileId) -> ClientResult<DownloadBody> {
        self.inner.download_calls.set(self.inner.download_calls.get() + 1);
        let files = self.inner.files.borrow();
        let Some(rec) = files.iter().find(|f| &f.id == id) else {
            return Err(ClientError::status(404, "not found"));
        };
        Ok(DownloadBody {
            content_disposition: self.inner.disposition.borrow().clone(),
            content_type: Some("application/octet-stream".into()),
            bytes: rec.file_name.as_bytes().to_vec(),
        })
    }
}
