//! The seam between the controllers and the store's HTTP endpoints.

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{DownloadBody, FileId, FileUpload, ListPage, ListQuery, StoreStats, UploadAck};

/// Store endpoints, one method per route:
///
/// - `POST /upload` (multipart field `file`)
/// - `GET /files?page=&items_per_page=&search=`
/// - `GET /database_info`
/// - `GET /download/{id}`
///
/// Futures are not required to be `Send`; in the browser they run on the single JS
/// thread via `spawn_local`.
#[async_trait(?Send)]
pub trait RemoteStore {
    async fn upload(&self, file: FileUpload) -> ClientResult<UploadAck>;

    async fn list_files(&self, query: &ListQuery) -> ClientResult<ListPage>;

    async fn store_stats(&self) -> ClientResult<StoreStats>;

    async fn download(&self, id: &FileId) -> ClientResult<DownloadBody>;
}

/// Relative paths of the store's routes.
pub mod paths {
    use crate::types::{FileId, ListQuery};

    pub const UPLOAD: &str = "/upload";
    pub const DATABASE_INFO: &str = "/database_info";

    pub fn files(query: &ListQuery) -> String {
        format!("/files{}", query.to_query_string())
    }

    pub fn download(id: &FileId) -> String {
        format!("/download/{}", urlencoding::encode(id.as_str()))
    }
}
