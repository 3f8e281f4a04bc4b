//! Wire types shared between the controllers and a [`RemoteStore`](crate::remote::RemoteStore).
//!
//! Everything here is a read-only projection of what the store returns. The client
//! never constructs a [`FileRecord`] itself outside of tests and fakes.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Fixed page size of the file list.
pub const ITEMS_PER_PAGE: u32 = 10;

/// Opaque, server-assigned file identifier.
///
/// Stores answer with either a JSON string or a JSON integer; both are kept as text so
/// the identifier round-trips into `/download/{id}` unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(String);

impl FileId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FileId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<i64> for FileId {
    fn from(n: i64) -> Self {
        Self(n.to_string())
    }
}

impl Serialize for FileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for FileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => FileId::from(n),
            RawId::Text(s) => FileId(s),
        })
    }
}

/// A stored file as listed by `GET /files`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FileRecord {
    pub id: FileId,
    pub file_name: String,
    pub uploaded_date: String,
    pub size_mb: f64,
}

/// Query sent to `GET /files`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub items_per_page: u32,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self { page: 1, items_per_page: ITEMS_PER_PAGE, search: String::new() }
    }
}

impl ListQuery {
    /// Query string for `GET /files`, including the leading `?`.
    pub fn to_query_string(&self) -> String {
        format!(
            "?page={}&items_per_page={}&search={}",
            self.page,
            self.items_per_page,
            urlencoding::encode(&self.search)
        )
    }
}

/// One page of the file list.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ListPage {
    pub files: Vec<FileRecord>,
    pub total_files: u64,
}

/// Aggregates returned by `GET /database_info`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct StoreStats {
    pub total_files: u64,
    pub total_size_mb: f64,
    #[serde(default)]
    pub latest_upload: Option<String>,
    #[serde(default)]
    pub latest_upload_date: Option<String>,
}

/// Acknowledgement of `POST /upload`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UploadAck {
    pub id: FileId,
    #[serde(default, alias = "filename")]
    pub file_name: Option<String>,
}

/// A file picked by the user, ready to be sent as the multipart field `file`.
#[derive(Debug, Clone, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: None, bytes }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// Raw body of `GET /download/{id}` as received from the store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DownloadBody {
    pub content_disposition: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A finished download, named and ready for the browser's save mechanism.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
