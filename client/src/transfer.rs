//! Upload and download against the store.

use std::rc::Rc;

use tracing::{error, info, warn};

use crate::error::{ClientError, ClientResult};
use crate::remote::RemoteStore;
use crate::types::{FileId, FileUpload, SavedFile, UploadAck};

/// Thin wrapper over a [`RemoteStore`] for the two byte-moving operations.
///
/// It only reports completion; refreshing the views after an upload is the caller's
/// business (see [`FileBrowser::upload`](crate::browser::FileBrowser::upload)).
pub struct TransferClient<R> {
    remote: Rc<R>,
}

impl<R: RemoteStore> TransferClient<R> {
    pub fn new(remote: Rc<R>) -> Self {
        Self { remote }
    }

    pub async fn upload(&self, file: FileUpload) -> ClientResult<UploadAck> {
        let name = file.file_name.clone();
        let size = file.bytes.len();
        match self.remote.upload(file).await {
            Ok(ack) => {
                info!(file = %name, bytes = size, id = %ack.id, "upload finished");
                Ok(ack)
            }
            Err(e) => {
                log_failure("upload", &name, &e);
                Err(e)
            }
        }
    }

    /// Downloads the file's bytes. A non-success answer from the store becomes
    /// [`ClientError::NotFound`] for that id; transport and decode failures are
    /// returned as they are.
    pub async fn download(&self, id: &FileId) -> ClientResult<SavedFile> {
        let body = match self.remote.download(id).await {
            Ok(body) => body,
            Err(e) => {
                log_failure("download", id.as_str(), &e);
                return Err(match e {
                    ClientError::Status { .. } => ClientError::NotFound(id.clone()),
                    other => other,
                });
            }
        };
        let file_name = body
            .content_disposition
            .as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| fallback_file_name(id));
        info!(%id, file = %file_name, bytes = body.bytes.len(), "download finished");
        Ok(SavedFile { file_name, content_type: body.content_type, bytes: body.bytes })
    }
}

// Transport trouble is expected now and then; anything else means the store broke its contract.
fn log_failure(op: &str, subject: &str, e: &ClientError) {
    if e.is_network() {
        warn!(op, subject, error = %e, "transfer failed");
    } else {
        error!(op, subject, error = %e, "transfer failed");
    }
}

/// Name used when the store does not send one.
pub fn fallback_file_name(id: &FileId) -> String {
    format!("file_{}", id)
}

/// Extracts the file name from a `Content-Disposition` header.
///
/// `filename*=UTF-8''...` wins over a plain `filename=`. Path components are stripped.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let mut plain: Option<String> = None;
    let mut extended: Option<String> = None;
    for part in header.split(';').map(str::trim) {
        let Some((key, value)) = part.split_once('=') else { continue };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();
        if key == "filename*" {
            let encoded = value.rsplit("''").next().unwrap_or(value);
            if let Ok(decoded) = urlencoding::decode(encoded) {
                extended = Some(decoded.into_owned());
            }
        } else if key == "filename" {
            plain = Some(value.trim_matches('"').to_string());
        }
    }
    extended
        .or(plain)
        .map(|name| name.rsplit(['/', '\\']).next().unwrap_or_default().to_string())
        .filter(|name| !name.is_empty())
}
