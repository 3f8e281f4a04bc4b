use ablage_client::remote::{paths, RemoteStore};
use ablage_client::types::DownloadBody;
use ablage_client::{ClientError, ClientResult, FileId, FileUpload, ListPage, ListQuery, StoreStats, UploadAck};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

pub const BASE: &str = ""; // use same-origin relative URLs

fn url(path: &str) -> String { format!("{}{}", BASE, path) }

fn map_net(e: reqwasm::Error) -> ClientError { ClientError::Network(e.to_string()) }

fn map_js(e: JsValue) -> ClientError { ClientError::Network(format!("{:?}", e)) }

// Prefer the backend's JSON error message, fall back to the raw body
async fn status_error(resp: reqwasm::http::Response) -> ClientError {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_else(|_| "HTTP error".into());
    let message = serde_json::from_str::<JsonValue>(&text)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message").or(Some(e)))
                .or_else(|| v.get("detail"))
                .and_then(|m| m.as_str().map(str::to_string))
        })
        .unwrap_or(text);
    ClientError::status(status, message)
}

/// [`RemoteStore`] over the browser's `fetch`.
#[derive(Debug, Clone, Default)]
pub struct FetchStore;

fn multipart(file: &FileUpload) -> Result<FormData, JsValue> {
    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());
    let opts = BlobPropertyBag::new();
    if let Some(ct) = &file.content_type {
        opts.set_type(ct);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let form = FormData::new()?;
    form.append_with_blob_and_filename("file", &blob, &file.file_name)?;
    Ok(form)
}

#[async_trait(?Send)]
impl RemoteStore for FetchStore {
    async fn upload(&self, file: FileUpload) -> ClientResult<UploadAck> {
        let form = multipart(&file).map_err(map_js)?;
        // no explicit Content-Type: the browser sets the multipart boundary
        let resp = reqwasm::http::Request::post(&url(paths::UPLOAD)).body(form).send().await.map_err(map_net)?;
        if !resp.ok() { return Err(status_error(resp).await); }
        resp.json().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn list_files(&self, query: &ListQuery) -> ClientResult<ListPage> {
        let resp = reqwasm::http::Request::get(&url(&paths::files(query))).send().await.map_err(map_net)?;
        if !resp.ok() { return Err(status_error(resp).await); }
        resp.json().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn store_stats(&self) -> ClientResult<StoreStats> {
        let resp = reqwasm::http::Request::get(&url(paths::DATABASE_INFO)).send().await.map_err(map_net)?;
        if !resp.ok() { return Err(status_error(resp).await); }
        resp.json().await.map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn download(&self, id: &FileId) -> ClientResult<DownloadBody> {
        let resp = reqwasm::http::Request::get(&url(&paths::download(id))).send().await.map_err(map_net)?;
        if !resp.ok() { return Err(status_error(resp).await); }
        let headers = resp.headers();
        let content_disposition = headers.get("content-disposition");
        let content_type = headers.get("content-type");
        let bytes = resp.binary().await.map_err(map_net)?;
        Ok(DownloadBody { content_disposition, content_type, bytes })
    }
}
