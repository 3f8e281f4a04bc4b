use ablage_client::{Notice, Rect, SavedFile, Severity};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlInputElement, Url};

// Bounding box of an element by id (viewport coordinates), zero if missing
pub fn element_rect(id: &str) -> Rect {
    let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(id)) else {
        return Rect::default();
    };
    let r = el.get_bounding_client_rect();
    Rect { top: r.top(), left: r.left(), right: r.right(), bottom: r.bottom() }
}

// Forward a click to an element, e.g. the hidden file input
pub fn click_element(id: &str) {
    if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.get_element_by_id(id)) {
        if let Some(he) = el.dyn_ref::<web_sys::HtmlElement>() {
            he.click();
        }
    }
}

/// Reads the first selected file of an `<input type="file">` and clears the selection,
/// so picking the same file again fires another change event.
pub async fn take_selected_file(input_id: &str) -> Option<ablage_client::FileUpload> {
    let doc = web_sys::window()?.document()?;
    let input = doc.get_element_by_id(input_id)?.dyn_into::<HtmlInputElement>().ok()?;
    let file = input.files()?.get(0)?;
    let buf = JsFuture::from(file.array_buffer()).await.ok()?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    input.set_value("");
    let mut upload = ablage_client::FileUpload::new(file.name(), bytes);
    let ct = file.type_();
    if !ct.is_empty() {
        upload = upload.with_content_type(ct);
    }
    Some(upload)
}

// Show a notice: blocking ones as alert(), the rest as toast
pub fn notify(notice: &Notice) {
    match notice.severity {
        Severity::Blocking => {
            if let Some(win) = web_sys::window() {
                let _ = win.alert_with_message(&notice.message);
            }
        }
        Severity::Transient => show_toast(&notice.message),
    }
}

// Show a transient toast in the #toasts container
pub fn show_toast(message: &str) {
    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            if let Some(container) = doc.get_element_by_id("toasts") {
                if let Ok(toast) = doc.create_element("div") {
                    toast.set_class_name("toast fade-in");
                    toast.set_text_content(Some(message));
                    if container.append_child(&toast).is_err() {
                        return; // Failed to append, exit early
                    }

                    // Auto-remove after timeout
                    let container_clone = container.clone();
                    let toast_clone = toast.clone();
                    let cb = Closure::wrap(Box::new(move || {
                        let _ = container_clone.remove_child(&toast_clone);
                    }) as Box<dyn FnMut()>);
                    let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        2400,
                    );
                    cb.forget();
                }
            }
        }
    }
}

/// Hands downloaded bytes to the browser's save mechanism via an object URL.
pub fn save_file(file: &SavedFile) -> Result<(), JsValue> {
    let win = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let bytes = js_sys::Uint8Array::from(file.bytes.as_slice());
    let parts = js_sys::Array::new();
    parts.push(&bytes.buffer());
    let opts = BlobPropertyBag::new();
    opts.set_type(file.content_type.as_deref().unwrap_or("application/octet-stream"));
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
    let href = Url::create_object_url_with_blob(&blob)?;

    let a = doc.create_element("a")?;
    a.set_attribute("href", &href)?;
    a.set_attribute("download", &file.file_name)?;
    a.set_attribute("style", "display:none")?;
    if let Some(body) = doc.body() {
        body.append_child(&a)?;
        if let Some(ae) = a.dyn_ref::<web_sys::HtmlElement>() {
            ae.click();
        }
        let _ = body.remove_child(&a);
    }
    Url::revoke_object_url(&href)?;
    Ok(())
}
