//! Small browser helpers shared by the views.

use js_sys::{ArrayBuffer, Uint8Array};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use crate::api::ResumeUpload;
use crate::error::ClientError;

/// Show a blocking `window.alert`.
pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

/// Read a browser `File` fully into memory.
pub async fn read_upload(file: web_sys::File) -> Result<ResumeUpload, ClientError> {
    let array_buffer: ArrayBuffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| ClientError::FileRead(format!("{:?}", e)))?
        .dyn_into()
        .map_err(|_| ClientError::FileRead("not an ArrayBuffer".to_string()))?;

    let bytes = Uint8Array::new(&array_buffer).to_vec();
    let content_type = Some(file.type_()).filter(|t| !t.is_empty());

    Ok(ResumeUpload {
        file_name: file.name(),
        content_type,
        bytes,
    })
}

/// First file of a `FileList`, if any.
pub fn first_file(files: Option<web_sys::FileList>) -> Option<web_sys::File> {
    files.and_then(|list| list.get(0))
}
