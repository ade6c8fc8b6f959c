//! Resume picker with drag-and-drop and browse.

use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen_futures::spawn_local;

use crate::api::ResumeUpload;
use crate::dom;

#[component]
pub fn ResumeDropZone(
    /// Name of the currently selected file, if any.
    #[prop(into)]
    selected: Signal<Option<String>>,
    /// Receives the file once it has been read into memory.
    on_file: Callback<ResumeUpload>,
) -> impl IntoView {
    let (is_over, set_is_over) = signal(false);
    let (is_loading, set_is_loading) = signal(false);
    let (read_error, set_read_error) = signal::<Option<String>>(None);
    let file_input_id = "resume-file-input";

    let load = move |file: web_sys::File| {
        set_is_loading.set(true);
        set_read_error.set(None);
        spawn_local(async move {
            match dom::read_upload(file).await {
                Ok(upload) => {
                    info!("Selected resume {} ({} bytes)", upload.file_name, upload.bytes.len());
                    on_file.run(upload);
                }
                Err(e) => {
                    warn!("Failed to read resume: {}", e);
                    set_read_error.set(Some(e.to_string()));
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        set_is_over.set(false);
        if let Some(file) = dom::first_file(ev.data_transfer().and_then(|dt| dt.files())) {
            load(file);
        }
    };

    let on_input_change = move |ev: web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        if let Some(file) = dom::first_file(input.files()) {
            load(file);
        }
    };

    view! {
        <div
            class="drop-zone"
            class:drop-zone-active=move || is_over.get()
            class:drop-zone-loading=move || is_loading.get()
            on:dragover=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                set_is_over.set(true);
            }
            on:dragleave=move |_| set_is_over.set(false)
            on:drop=on_drop
        >
            <style>{include_str!("resume_drop_zone.css")}</style>
            <Show
                when=move || is_loading.get()
                fallback=move || view! {
                    <div class="drop-zone-content">
                        <p class="drop-main">
                            {move || selected.get().unwrap_or_else(|| "Drop your resume here".to_string())}
                        </p>
                        <label for=file_input_id class="btn btn-secondary">
                            "Browse Files"
                        </label>
                        <input
                            type="file"
                            id=file_input_id
                            accept=".pdf,application/pdf"
                            style="display: none"
                            on:change=on_input_change
                        />
                        <p class="drop-formats">"PDF resumes only"</p>
                    </div>
                }
            >
                <div class="drop-zone-loading-content">
                    <div class="spinner"></div>
                    <p>"Reading file..."</p>
                </div>
            </Show>
            {move || read_error.get().map(|err| view! {
                <p class="status-text status-error">{err}</p>
            })}
        </div>
    }
}
