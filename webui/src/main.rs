use std::rc::Rc;

use ablage_client::list_view::ListView;
use ablage_client::stats_view::StatsView;
use ablage_client::{BrowserOptions, ClickTarget, FileBrowser, FileId, Panel, PanelState, ViewMode};
use dioxus::events::FormData;
use dioxus::prelude::*;
use web_sys::console;

mod api;
mod ui_utils;
use ui_utils::{click_element, element_rect, notify, save_file, show_toast, take_selected_file};

/// Shared handle to the page's controllers. Equality is identity, so props holding it
/// never change; components read `revision` to pick up controller state.
#[derive(Clone)]
struct Browser(Rc<FileBrowser<api::FetchStore>>);

impl PartialEq for Browser {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for Browser {
    type Target = FileBrowser<api::FetchStore>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

const UPLOAD_TRIGGER_ID: &str = "load-option";
const BROWSE_TRIGGER_ID: &str = "browse-option";
const FILE_INPUT_ID: &str = "file-input";

fn trigger_id(panel: Panel) -> &'static str {
    match panel {
        Panel::Upload => UPLOAD_TRIGGER_ID,
        Panel::Browse => BROWSE_TRIGGER_ID,
    }
}

pub fn main() {
    console_error_panic_hook::set_once();
    dioxus_web::launch::launch(app, vec![], Default::default());
}

fn app() -> Element {
    let browser = use_hook(|| Browser(Rc::new(FileBrowser::with_options(api::FetchStore, BrowserOptions::default()))));
    // The controllers own all state; this counter only tells Dioxus to re-render.
    let revision = use_signal(|| 0_u64);
    let _rev = *revision.read();

    let upload_state = browser.popovers().state(Panel::Upload);
    let browse_state = browser.popovers().state(Panel::Browse);

    let on_document_click = {
        let browser = browser.clone();
        move |_| {
            let any_open = browser.popovers().visible_count() > 0;
            if any_open && !browser.document_click(ClickTarget::elsewhere()).is_empty() {
                bump(revision);
            }
        }
    };

    rsx! {
        div { style: "min-height:100vh;", onclick: on_document_click,
            div { class: "app-header",
                div { class: "container",
                    div { class: "brand", span { "🗄 Ablage" } }
                    nav {
                        TriggerButton { browser: browser.clone(), panel: Panel::Upload, revision, label: "Load" }
                        TriggerButton { browser: browser.clone(), panel: Panel::Browse, revision, label: "Browse" }
                    }
                }
            }
            UploadPanel { browser: browser.clone(), state: upload_state, revision }
            BrowsePanel { browser: browser.clone(), state: browse_state, revision }
            // Toast container for notifications
            div { id: "toasts", class: "toast-container" }
        }
    }
}

fn bump(revision: Signal<u64>) {
    let mut revision = revision;
    *revision.write() += 1;
}

#[component]
fn TriggerButton(browser: Browser, panel: Panel, revision: Signal<u64>, label: &'static str) -> Element {
    let onclick = move |evt: Event<MouseData>| {
        evt.stop_propagation();
        let rect = element_rect(trigger_id(panel));
        let state = browser.press_trigger(panel, rect);
        bump(revision);
        if panel == Panel::Browse && state.is_visible() {
            let browser = browser.clone();
            spawn(async move {
                browser.refresh_views().await;
                bump(revision);
            });
        }
    };
    rsx! {
        button { id: trigger_id(panel), class: "btn", onclick, "{label}" }
    }
}

// Clicks inside a panel never reach the document handler; the other panel still closes.
fn inside_handler(browser: Browser, panel: Panel, revision: Signal<u64>) -> impl FnMut(Event<MouseData>) {
    move |evt: Event<MouseData>| {
        evt.stop_propagation();
        if !browser.document_click(ClickTarget::inside(panel)).is_empty() {
            bump(revision);
        }
    }
}

fn panel_style(state: PanelState) -> Option<String> {
    match state {
        PanelState::Visible { anchor } => Some(format!("position:absolute;{}", anchor.to_style())),
        PanelState::Hidden => None,
    }
}

#[component]
fn UploadPanel(browser: Browser, state: PanelState, revision: Signal<u64>) -> Element {
    let Some(style) = panel_style(state) else { return rsx! {} };

    let on_file_chosen = {
        let browser = browser.clone();
        move |_: Event<FormData>| {
            let browser = browser.clone();
            spawn(async move {
                let Some(file) = take_selected_file(FILE_INPUT_ID).await else { return };
                show_toast(&format!("Uploading {}...", file.file_name));
                let report = browser.upload(file).await;
                bump(revision);
                if !report.succeeded {
                    console::error_1(&report.notice.message.clone().into());
                }
                notify(&report.notice);
            });
        }
    };

    rsx! {
        div { id: "load-window", class: "popover panel", style: "{style}",
            onclick: inside_handler(browser.clone(), Panel::Upload, revision),
            h3 { "Upload" }
            button { id: "load-file", class: "btn btn-primary", onclick: move |_| click_element(FILE_INPUT_ID), "Load File" }
            input { id: FILE_INPUT_ID, r#type: "file", style: "display:none;", onchange: on_file_chosen }
        }
    }
}

#[component]
fn BrowsePanel(browser: Browser, state: PanelState, revision: Signal<u64>) -> Element {
    let _rev = *revision.read();
    let Some(style) = panel_style(state) else { return rsx! {} };
    let mode = browser.view_mode();
    let label = browser.toggle().label();

    let on_toggle = {
        let browser = browser.clone();
        move |_| {
            let browser = browser.clone();
            spawn(async move {
                browser.toggle_view().await;
                bump(revision);
            });
            bump(revision);
        }
    };

    let on_search = {
        let browser = browser.clone();
        move |e: Event<FormData>| {
            let term = e.value();
            let browser = browser.clone();
            spawn(async move {
                browser.search(&term).await;
                bump(revision);
            });
        }
    };

    let list_display = if mode == ViewMode::FileList { "block" } else { "none" };
    let stats_display = if mode == ViewMode::Stats { "block" } else { "none" };

    rsx! {
        div { id: "browse-window", class: "popover panel", style: "{style}",
            onclick: inside_handler(browser.clone(), Panel::Browse, revision),
            div { class: "toolbar",
                input { id: "search-input", class: "form-control", placeholder: "Search files",
                    value: "{browser.list().search_input()}", oninput: on_search }
                button { id: "toggle-view-btn", class: "btn", onclick: on_toggle, "{label}" }
            }
            // both containers stay mounted; only the inactive one is hidden
            div { id: "file-list-container", style: "display:{list_display};",
                FileList { browser: browser.clone(), view: browser.list().view(), revision }
            }
            div { id: "database-info-container", style: "display:{stats_display};",
                StatsPanel { view: browser.stats().view() }
            }
        }
    }
}

#[component]
fn FileList(browser: Browser, view: ListView, revision: Signal<u64>) -> Element {
    let download = {
        let browser = browser.clone();
        move |id: FileId| {
            let browser = browser.clone();
            spawn(async move {
                match browser.download(&id).await {
                    Ok(saved) => {
                        if let Err(e) = save_file(&saved) {
                            console::error_1(&e);
                            show_toast("Error saving file.");
                        }
                    }
                    Err(notice) => notify(&notice),
                }
            });
        }
    };

    rsx! {
        { view.loading.then(|| rsx!(span { class: "spinner", "" })) }
        { view.message.as_ref().map(|m| rsx!(p { class: "text-muted", "{m}" })) }
        div { id: "file-list",
            { view.rows.iter().map(|row| {
                let id = row.id.clone();
                let download = download.clone();
                rsx!{ div { key: "{row.id}", class: "file-item",
                    span { "{row.file_name}" }
                    span { "{row.uploaded}" }
                    span { "{row.size}" }
                    button { class: "download-btn", onclick: move |_| download(id.clone()), "Download" }
                } }
            }) }
        }
        div { id: "pagination",
            { view.pages.iter().map(|page| {
                let n = page.page;
                let class = if page.current { "btn btn-primary" } else { "btn" };
                let browser = browser.clone();
                rsx!{ button { key: "{n}", class: "{class}",
                    onclick: move |_| {
                        let browser = browser.clone();
                        spawn(async move {
                            browser.go_to_page(n).await;
                            bump(revision);
                        });
                    },
                    "{page.label}"
                } }
            }) }
        }
    }
}

#[component]
fn StatsPanel(view: StatsView) -> Element {
    rsx! {
        div { id: "database-info",
            { view.message.as_ref().map(|m| rsx!(p { class: "text-muted", "{m}" })) }
            { view.fields.as_ref().map(|f| rsx!{
                dl {
                    dt { "Total files" } dd { id: "total-files", "{f.total_files}" }
                    dt { "Total size" } dd { id: "total-size", "{f.total_size}" }
                    dt { "Latest upload" } dd { id: "latest-upload", "{f.latest_upload}" }
                    dt { "Uploaded" } dd { id: "latest-upload-date", "{f.latest_upload_date}" }
                }
            }) }
        }
    }
}
