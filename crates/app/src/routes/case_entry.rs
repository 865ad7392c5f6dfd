use crate::routes::case_form::CaseForm;
use crate::session::server_error;
use dioxus::prelude::*;
use server::api::create_case;
use shared_types::{current_year, CaseDraft};
use shared_ui::{use_toast, Card, CardContent, CardHeader, PageHeader, PageTitle, ToastOptions};

const SUCCESS_MESSAGE: &str = "Case added successfully!";
const FAILURE_MESSAGE: &str = "Failed to add case.";
const BANNER_MS: u32 = 3000;

/// Case entry page: one form, a transient success banner.
#[component]
pub fn CaseEntry() -> Element {
    let toast = use_toast();
    let mut saving = use_signal(|| false);
    let mut show_success = use_signal(|| false);
    // Bumped after each save so the form remounts blank.
    let mut generation = use_signal(|| 0u32);

    let handle_submit = move |draft: CaseDraft| {
        spawn(async move {
            saving.set(true);
            match create_case(draft).await {
                Ok(created) => {
                    tracing::info!(id = ?created.as_ref().map(|c| c.id.clone()), "Case added");
                    show_success.set(true);
                    *generation.write() += 1;
                    saving.set(false);
                    hide_after(show_success, BANNER_MS).await;
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(kind = %err.kind, error = %err.message, "Failed to add case");
                    toast.error(FAILURE_MESSAGE.to_string(), ToastOptions::new());
                    saving.set(false);
                }
            }
        });
    };

    rsx! {
        div { class: "page",
            PageHeader {
                PageTitle { "Case Entry" }
                if show_success() {
                    div { class: "banner banner-success", "{SUCCESS_MESSAGE}" }
                }
            }

            div { class: "case-entry-body",
                Card {
                    CardHeader {
                        title: "Add New Case",
                        subtitle: "Enter case details".to_string(),
                    }
                    CardContent {
                        CaseForm {
                            key: "{generation}",
                            initial: CaseDraft::blank(current_year()),
                            submit_label: "Add Case",
                            busy: saving(),
                            on_submit: handle_submit,
                        }
                    }
                }
            }
        }
    }
}

/// Clear `flag` after `ms` milliseconds, using the browser's timer.
async fn hide_after(mut flag: Signal<bool>, ms: u32) {
    let script = format!("await new Promise(r => setTimeout(r, {ms})); return true;");
    let _ = document::eval(&script).join::<bool>().await;
    flag.set(false);
}
