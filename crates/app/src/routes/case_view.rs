use crate::routes::case_form::CaseForm;
use crate::session::{server_error, Session};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFileText, LdSearch};
use dioxus_free_icons::Icon;
use server::api::{delete_case, export_cases, list_cases, update_case};
use shared_types::{
    apply_deleted, apply_updated, clamp_page, distinct_values, page_slice, CaseDraft, CaseField, CaseQuery,
    CaseRecord, ExportFile, ExportFormat, PAGE_SIZE,
};
use shared_ui::{
    use_toast, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardHeader, ConfirmDialog, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableHeader, DataTableMessage, DataTableRow, FormSelect, Modal, PageActions, PageHeader,
    PageTitle, PaginationBar, SearchBar, ToastOptions,
};

/// Columns of the case table, before the actions column.
const TABLE_COLUMNS: [CaseField; 7] = [
    CaseField::CrNo,
    CaseField::AccusedName,
    CaseField::CrimeType,
    CaseField::Year,
    CaseField::District,
    CaseField::AccusedGender,
    CaseField::AccusedAge,
];

/// Fields shown in the details dialog, address last on its own row.
const DETAIL_FIELDS: [CaseField; 11] = [
    CaseField::District,
    CaseField::PoliceStation,
    CaseField::CrNo,
    CaseField::SectionOfLaw,
    CaseField::CrimeType,
    CaseField::Year,
    CaseField::AccusedName,
    CaseField::AccusedNickName,
    CaseField::AccusedGender,
    CaseField::AccusedAge,
    CaseField::Guardian,
];

/// "All Districts", "All Police Stations", ...
fn filter_placeholder(field: CaseField) -> String {
    match field {
        CaseField::District => "All Districts".to_string(),
        CaseField::PoliceStation => "All Police Stations".to_string(),
        CaseField::CrimeType => "All Crime Types".to_string(),
        CaseField::Year => "All Years".to_string(),
        CaseField::AccusedGender => "All Genders".to_string(),
        other => format!("All {}", other.label()),
    }
}

/// Script that hands an export to the browser as a file download.
fn download_script(file: &ExportFile) -> String {
    let href = serde_json::to_string(&file.data_url()).unwrap_or_else(|_| "\"\"".to_string());
    let name = serde_json::to_string(&file.filename).unwrap_or_else(|_| "\"export\"".to_string());
    format!(
        "(function() {{ var a = document.createElement('a'); a.href = {href}; a.download = {name}; \
         document.body.appendChild(a); a.click(); a.remove(); }})();"
    )
}

/// Case list with search, filters, pagination, row actions and exports.
#[component]
pub fn CaseView() -> Element {
    let toast = use_toast();

    let mut resource = use_resource(move || async move { list_cases().await });
    let mut cases = use_signal(Vec::<CaseRecord>::new);
    let mut load_error = use_signal(|| Option::<String>::None);

    use_effect(move || match &*resource.read() {
        Some(Ok(list)) => {
            cases.set(list.clone());
            load_error.set(None);
        }
        Some(Err(err)) => {
            let err = server_error(err);
            tracing::error!(kind = %err.kind, error = %err.message, "Failed to fetch cases");
            cases.set(Vec::new());
            load_error.set(Some("Failed to fetch case data. Please try again later.".to_string()));
        }
        None => {}
    });

    let mut query = use_signal(CaseQuery::default);
    let mut page = use_signal(|| 1usize);
    let mut show_filters = use_signal(|| false);

    // Any change to the search or filters starts over at page one.
    use_effect(move || {
        let _ = query.read();
        page.set(1);
    });

    let mut viewing = use_signal(|| Option::<CaseRecord>::None);
    let mut editing = use_signal(|| Option::<CaseRecord>::None);
    let mut deleting = use_signal(|| Option::<CaseRecord>::None);
    let mut busy = use_signal(|| false);
    let mut exporting = use_signal(|| Option::<ExportFormat>::None);

    let filtered = use_memo(move || query.read().apply(&cases.read()));

    let handle_update = move |draft: CaseDraft| {
        let Some(target) = editing() else {
            return;
        };
        spawn(async move {
            busy.set(true);
            match update_case(target.id.clone(), draft).await {
                Ok(updated) => {
                    apply_updated(&mut cases.write(), updated, &Session::now());
                    editing.set(None);
                    toast.success("Case updated".to_string(), ToastOptions::new());
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(id = %target.id, error = %err.message, "Failed to update case");
                    toast.error("Failed to update case.".to_string(), ToastOptions::new());
                }
            }
            busy.set(false);
        });
    };

    let handle_delete = move |_: MouseEvent| {
        let Some(target) = deleting() else {
            return;
        };
        spawn(async move {
            busy.set(true);
            match delete_case(target.id.clone()).await {
                Ok(()) => {
                    apply_deleted(&mut cases.write(), &target.id);
                    let remaining = query.read().apply(&cases.read()).len();
                    page.set(clamp_page(page(), remaining, PAGE_SIZE));
                    toast.success("Case deleted".to_string(), ToastOptions::new());
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(id = %target.id, error = %err.message, "Failed to delete case");
                    toast.error("Failed to delete case.".to_string(), ToastOptions::new());
                }
            }
            deleting.set(None);
            busy.set(false);
        });
    };

    let handle_export = move |format: ExportFormat| {
        let rows = filtered();
        spawn(async move {
            exporting.set(Some(format));
            match export_cases(format, rows).await {
                Ok(file) => {
                    document::eval(&download_script(&file));
                }
                Err(err) => {
                    let err = server_error(&err);
                    tracing::error!(%format, error = %err.message, "Export failed");
                    toast.error(format!("{format} export failed."), ToastOptions::new());
                }
            }
            exporting.set(None);
        });
    };

    let all = cases.read().clone();
    let visible = filtered();
    let len = visible.len();
    let rows = page_slice(&visible, page(), PAGE_SIZE).to_vec();
    let active_filters = query.read().filters.active_count();
    let column_count = TABLE_COLUMNS.len() + 1;

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./case_view.css") }

        div { class: "page",
            PageHeader {
                PageTitle { subtitle: format!("{} of {} cases", len, all.len()), "Case View" }
                PageActions {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| show_filters.toggle(),
                        "Filters"
                        if active_filters > 0 {
                            Badge { variant: BadgeVariant::Primary, "{active_filters}" }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        loading: exporting() == Some(ExportFormat::Pdf),
                        disabled: exporting().is_some(),
                        onclick: move |_| handle_export(ExportFormat::Pdf),
                        Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                        "Export PDF"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        loading: exporting() == Some(ExportFormat::Spreadsheet),
                        disabled: exporting().is_some(),
                        onclick: move |_| handle_export(ExportFormat::Spreadsheet),
                        Icon::<LdFileText> { icon: LdFileText, width: 16, height: 16 }
                        "Export Excel"
                    }
                }
            }

            Card {
                CardContent {
                    SearchBar {
                        value: query.read().search.clone(),
                        placeholder: "Search cases...",
                        on_search: move |term: String| query.write().search = term,
                    }
                }
            }

            if show_filters() {
                Card {
                    CardHeader { title: "Filters" }
                    CardContent {
                        div { class: "case-filters",
                            for field in CaseField::FILTERABLE {
                                FormSelect {
                                    key: "{field.wire_name()}",
                                    label: field.label(),
                                    value: query.read().filters.get(field).to_string(),
                                    onchange: move |e: FormEvent| query.write().filters.set(field, e.value()),
                                    option { value: "", "{filter_placeholder(field)}" }
                                    for value in distinct_values(&all, field) {
                                        option { key: "{value}", value: "{value}", "{value}" }
                                    }
                                }
                            }
                            div { class: "case-filters-clear",
                                Button {
                                    variant: ButtonVariant::Secondary,
                                    onclick: move |_| query.set(CaseQuery::default()),
                                    "Clear Filters"
                                }
                            }
                        }
                    }
                }
            }

            if let Some(err) = load_error() {
                Card {
                    CardContent {
                        p { class: "error-text", "{err}" }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| resource.restart(),
                            "Retry"
                        }
                    }
                }
            }

            Card {
                DataTable {
                    DataTableHeader {
                        for field in TABLE_COLUMNS {
                            DataTableColumn { key: "{field.wire_name()}", "{field.label()}" }
                        }
                        DataTableColumn { "Actions" }
                    }
                    DataTableBody {
                        if resource.read().is_none() {
                            DataTableMessage { colspan: column_count, "Loading cases..." }
                        } else if rows.is_empty() {
                            DataTableMessage { colspan: column_count,
                                Icon::<LdSearch> { icon: LdSearch, width: 16, height: 16 }
                                " No cases found"
                            }
                        } else {
                            for case in rows {
                                DataTableRow { key: "{case.id}",
                                    for field in TABLE_COLUMNS {
                                        DataTableCell { key: "{field.wire_name()}", "{case.field_text(field)}" }
                                    }
                                    DataTableCell {
                                        div { class: "case-row-actions",
                                            Button {
                                                variant: ButtonVariant::Outline,
                                                size: ButtonSize::Sm,
                                                onclick: {
                                                    let case = case.clone();
                                                    move |_| viewing.set(Some(case.clone()))
                                                },
                                                "View"
                                            }
                                            Button {
                                                variant: ButtonVariant::Outline,
                                                size: ButtonSize::Sm,
                                                onclick: {
                                                    let case = case.clone();
                                                    move |_| editing.set(Some(case.clone()))
                                                },
                                                "Edit"
                                            }
                                            Button {
                                                variant: ButtonVariant::Destructive,
                                                size: ButtonSize::Sm,
                                                onclick: {
                                                    let case = case.clone();
                                                    move |_| deleting.set(Some(case.clone()))
                                                },
                                                "Delete"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
                PaginationBar { len: len, page: page }
            }
        }

        Modal {
            open: viewing().is_some(),
            on_close: move |_| viewing.set(None),
            title: "Case Details",
            if let Some(case) = viewing() {
                div { class: "case-details",
                    for field in DETAIL_FIELDS {
                        div { key: "{field.wire_name()}", class: "case-detail",
                            span { class: "case-detail-label", "{field.label()}" }
                            p { class: "case-detail-value", "{case.field_text(field)}" }
                        }
                    }
                    div { class: "case-detail case-detail-wide",
                        span { class: "case-detail-label", "Address" }
                        p { class: "case-detail-value", "{case.field_text(CaseField::AccusedAddress)}" }
                    }
                }
            }
        }

        Modal {
            open: editing().is_some(),
            on_close: move |_| editing.set(None),
            title: "Edit Case",
            if let Some(case) = editing() {
                CaseForm {
                    key: "{case.id}",
                    initial: CaseDraft::from_record(&case),
                    submit_label: "Update Case",
                    busy: busy(),
                    on_submit: handle_update,
                    on_cancel: move |_| editing.set(None),
                }
            }
        }

        ConfirmDialog {
            open: deleting().is_some(),
            title: "Delete case",
            description: "Are you sure you want to delete this case?",
            busy: busy(),
            on_confirm: handle_delete,
            on_cancel: move |_| deleting.set(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_name_the_field() {
        assert_eq!(filter_placeholder(CaseField::District), "All Districts");
        assert_eq!(filter_placeholder(CaseField::AccusedGender), "All Genders");
        for field in CaseField::FILTERABLE {
            assert!(filter_placeholder(field).starts_with("All "));
        }
    }

    #[test]
    fn download_script_quotes_its_inputs() {
        let file = ExportFile {
            filename: "cases-export.pdf".into(),
            mime: "application/pdf".into(),
            base64: "JVBERi0=".into(),
        };
        let script = download_script(&file);
        assert!(script.contains(r#"a.href = "data:application/pdf;base64,JVBERi0=""#));
        assert!(script.contains(r#"a.download = "cases-export.pdf""#));
    }

    #[test]
    fn table_columns_are_distinct() {
        let mut seen = TABLE_COLUMNS.to_vec();
        seen.dedup();
        assert_eq!(seen.len(), TABLE_COLUMNS.len());
    }
}
