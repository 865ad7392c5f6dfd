use dioxus::prelude::*;
use shared_types::{current_year, form_years, CaseDraft, Gender, CRIME_TYPES};
use shared_ui::{Button, ButtonVariant, FormSelect, Input, Textarea};

const MIN_AGE: u32 = 1;
const MAX_AGE: u32 = 120;

/// First required field left blank, by label.
pub fn missing_required(draft: &CaseDraft) -> Option<&'static str> {
    [
        ("District", &draft.district),
        ("Police Station", &draft.police_station),
        ("CR Number", &draft.cr_no),
        ("Section of Law", &draft.section_of_law),
        ("Crime Type", &draft.crime_type),
        ("Accused Name", &draft.accused_name),
        ("Address", &draft.accused_address),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty())
    .map(|(label, _)| label)
}

/// Parse the age input. Out-of-range or non-numeric input is rejected.
pub fn parse_age(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|age| (MIN_AGE..=MAX_AGE).contains(age))
}

/// Case form shared by the entry page and the edit dialog.
#[component]
pub fn CaseForm(
    initial: CaseDraft,
    #[props(default = "Save Case".to_string())] submit_label: String,
    #[props(default = false)] busy: bool,
    on_submit: EventHandler<CaseDraft>,
    #[props(default)] on_cancel: Option<EventHandler<()>>,
) -> Element {
    let mut draft = use_signal(|| initial.clone());
    let mut age_input = use_signal(|| initial.accused_age.to_string());
    let mut error = use_signal(|| Option::<String>::None);

    // Keep the edited year selectable even when it predates the form range.
    let mut years = form_years(current_year());
    let selected_year = draft.read().year;
    if !years.contains(&selected_year) {
        years.push(selected_year);
    }

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(age) = parse_age(&age_input()) else {
            error.set(Some(format!("Age must be between {MIN_AGE} and {MAX_AGE}")));
            return;
        };
        draft.write().accused_age = age;
        if let Some(label) = missing_required(&draft.read()) {
            error.set(Some(format!("{label} is required")));
            return;
        }
        error.set(None);
        on_submit.call(draft());
    };

    let d = draft();

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./case_form.css") }

        form { class: "case-form", onsubmit: handle_submit,
            if let Some(err) = error() {
                div { class: "banner banner-error", "{err}" }
            }

            div { class: "case-form-grid",
                Input {
                    label: "District",
                    required: true,
                    value: d.district.clone(),
                    on_input: move |e: FormEvent| draft.write().district = e.value(),
                }
                Input {
                    label: "Police Station",
                    required: true,
                    value: d.police_station.clone(),
                    on_input: move |e: FormEvent| draft.write().police_station = e.value(),
                }
                Input {
                    label: "CR Number",
                    required: true,
                    value: d.cr_no.clone(),
                    on_input: move |e: FormEvent| draft.write().cr_no = e.value(),
                }
                Input {
                    label: "Section of Law",
                    required: true,
                    value: d.section_of_law.clone(),
                    on_input: move |e: FormEvent| draft.write().section_of_law = e.value(),
                }
                FormSelect {
                    label: "Crime Type",
                    value: d.crime_type.clone(),
                    onchange: move |e: FormEvent| draft.write().crime_type = e.value(),
                    option { value: "", "Select Crime Type" }
                    for crime in CRIME_TYPES {
                        option { key: "{crime}", value: "{crime}", "{crime}" }
                    }
                    // Records from the backend may carry a type outside the list.
                    if !d.crime_type.is_empty() && !CRIME_TYPES.contains(&d.crime_type.as_str()) {
                        option { value: "{d.crime_type}", "{d.crime_type}" }
                    }
                }
                FormSelect {
                    label: "Year",
                    value: d.year.to_string(),
                    onchange: move |e: FormEvent| {
                        if let Ok(year) = e.value().parse::<i32>() {
                            draft.write().year = year;
                        }
                    },
                    for year in years {
                        option { key: "{year}", value: "{year}", "{year}" }
                    }
                }
                Input {
                    label: "Accused Name",
                    required: true,
                    value: d.accused_name.clone(),
                    on_input: move |e: FormEvent| draft.write().accused_name = e.value(),
                }
                Input {
                    label: "Nick Name",
                    value: d.accused_nick_name.clone(),
                    on_input: move |e: FormEvent| draft.write().accused_nick_name = e.value(),
                }
                FormSelect {
                    label: "Gender",
                    value: d.accused_gender.as_str().to_string(),
                    onchange: move |e: FormEvent| {
                        draft.write().accused_gender = Gender::from_str_or_default(&e.value());
                    },
                    for gender in Gender::CHOICES {
                        option { key: "{gender.as_str()}", value: "{gender.as_str()}", "{gender.as_str()}" }
                    }
                }
                Input {
                    label: "Guardian",
                    value: d.guardian.clone(),
                    on_input: move |e: FormEvent| draft.write().guardian = e.value(),
                }
                Input {
                    label: "Age",
                    input_type: "number",
                    required: true,
                    value: age_input(),
                    on_input: move |e: FormEvent| age_input.set(e.value()),
                }
            }

            Textarea {
                label: "Address",
                value: d.accused_address.clone(),
                on_input: move |e: FormEvent| draft.write().accused_address = e.value(),
            }

            div { class: "case-form-actions",
                if let Some(cancel) = on_cancel {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| cancel.call(()),
                        "Cancel"
                    }
                }
                button {
                    r#type: "submit",
                    class: "button",
                    "data-style": "primary",
                    disabled: busy,
                    if busy { "Saving..." } else { "{submit_label}" }
                }
            }
        }
    }
}
