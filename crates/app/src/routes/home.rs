use crate::session::{server_error, use_session};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBriefcase, LdCalendar, LdFolder, LdShield};
use dioxus_free_icons::Icon;
use server::api::{case_count, crime_type_counts, list_cases};
use shared_types::{
    group_counts, sort_by_count_desc, sort_by_year, summarize, top_n, total_cases, CaseField,
    CaseRecord, ChartDatum,
};
use shared_ui::{
    BarChart, Button, ButtonVariant, Card, CardContent, CardHeader, LineChart, PageHeader,
    PageTitle, PieChart, StatCard,
};

const TOP_DISTRICTS: usize = 10;

/// Everything the dashboard draws, fetched together.
#[derive(Debug, Clone, PartialEq)]
struct Dashboard {
    cases: Vec<CaseRecord>,
    /// Backend crime-type counts. Empty when the endpoint had nothing.
    crime_counts: Vec<ChartDatum>,
    reported_total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
struct HomeStats {
    total: u64,
    crime_types: usize,
    districts: usize,
    years: usize,
}

impl Dashboard {
    fn stats(&self) -> HomeStats {
        let summary = summarize(&self.cases);
        HomeStats {
            total: total_cases(self.reported_total, &self.cases),
            crime_types: if self.crime_counts.is_empty() {
                summary.crime_types
            } else {
                self.crime_counts.len()
            },
            districts: summary.districts,
            years: summary.years,
        }
    }

    /// Pre-aggregated counts when present, otherwise grouped from the list.
    fn crime_type_data(&self) -> Vec<ChartDatum> {
        let mut data = if self.crime_counts.is_empty() {
            group_counts(&self.cases, CaseField::CrimeType)
        } else {
            self.crime_counts.clone()
        };
        sort_by_count_desc(&mut data);
        data
    }

    fn district_data(&self) -> Vec<ChartDatum> {
        let mut data = group_counts(&self.cases, CaseField::District);
        sort_by_count_desc(&mut data);
        top_n(data, TOP_DISTRICTS)
    }

    fn yearly_data(&self) -> Vec<ChartDatum> {
        let mut data = group_counts(&self.cases, CaseField::Year);
        sort_by_year(&mut data);
        data
    }
}

/// The case list is required. The aggregate endpoints are optional extras,
/// so their failures only cost the pre-aggregated numbers.
async fn load_dashboard() -> Result<Dashboard, ServerFnError> {
    let cases = list_cases().await?;
    let crime_counts = crime_type_counts().await.unwrap_or_else(|err| {
        tracing::warn!(error = %server_error(&err).message, "Crime type counts unavailable");
        Vec::new()
    });
    let reported_total = case_count().await.unwrap_or_else(|err| {
        tracing::warn!(error = %server_error(&err).message, "Case count unavailable");
        None
    });
    Ok(Dashboard {
        cases,
        crime_counts,
        reported_total,
    })
}

/// Dashboard page: headline numbers and three overview charts.
#[component]
pub fn Home() -> Element {
    let session = use_session();
    let mut dashboard = use_resource(load_dashboard);

    let body = match dashboard() {
        None => rsx! {
            div { class: "auth-guard-loading", p { "Loading dashboard..." } }
        },
        Some(Err(err)) => {
            let err = server_error(&err);
            tracing::error!(kind = %err.kind, error = %err.message, "Failed to load dashboard");
            rsx! {
                Card {
                    CardHeader { title: "Error" }
                    CardContent {
                        p { class: "error-text", "Failed to load dashboard data. Please try again later." }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| dashboard.restart(),
                            "Retry"
                        }
                    }
                }
            }
        }
        Some(Ok(data)) => {
            let stats = data.stats();
            rsx! {
                div { class: "stat-grid",
                    StatCard {
                        label: "Total Cases",
                        value: stats.total.to_string(),
                        tone: "blue",
                        icon: rsx! { Icon::<LdBriefcase> { icon: LdBriefcase, width: 24, height: 24 } },
                    }
                    StatCard {
                        label: "Crime Types",
                        value: stats.crime_types.to_string(),
                        tone: "red",
                        icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 24, height: 24 } },
                    }
                    StatCard {
                        label: "Districts",
                        value: stats.districts.to_string(),
                        tone: "green",
                        icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 24, height: 24 } },
                    }
                    StatCard {
                        label: "Years",
                        value: stats.years.to_string(),
                        tone: "purple",
                        icon: rsx! { Icon::<LdCalendar> { icon: LdCalendar, width: 24, height: 24 } },
                    }
                }

                div { class: "page-grid",
                    Card {
                        CardHeader { title: "Crime Distribution by Type" }
                        CardContent { PieChart { data: data.crime_type_data() } }
                    }
                    Card {
                        CardHeader { title: "Top Districts" }
                        CardContent { BarChart { data: data.district_data(), color: "#10B981" } }
                    }
                }
                Card {
                    CardHeader { title: "Cases by Year" }
                    CardContent { LineChart { data: data.yearly_data(), color: "#8B5CF6" } }
                }
            }
        }
    };

    rsx! {
        div { class: "page",
            PageHeader {
                PageTitle {
                    subtitle: format!("Welcome back, {}", session.user_name()),
                    "Crime Management Dashboard"
                }
            }
            {body}
        }
    }
}
