use crate::session::server_error;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdFolder, LdShield, LdUserCheck, LdUsers};
use dioxus_free_icons::Icon;
use server::api::list_cases;
use shared_types::{
    age_by_year_points, age_histogram, group_counts, repeat_offenders, sort_by_count_desc,
    sort_by_year, summarize, top_n, CaseField, CaseRecord, CaseSummary, ChartDatum, RiskLevel,
};
use shared_ui::{
    Badge, BadgeVariant, BarChart, Button, ButtonVariant, Card, CardContent, CardHeader,
    DataTable, DataTableBody, DataTableCell, DataTableColumn, DataTableHeader, DataTableMessage,
    DataTableRow, LineChart, PageHeader, PageTitle, PieChart, ScatterPlot, StatCard, TabBar,
    TabItem,
};

const TOP_SECTIONS: usize = 8;
const OVERVIEW: &str = "overview";
const DETAILED: &str = "detailed";

fn counts_desc(cases: &[CaseRecord], field: CaseField) -> Vec<ChartDatum> {
    let mut data = group_counts(cases, field);
    sort_by_count_desc(&mut data);
    data
}

fn yearly(cases: &[CaseRecord]) -> Vec<ChartDatum> {
    let mut data = group_counts(cases, CaseField::Year);
    sort_by_year(&mut data);
    data
}

fn risk_variant(risk: RiskLevel) -> BadgeVariant {
    match risk {
        RiskLevel::High => BadgeVariant::Destructive,
        RiskLevel::Medium => BadgeVariant::Warning,
        RiskLevel::Low => BadgeVariant::Secondary,
    }
}

/// Average age rounded for display, "-" when no case has one.
fn average_age_label(summary: &CaseSummary) -> String {
    summary
        .average_age
        .map(|age| format!("{:.0}", age.round()))
        .unwrap_or_else(|| "-".to_string())
}

/// Analytics page. Every chart is derived from the full case list.
#[component]
pub fn Analytics() -> Element {
    let mut cases = use_resource(list_cases);

    let body = match cases() {
        None => rsx! {
            div { class: "auth-guard-loading", p { "Loading analytics..." } }
        },
        Some(Err(err)) => {
            let err = server_error(&err);
            tracing::error!(kind = %err.kind, error = %err.message, "Failed to load analytics");
            rsx! {
                Card {
                    CardHeader { title: "Error" }
                    CardContent {
                        p { class: "error-text", "{err.message}" }
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| cases.restart(),
                            "Retry"
                        }
                    }
                }
            }
        }
        Some(Ok(cases)) => rsx! {
            AnalyticsBody { cases }
        },
    };

    rsx! {
        div { class: "page",
            PageHeader {
                PageTitle { "Analytics Dashboard" }
            }
            {body}
        }
    }
}

#[component]
fn AnalyticsBody(cases: Vec<CaseRecord>) -> Element {
    let summary = summarize(&cases);
    let offenders = repeat_offenders(&cases);
    let points = age_by_year_points(&cases);
    let section = use_signal(|| OVERVIEW.to_string());
    let tabs = vec![
        TabItem::new(OVERVIEW, "Overview"),
        TabItem::new(DETAILED, "Detailed Analysis"),
    ];

    rsx! {
        TabBar { tabs, active: section }

        if section() == OVERVIEW {
            div { class: "tab-panel",
                div { class: "page-grid",
                    Card {
                        CardHeader { title: "Crime Distribution by Type" }
                        CardContent { PieChart { data: counts_desc(&cases, CaseField::CrimeType) } }
                    }
                    Card {
                        CardHeader { title: "Accused Gender Distribution" }
                        CardContent { PieChart { data: group_counts(&cases, CaseField::AccusedGender) } }
                    }
                    Card {
                        CardHeader { title: "Cases by District" }
                        CardContent { BarChart { data: counts_desc(&cases, CaseField::District) } }
                    }
                    Card {
                        CardHeader { title: "Crime Trend Over Years" }
                        CardContent { LineChart { data: yearly(&cases) } }
                    }
                }
            }
        } else {
            div { class: "tab-panel",
                div { class: "page-grid",
                    Card {
                        CardHeader { title: "Cases by Police Station" }
                        CardContent {
                            BarChart { data: counts_desc(&cases, CaseField::PoliceStation), color: "#10B981" }
                        }
                    }
                    Card {
                        CardHeader { title: "Age Distribution" }
                        CardContent { BarChart { data: age_histogram(&cases), color: "#F59E0B" } }
                    }
                    Card {
                        CardHeader { title: "Cases by Section of Law" }
                        CardContent {
                            BarChart {
                                data: top_n(counts_desc(&cases, CaseField::SectionOfLaw), TOP_SECTIONS),
                                color: "#EF4444",
                            }
                        }
                    }
                    Card {
                        CardHeader {
                            title: "Accused Age by Year",
                            subtitle: "Least-squares trend".to_string(),
                        }
                        CardContent {
                            ScatterPlot {
                                points,
                                x_label: "Year",
                                y_label: "Age",
                                color: "#8B5CF6",
                                show_trend: true,
                            }
                        }
                    }
                }

                Card {
                    CardHeader {
                        title: "Top Repeat Offenders",
                        subtitle: "Individuals with multiple cases".to_string(),
                    }
                    CardContent {
                        DataTable {
                            DataTableHeader {
                                DataTableColumn { "Rank" }
                                DataTableColumn { "Accused Name" }
                                DataTableColumn { "Number of Cases" }
                                DataTableColumn { "Risk Level" }
                            }
                            DataTableBody {
                                if offenders.is_empty() {
                                    DataTableMessage { colspan: 4, "No repeat offenders found." }
                                }
                                for (rank, offender) in offenders.iter().enumerate() {
                                    DataTableRow { key: "{offender.name}",
                                        DataTableCell { "#{rank + 1}" }
                                        DataTableCell { "{offender.name}" }
                                        DataTableCell { "{offender.cases}" }
                                        DataTableCell {
                                            Badge { variant: risk_variant(offender.risk), "{offender.risk.label()}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        div { class: "stat-grid",
            StatCard {
                label: "Total Cases",
                value: summary.total.to_string(),
                tone: "blue",
                icon: rsx! { Icon::<LdUsers> { icon: LdUsers, width: 24, height: 24 } },
            }
            StatCard {
                label: "Districts",
                value: summary.districts.to_string(),
                tone: "green",
                icon: rsx! { Icon::<LdFolder> { icon: LdFolder, width: 24, height: 24 } },
            }
            StatCard {
                label: "Crime Types",
                value: summary.crime_types.to_string(),
                tone: "red",
                icon: rsx! { Icon::<LdShield> { icon: LdShield, width: 24, height: 24 } },
            }
            StatCard {
                label: "Avg. Age",
                value: average_age_label(&summary),
                tone: "purple",
                icon: rsx! { Icon::<LdUserCheck> { icon: LdUserCheck, width: 24, height: 24 } },
            }
        }
    }
}
