use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::case::{CaseField, CaseRecord};
use crate::trend::Point;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// One bar, slice or line point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartDatum {
    pub name: String,
    pub value: u64,
}

impl ChartDatum {
    pub fn new(name: impl Into<String>, value: u64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Count cases per distinct value of `key`. Missing keys count as "Unknown".
///
/// Output is in first-seen order; use one of the sort helpers for display.
pub fn group_counts_by<'a, I, F>(cases: I, key: F) -> Vec<ChartDatum>
where
    I: IntoIterator<Item = &'a CaseRecord>,
    F: Fn(&CaseRecord) -> Option<String>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<ChartDatum> = Vec::new();
    for case in cases {
        let name = key(case)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        match index.get(&name) {
            Some(&i) => out[i].value += 1,
            None => {
                index.insert(name.clone(), out.len());
                out.push(ChartDatum::new(name, 1));
            }
        }
    }
    out
}

pub fn group_counts(cases: &[CaseRecord], field: CaseField) -> Vec<ChartDatum> {
    group_counts_by(cases, |c| c.field_value(field))
}

/// Descending by count, ties broken by name.
pub fn sort_by_count_desc(data: &mut [ChartDatum]) {
    data.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
}

/// Ascending by numeric year; non-numeric names (e.g. "Unknown") go last.
pub fn sort_by_year(data: &mut [ChartDatum]) {
    data.sort_by_key(|d| (d.name.parse::<i64>().map_or(i64::MAX, |y| y), d.name.clone()));
}

/// Age-bucket order, "Unknown" last.
pub fn sort_by_age_bucket(data: &mut [ChartDatum]) {
    data.sort_by_key(|d| {
        AgeBucket::ALL
            .iter()
            .position(|b| b.label() == d.name)
            .unwrap_or(AgeBucket::ALL.len())
    });
}

pub fn top_n(mut data: Vec<ChartDatum>, n: usize) -> Vec<ChartDatum> {
    sort_by_count_desc(&mut data);
    data.truncate(n);
    data
}

// ── Age buckets ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    Under20,
    Twenties,
    Thirties,
    Forties,
    Fifties,
    SixtyPlus,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 6] = [
        AgeBucket::Under20,
        AgeBucket::Twenties,
        AgeBucket::Thirties,
        AgeBucket::Forties,
        AgeBucket::Fifties,
        AgeBucket::SixtyPlus,
    ];

    /// Ages below 18 share the first bucket.
    pub fn for_age(age: u32) -> Self {
        match age {
            0..=19 => AgeBucket::Under20,
            20..=29 => AgeBucket::Twenties,
            30..=39 => AgeBucket::Thirties,
            40..=49 => AgeBucket::Forties,
            50..=59 => AgeBucket::Fifties,
            _ => AgeBucket::SixtyPlus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Under20 => "18-19",
            AgeBucket::Twenties => "20-29",
            AgeBucket::Thirties => "30-39",
            AgeBucket::Forties => "40-49",
            AgeBucket::Fifties => "50-59",
            AgeBucket::SixtyPlus => "60+",
        }
    }
}

pub fn age_histogram(cases: &[CaseRecord]) -> Vec<ChartDatum> {
    let mut data = group_counts_by(cases, |c| {
        c.accused_age.map(|a| AgeBucket::for_age(a).label().to_string())
    });
    sort_by_age_bucket(&mut data);
    data
}

// ── Repeat offenders ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn for_count(count: u64) -> Self {
        if count >= 5 {
            RiskLevel::High
        } else if count >= 3 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatOffender {
    pub name: String,
    pub cases: u64,
    pub risk: RiskLevel,
}

pub const REPEAT_OFFENDER_LIMIT: usize = 5;

/// Accused names appearing in more than one case, most frequent first.
pub fn repeat_offenders(cases: &[CaseRecord]) -> Vec<RepeatOffender> {
    let mut counts = group_counts_by(
        cases.iter().filter(|c| c.accused_name.is_some()),
        |c| c.accused_name.clone(),
    );
    counts.retain(|d| d.value > 1);
    top_n(counts, REPEAT_OFFENDER_LIMIT)
        .into_iter()
        .map(|d| RepeatOffender {
            risk: RiskLevel::for_count(d.value),
            cases: d.value,
            name: d.name,
        })
        .collect()
}

// ── Summary ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub total: usize,
    pub districts: usize,
    pub crime_types: usize,
    pub years: usize,
    pub average_age: Option<f64>,
}

pub fn summarize(cases: &[CaseRecord]) -> CaseSummary {
    let distinct = |field: CaseField| {
        cases
            .iter()
            .filter_map(|c| c.field_value(field))
            .collect::<BTreeSet<_>>()
            .len()
    };
    let ages: Vec<u32> = cases.iter().filter_map(|c| c.accused_age).collect();
    let average_age = if ages.is_empty() {
        None
    } else {
        Some(ages.iter().map(|a| f64::from(*a)).sum::<f64>() / ages.len() as f64)
    };
    CaseSummary {
        total: cases.len(),
        districts: distinct(CaseField::District),
        crime_types: distinct(CaseField::CrimeType),
        years: distinct(CaseField::Year),
        average_age,
    }
}

/// Prefer the backend's total when it sent one.
pub fn total_cases(reported: Option<u64>, cases: &[CaseRecord]) -> u64 {
    reported.unwrap_or(cases.len() as u64)
}

/// (year, accused age) for every case that has both.
pub fn age_by_year_points(cases: &[CaseRecord]) -> Vec<Point> {
    cases
        .iter()
        .filter_map(|c| match (c.year, c.accused_age) {
            (Some(year), Some(age)) => Some(Point::new(f64::from(year), f64::from(age))),
            _ => None,
        })
        .collect()
}
