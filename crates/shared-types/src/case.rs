use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::wire;

// ── Form constants ──────────────────────────────────────────────────

/// Crime types offered by the case entry form. The stored value is open.
pub const CRIME_TYPES: &[&str] = &[
    "Theft",
    "Assault",
    "Fraud",
    "Robbery",
    "Vandalism",
    "Drug Possession",
    "Domestic Violence",
    "Burglary",
    "Murder",
    "Kidnapping",
];

/// Number of years the case entry form offers, ending at the current year.
pub const FORM_YEAR_SPAN: i32 = 6;

pub const DEFAULT_ACCUSED_AGE: u32 = 18;

pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Years selectable in the case entry form, newest first.
pub fn form_years(current: i32) -> Vec<i32> {
    (0..FORM_YEAR_SPAN).map(|offset| current - offset).collect()
}

// ── Gender ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    #[serde(alias = "male", alias = "MALE")]
    Male,
    #[serde(alias = "female", alias = "FEMALE")]
    Female,
    #[serde(alias = "others", alias = "Other", alias = "other")]
    Others,
    /// Anything the backend sends that is not one of the known values.
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub const CHOICES: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Others => "Others",
            Gender::Unspecified => "",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "female" => Gender::Female,
            "others" | "other" => Gender::Others,
            _ => Gender::Male,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Case record ─────────────────────────────────────────────────────

/// A criminal case as stored by the backend.
///
/// Every field except the id may be absent on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CaseRecord {
    #[serde(alias = "_id", deserialize_with = "wire::lenient_id")]
    pub id: String,
    #[serde(
        default,
        alias = "District",
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub district: Option<String>,
    #[serde(
        rename = "Police_Station",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub police_station: Option<String>,
    #[serde(
        rename = "CR_NO",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub cr_no: Option<String>,
    #[serde(
        rename = "Section_of_law",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub section_of_law: Option<String>,
    #[serde(
        rename = "Crime_type",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub crime_type: Option<String>,
    #[serde(
        rename = "Year",
        default,
        deserialize_with = "wire::lenient_opt_i32",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<i32>,
    #[serde(
        rename = "Accused_Name",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub accused_name: Option<String>,
    #[serde(
        rename = "Accused_Nick_Name",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub accused_nick_name: Option<String>,
    #[serde(rename = "Accused_Gender", default, skip_serializing_if = "Option::is_none")]
    pub accused_gender: Option<Gender>,
    #[serde(
        rename = "Guardian",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub guardian: Option<String>,
    #[serde(
        rename = "Accused_Age",
        default,
        deserialize_with = "wire::lenient_opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub accused_age: Option<u32>,
    #[serde(
        rename = "Accused_Address",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub accused_address: Option<String>,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "wire::lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

/// Addressable case fields, used by filters, grouping and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseField {
    Id,
    District,
    PoliceStation,
    CrNo,
    SectionOfLaw,
    CrimeType,
    Year,
    AccusedName,
    AccusedNickName,
    AccusedGender,
    Guardian,
    AccusedAge,
    AccusedAddress,
    CreatedAt,
    UpdatedAt,
}

impl CaseField {
    pub const ALL: [CaseField; 15] = [
        CaseField::Id,
        CaseField::District,
        CaseField::PoliceStation,
        CaseField::CrNo,
        CaseField::SectionOfLaw,
        CaseField::CrimeType,
        CaseField::Year,
        CaseField::AccusedName,
        CaseField::AccusedNickName,
        CaseField::AccusedGender,
        CaseField::Guardian,
        CaseField::AccusedAge,
        CaseField::AccusedAddress,
        CaseField::CreatedAt,
        CaseField::UpdatedAt,
    ];

    /// Fields the case view exposes as dropdown filters.
    pub const FILTERABLE: [CaseField; 5] = [
        CaseField::District,
        CaseField::PoliceStation,
        CaseField::CrimeType,
        CaseField::Year,
        CaseField::AccusedGender,
    ];

    pub fn wire_name(&self) -> &'static str {
        match self {
            CaseField::Id => "id",
            CaseField::District => "district",
            CaseField::PoliceStation => "Police_Station",
            CaseField::CrNo => "CR_NO",
            CaseField::SectionOfLaw => "Section_of_law",
            CaseField::CrimeType => "Crime_type",
            CaseField::Year => "Year",
            CaseField::AccusedName => "Accused_Name",
            CaseField::AccusedNickName => "Accused_Nick_Name",
            CaseField::AccusedGender => "Accused_Gender",
            CaseField::Guardian => "Guardian",
            CaseField::AccusedAge => "Accused_Age",
            CaseField::AccusedAddress => "Accused_Address",
            CaseField::CreatedAt => "createdAt",
            CaseField::UpdatedAt => "updatedAt",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        match name {
            "District" => Some(CaseField::District),
            "_id" => Some(CaseField::Id),
            _ => Self::ALL.into_iter().find(|f| f.wire_name() == name),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CaseField::Id => "ID",
            CaseField::District => "District",
            CaseField::PoliceStation => "Police Station",
            CaseField::CrNo => "CR Number",
            CaseField::SectionOfLaw => "Section of Law",
            CaseField::CrimeType => "Crime Type",
            CaseField::Year => "Year",
            CaseField::AccusedName => "Accused Name",
            CaseField::AccusedNickName => "Nick Name",
            CaseField::AccusedGender => "Gender",
            CaseField::Guardian => "Guardian",
            CaseField::AccusedAge => "Age",
            CaseField::AccusedAddress => "Address",
            CaseField::CreatedAt => "Created",
            CaseField::UpdatedAt => "Updated",
        }
    }
}

impl CaseRecord {
    /// The stringified value of a field, `None` when absent.
    pub fn field_value(&self, field: CaseField) -> Option<String> {
        match field {
            CaseField::Id => Some(self.id.clone()).filter(|id| !id.is_empty()),
            CaseField::District => self.district.clone(),
            CaseField::PoliceStation => self.police_station.clone(),
            CaseField::CrNo => self.cr_no.clone(),
            CaseField::SectionOfLaw => self.section_of_law.clone(),
            CaseField::CrimeType => self.crime_type.clone(),
            CaseField::Year => self.year.map(|y| y.to_string()),
            CaseField::AccusedName => self.accused_name.clone(),
            CaseField::AccusedNickName => self.accused_nick_name.clone(),
            CaseField::AccusedGender => self
                .accused_gender
                .filter(|g| *g != Gender::Unspecified)
                .map(|g| g.as_str().to_string()),
            CaseField::Guardian => self.guardian.clone(),
            CaseField::AccusedAge => self.accused_age.map(|a| a.to_string()),
            CaseField::AccusedAddress => self.accused_address.clone(),
            CaseField::CreatedAt => self.created_at.clone(),
            CaseField::UpdatedAt => self.updated_at.clone(),
        }
    }

    /// Display helper: the field value or an empty string.
    pub fn field_text(&self, field: CaseField) -> String {
        self.field_value(field).unwrap_or_default()
    }
}

// ── Draft (create / update payload) ─────────────────────────────────

/// Case entry form state, also the body sent on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
    pub district: String,
    #[serde(rename = "Police_Station")]
    pub police_station: String,
    #[serde(rename = "CR_NO")]
    pub cr_no: String,
    #[serde(rename = "Section_of_law")]
    pub section_of_law: String,
    #[serde(rename = "Crime_type")]
    pub crime_type: String,
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Accused_Name")]
    pub accused_name: String,
    #[serde(rename = "Accused_Nick_Name")]
    pub accused_nick_name: String,
    #[serde(rename = "Accused_Gender")]
    pub accused_gender: Gender,
    #[serde(rename = "Guardian")]
    pub guardian: String,
    #[serde(rename = "Accused_Age")]
    pub accused_age: u32,
    #[serde(rename = "Accused_Address")]
    pub accused_address: String,
}

impl Default for CaseDraft {
    fn default() -> Self {
        Self::blank(current_year())
    }
}

impl CaseDraft {
    pub fn blank(year: i32) -> Self {
        Self {
            district: String::new(),
            police_station: String::new(),
            cr_no: String::new(),
            section_of_law: String::new(),
            crime_type: String::new(),
            year,
            accused_name: String::new(),
            accused_nick_name: String::new(),
            accused_gender: Gender::Male,
            guardian: String::new(),
            accused_age: DEFAULT_ACCUSED_AGE,
            accused_address: String::new(),
        }
    }

    /// Prefill the form from an existing record (edit flow).
    pub fn from_record(record: &CaseRecord) -> Self {
        let blank = Self::default();
        Self {
            district: record.district.clone().unwrap_or_default(),
            police_station: record.police_station.clone().unwrap_or_default(),
            cr_no: record.cr_no.clone().unwrap_or_default(),
            section_of_law: record.section_of_law.clone().unwrap_or_default(),
            crime_type: record.crime_type.clone().unwrap_or_default(),
            year: record.year.unwrap_or(blank.year),
            accused_name: record.accused_name.clone().unwrap_or_default(),
            accused_nick_name: record.accused_nick_name.clone().unwrap_or_default(),
            accused_gender: record
                .accused_gender
                .filter(|g| *g != Gender::Unspecified)
                .unwrap_or(blank.accused_gender),
            guardian: record.guardian.clone().unwrap_or_default(),
            accused_age: record.accused_age.unwrap_or(blank.accused_age),
            accused_address: record.accused_address.clone().unwrap_or_default(),
        }
    }

    /// Build a full record from the draft. Timestamps are left to the caller.
    pub fn into_record(self, id: impl Into<String>) -> CaseRecord {
        fn non_empty(s: String) -> Option<String> {
            Some(s).filter(|s| !s.trim().is_empty())
        }
        CaseRecord {
            id: id.into(),
            district: non_empty(self.district),
            police_station: non_empty(self.police_station),
            cr_no: non_empty(self.cr_no),
            section_of_law: non_empty(self.section_of_law),
            crime_type: non_empty(self.crime_type),
            year: Some(self.year),
            accused_name: non_empty(self.accused_name),
            accused_nick_name: non_empty(self.accused_nick_name),
            accused_gender: Some(self.accused_gender),
            guardian: non_empty(self.guardian),
            accused_age: Some(self.accused_age),
            accused_address: non_empty(self.accused_address),
            created_at: None,
            updated_at: None,
        }
    }
}

// ── Local list updates after the server confirms a mutation ─────────

pub fn apply_created(cases: &mut Vec<CaseRecord>, created: CaseRecord) {
    cases.insert(0, created);
}

/// Merge the confirmed update into the matching record and stamp `updatedAt`.
pub fn apply_updated(cases: &mut [CaseRecord], updated: CaseRecord, now: &str) {
    if let Some(existing) = cases.iter_mut().find(|c| c.id == updated.id) {
        let created_at = existing.created_at.take();
        *existing = CaseRecord {
            created_at: updated.created_at.clone().or(created_at),
            updated_at: Some(now.to_string()),
            ..updated
        };
    }
}

pub fn apply_deleted(cases: &mut Vec<CaseRecord>, id: &str) {
    cases.retain(|c| c.id != id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> CaseRecord {
        CaseRecord {
            id: "c1".into(),
            district: Some("Pune".into()),
            crime_type: Some("Theft".into()),
            year: Some(2022),
            accused_age: Some(30),
            created_at: Some("2024-01-01T00:00:00Z".into()),
            ..Default::default()
        }
    }

    #[test]
    fn deserializes_wire_names_and_aliases() {
        let case: CaseRecord = serde_json::from_value(json!({
            "_id": "abc",
            "District": "Delhi",
            "Police_Station": "North",
            "CR_NO": "CR20240001",
            "Accused_Gender": "Female",
            "Year": 2024
        }))
        .unwrap();
        assert_eq!(case.id, "abc");
        assert_eq!(case.district.as_deref(), Some("Delhi"));
        assert_eq!(case.police_station.as_deref(), Some("North"));
        assert_eq!(case.accused_gender, Some(Gender::Female));
        assert_eq!(case.year, Some(2024));
        assert_eq!(case.guardian, None);
    }

    #[test]
    fn unknown_gender_is_unspecified_and_has_no_field_value() {
        let case: CaseRecord =
            serde_json::from_value(json!({ "id": "1", "Accused_Gender": "n/a" })).unwrap();
        assert_eq!(case.accused_gender, Some(Gender::Unspecified));
        assert_eq!(case.field_value(CaseField::AccusedGender), None);
    }

    #[test]
    fn serializes_only_present_fields() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["district"], "Pune");
        assert_eq!(value["Year"], 2022);
        assert!(value.get("Guardian").is_none());
    }

    #[test]
    fn wire_names_round_trip() {
        for field in CaseField::ALL {
            assert_eq!(CaseField::from_wire_name(field.wire_name()), Some(field));
        }
        assert_eq!(CaseField::from_wire_name("District"), Some(CaseField::District));
        assert_eq!(CaseField::from_wire_name("nope"), None);
    }

    #[test]
    fn draft_defaults() {
        let draft = CaseDraft::blank(2025);
        assert_eq!(draft.year, 2025);
        assert_eq!(draft.accused_age, 18);
        assert_eq!(draft.accused_gender, Gender::Male);
    }

    #[test]
    fn draft_serializes_with_wire_names() {
        let draft = CaseDraft {
            cr_no: "CR1".into(),
            ..CaseDraft::blank(2023)
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["CR_NO"], "CR1");
        assert_eq!(value["Year"], 2023);
        assert_eq!(value["Accused_Gender"], "Male");
        assert_eq!(value["Accused_Age"], 18);
    }

    #[test]
    fn draft_from_record_and_back() {
        let draft = CaseDraft::from_record(&sample());
        assert_eq!(draft.district, "Pune");
        assert_eq!(draft.accused_age, 30);
        let record = draft.into_record("c1");
        assert_eq!(record.district.as_deref(), Some("Pune"));
        assert_eq!(record.guardian, None);
    }

    #[test]
    fn form_years_end_at_current_year() {
        assert_eq!(form_years(2025), vec![2025, 2024, 2023, 2022, 2021, 2020]);
    }

    #[test]
    fn list_updates() {
        let mut cases = vec![sample()];
        apply_created(
            &mut cases,
            CaseRecord {
                id: "c2".into(),
                ..Default::default()
            },
        );
        assert_eq!(cases[0].id, "c2");

        let updated = CaseRecord {
            id: "c1".into(),
            district: Some("Mumbai".into()),
            ..Default::default()
        };
        apply_updated(&mut cases, updated, "2025-02-02T00:00:00Z");
        let c1 = cases.iter().find(|c| c.id == "c1").unwrap();
        assert_eq!(c1.district.as_deref(), Some("Mumbai"));
        assert_eq!(c1.created_at.as_deref(), Some("2024-01-01T00:00:00Z"));
        assert_eq!(c1.updated_at.as_deref(), Some("2025-02-02T00:00:00Z"));

        apply_deleted(&mut cases, "c1");
        assert_eq!(cases.len(), 1);
        apply_deleted(&mut cases, "missing");
        assert_eq!(cases.len(), 1);
    }

    #[test]
    fn gender_parsing() {
        assert_eq!(Gender::from_str_or_default("female"), Gender::Female);
        assert_eq!(Gender::from_str_or_default("Others"), Gender::Others);
        assert_eq!(Gender::from_str_or_default("???"), Gender::Male);
    }
}
