use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::format::timestamp;
use shared_types::{
    group_counts, sort_by_count_desc, AppError, AuthBackend, CaseDraft, CaseField, CaseRecord,
    ChartDatum, Gender, LoginRequest, LoginResponse, NewUser, Permissions, Role, UserRecord,
    UserUpdate, LOGIN_SUCCESS_MESSAGE,
};
use std::sync::{Mutex, MutexGuard};

use super::{CaseBackend, REGISTERED_MESSAGE};

pub const DEMO_CASE_COUNT: usize = 100;
pub const DEMO_ADMIN_USERNAME: &str = "admin";
pub const DEMO_ADMIN_PASSWORD: &str = "admin123";

const DISTRICTS: &[&str] = &[
    "Mumbai", "Delhi", "Pune", "Bangalore", "Chennai", "Kolkata", "Hyderabad",
];
const POLICE_STATIONS: &[&str] = &[
    "Central", "North", "South", "East", "West", "Airport", "Railway",
];
const CRIME_TYPES: &[&str] = &[
    "Theft",
    "Assault",
    "Fraud",
    "Robbery",
    "Vandalism",
    "Drug Possession",
    "Domestic Violence",
];
const SECTIONS: &[&str] = &[
    "Section 302",
    "Section 376",
    "Section 420",
    "Section 498A",
    "Section 354",
    "Section 323",
];
const FIRST_NAMES: &[&str] = &[
    "Rahul", "Priya", "Amit", "Sneha", "Vikram", "Anita", "Suresh", "Meera", "Rajesh", "Kavya",
];
const LAST_NAMES: &[&str] = &[
    "Sharma", "Patel", "Singh", "Kumar", "Reddy", "Gupta", "Yadav", "Joshi", "Verma", "Shah",
];
const NICK_NAMES: &[&str] = &[
    "Rocky", "Bunty", "Pinky", "Sunny", "Lucky", "Happy", "Tiger", "Sheru", "Chotu", "Golu",
];
const GENDERS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Others];

fn pick<'a, R: Rng>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

/// Generate `count` plausible cases. Ids are `case-1`, `case-2`, ...
pub fn generate_cases<R: Rng>(count: usize, rng: &mut R, now: DateTime<Utc>) -> Vec<CaseRecord> {
    (0..count)
        .map(|index| {
            let year = 2020 + rng.gen_range(0..6);
            let first = pick(rng, FIRST_NAMES);
            let last = pick(rng, LAST_NAMES);
            let created = now - Duration::minutes(rng.gen_range(0..365 * 24 * 60));
            CaseRecord {
                id: format!("case-{}", index + 1),
                district: Some(pick(rng, DISTRICTS).to_string()),
                police_station: Some(pick(rng, POLICE_STATIONS).to_string()),
                cr_no: Some(format!("CR{year}{:04}", rng.gen_range(0..9999))),
                section_of_law: Some(pick(rng, SECTIONS).to_string()),
                crime_type: Some(pick(rng, CRIME_TYPES).to_string()),
                year: Some(year),
                accused_name: Some(format!("{first} {last}")),
                accused_nick_name: Some(pick(rng, NICK_NAMES).to_string()),
                accused_gender: Some(GENDERS[rng.gen_range(0..GENDERS.len())]),
                guardian: Some(format!("Guardian of {first}")),
                accused_age: Some(18 + rng.gen_range(0..50)),
                accused_address: Some(format!(
                    "{}, Street {}, {}",
                    rng.gen_range(1..=999),
                    rng.gen_range(1..=50),
                    pick(rng, DISTRICTS)
                )),
                created_at: Some(timestamp(created)),
                updated_at: Some(timestamp(now)),
            }
        })
        .collect()
}

struct DemoUser {
    record: UserRecord,
    password: String,
}

struct DemoState {
    cases: Vec<CaseRecord>,
    users: Vec<DemoUser>,
    last_case_id: i64,
}

impl DemoState {
    /// Millisecond timestamp id, bumped past the last one on collision.
    fn next_case_id(&mut self, now: DateTime<Utc>) -> String {
        let id = now.timestamp_millis().max(self.last_case_id + 1);
        self.last_case_id = id;
        id.to_string()
    }
}

/// In-memory stand-in for the REST backend.
pub struct DemoBackend {
    state: Mutex<DemoState>,
}

impl Default for DemoBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoBackend {
    /// Seeded with [`DEMO_CASE_COUNT`] random cases and the admin account.
    pub fn new() -> Self {
        Self::seeded(DEMO_CASE_COUNT, rand::random())
    }

    /// Deterministic store for a given seed.
    pub fn seeded(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::with_cases(generate_cases(count, &mut rng, Utc::now()))
    }

    pub fn with_cases(cases: Vec<CaseRecord>) -> Self {
        let admin = DemoUser {
            record: UserRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_name: DEMO_ADMIN_USERNAME.to_string(),
                user_role: Role::Admin,
                permissions: Permissions::ALL_GRANTED,
            },
            password: DEMO_ADMIN_PASSWORD.to_string(),
        };
        Self {
            state: Mutex::new(DemoState {
                cases,
                users: vec![admin],
                last_case_id: 0,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, DemoState>, AppError> {
        self.state
            .lock()
            .map_err(|_| AppError::internal("Demo store is unavailable"))
    }
}

impl AuthBackend for DemoBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, AppError> {
        let state = self.lock()?;
        let user = state
            .users
            .iter()
            .find(|u| u.record.user_name == request.user_name && u.password == request.password)
            .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;
        Ok(LoginResponse {
            message: LOGIN_SUCCESS_MESSAGE.to_string(),
            user: Some(user.record.clone()),
            token: Some(format!("demo_{}", uuid::Uuid::new_v4().simple())),
        })
    }
}

impl CaseBackend for DemoBackend {
    async fn register(&self, user: &NewUser) -> Result<String, AppError> {
        let mut state = self.lock()?;
        if state.users.iter().any(|u| u.record.user_name == user.user_name) {
            return Err(AppError::bad_request("User already exists"));
        }
        state.users.push(DemoUser {
            record: UserRecord {
                id: uuid::Uuid::new_v4().to_string(),
                user_name: user.user_name.clone(),
                user_role: user.user_role,
                permissions: user.permissions,
            },
            password: user.password.clone(),
        });
        tracing::info!(user = %user.user_name, "Demo user registered");
        Ok(REGISTERED_MESSAGE.to_string())
    }

    async fn list_users(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.lock()?.users.iter().map(|u| u.record.clone()).collect())
    }

    async fn update_user(&self, update: &UserUpdate) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.record.id == update.id)
            .ok_or_else(|| AppError::not_found(format!("User {} not found", update.id)))?;
        user.record.apply_update(update);
        if let Some(password) = &update.password {
            user.password = password.clone();
        }
        Ok(())
    }

    async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let before = state.users.len();
        state.users.retain(|u| u.record.id != id);
        if state.users.len() == before {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        Ok(())
    }

    async fn create_case(&self, draft: &CaseDraft) -> Result<Option<CaseRecord>, AppError> {
        let now = Utc::now();
        let mut state = self.lock()?;
        let id = state.next_case_id(now);
        let record = CaseRecord {
            created_at: Some(timestamp(now)),
            updated_at: Some(timestamp(now)),
            ..draft.clone().into_record(id)
        };
        state.cases.insert(0, record.clone());
        Ok(Some(record))
    }

    async fn list_cases(&self) -> Result<Vec<CaseRecord>, AppError> {
        Ok(self.lock()?.cases.clone())
    }

    async fn update_case(&self, id: &str, draft: &CaseDraft) -> Result<CaseRecord, AppError> {
        let mut state = self.lock()?;
        let existing = state
            .cases
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::not_found(format!("Case {id} not found")))?;
        *existing = CaseRecord {
            created_at: existing.created_at.take(),
            updated_at: Some(timestamp(Utc::now())),
            ..draft.clone().into_record(id)
        };
        Ok(existing.clone())
    }

    async fn delete_case(&self, id: &str) -> Result<(), AppError> {
        let mut state = self.lock()?;
        let before = state.cases.len();
        state.cases.retain(|c| c.id != id);
        if state.cases.len() == before {
            return Err(AppError::not_found(format!("Case {id} not found")));
        }
        Ok(())
    }

    async fn crime_type_counts(&self) -> Result<Vec<ChartDatum>, AppError> {
        let state = self.lock()?;
        let mut counts = group_counts(&state.cases, CaseField::CrimeType);
        sort_by_count_desc(&mut counts);
        Ok(counts)
    }

    async fn case_count(&self) -> Result<Option<u64>, AppError> {
        Ok(Some(self.lock()?.cases.len() as u64))
    }
}
