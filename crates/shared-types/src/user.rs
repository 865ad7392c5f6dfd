use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::wire;

/// The exact message the backend sends on a successful login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

pub const MIN_PASSWORD_LEN: u64 = 6;

// ── Role ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Unknown roles are treated as plain users.
    pub fn from_str_or_default(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from_str_or_default(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Permission flags ────────────────────────────────────────────────

/// `"0"`/`"1"` on the wire, `bool` in memory.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Bool(b)) => b,
            Some(Value::Number(n)) => n.as_i64() == Some(1),
            Some(Value::String(s)) => matches!(s.trim(), "1" | "true"),
            _ => false,
        })
    }
}

/// Per-page permission flags carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, with = "flag")]
    pub case_entry: bool,
    #[serde(default, with = "flag")]
    pub case_view: bool,
    #[serde(default, with = "flag")]
    pub analytics: bool,
    #[serde(default, with = "flag")]
    pub chat: bool,
}

impl Permissions {
    pub const ALL_GRANTED: Permissions = Permissions {
        case_entry: true,
        case_view: true,
        analytics: true,
        chat: true,
    };

    /// Labels of the granted flags, in display order.
    pub fn granted_labels(&self) -> Vec<&'static str> {
        [
            (self.case_entry, "Case Entry"),
            (self.case_view, "Case View"),
            (self.analytics, "Analytics"),
            (self.chat, "Chat"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

// ── User records ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default, alias = "_id", deserialize_with = "wire::lenient_id")]
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_role: Role,
    #[serde(flatten)]
    pub permissions: Permissions,
}

impl UserRecord {
    pub fn is_admin(&self) -> bool {
        self.user_role == Role::Admin
    }

    /// Fold a confirmed update into the local copy. The password never is.
    pub fn apply_update(&mut self, update: &UserUpdate) {
        self.user_name = update.user_name.clone();
        self.user_role = update.user_role;
        self.permissions = update.permissions;
    }
}

/// Whether `actor` may edit or delete `target` from the user list.
pub fn can_manage(actor: Option<&UserRecord>, target: &UserRecord) -> bool {
    match actor {
        Some(actor) => actor.is_admin() && actor.id != target.id,
        None => false,
    }
}

/// Case-insensitive match on username or role. Blank terms keep everything.
pub fn filter_users<'a>(users: &'a [UserRecord], term: &str) -> Vec<&'a UserRecord> {
    let term = term.trim().to_lowercase();
    users
        .iter()
        .filter(|u| {
            term.is_empty()
                || u.user_name.to_lowercase().contains(&term)
                || u.user_role.as_str().contains(&term)
        })
        .collect()
}

// ── Requests ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user: Option<UserRecord>,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The authenticated user, only when the response has the success shape.
    pub fn authenticated_user(&self) -> Option<&UserRecord> {
        if self.message == LOGIN_SUCCESS_MESSAGE {
            self.user.as_ref()
        } else {
            None
        }
    }
}

/// Registration body sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub user_name: String,
    pub password: String,
    pub user_role: Role,
    #[serde(flatten)]
    pub permissions: Permissions,
}

/// Registration form state, validated before any network call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RegistrationForm {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Username is required"))
    )]
    pub user_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 6, message = "Password must be at least 6 characters long"))
    )]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(must_match(other = "password", message = "Passwords do not match"))
    )]
    pub confirm_password: String,
    pub user_role: Role,
    pub permissions: Permissions,
}

impl RegistrationForm {
    pub fn into_new_user(self) -> NewUser {
        NewUser {
            user_name: self.user_name.trim().to_string(),
            password: self.password,
            user_role: self.user_role,
            permissions: self.permissions,
        }
    }
}

/// Body of `PUT auth/api/updateuser/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UserUpdate {
    #[serde(deserialize_with = "wire::lenient_id")]
    pub id: String,
    pub user_name: String,
    pub user_role: Role,
    #[serde(flatten)]
    pub permissions: Permissions,
    /// Username of whoever made the change.
    pub updated_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 6, message = "Password must be at least 6 characters long"))
    )]
    pub password: Option<String>,
}

impl UserUpdate {
    /// Start an edit of `target` on behalf of `actor`. A blank password is omitted.
    pub fn for_user(target: &UserRecord, actor: &str, password: &str) -> Self {
        Self {
            id: target.id.clone(),
            user_name: target.user_name.clone(),
            user_role: target.user_role,
            permissions: target.permissions,
            updated_by: actor.to_string(),
            password: Some(password.to_string()).filter(|p| !p.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user(id: &str, role: Role) -> UserRecord {
        UserRecord {
            id: id.into(),
            user_name: format!("user{id}"),
            user_role: role,
            permissions: Permissions::default(),
        }
    }

    #[test]
    fn flags_are_strings_on_the_wire() {
        let u = UserRecord {
            permissions: Permissions {
                case_entry: true,
                ..Default::default()
            },
            ..user("1", Role::User)
        };
        let value = serde_json::to_value(&u).unwrap();
        assert_eq!(value["case_entry"], "1");
        assert_eq!(value["chat"], "0");
        assert_eq!(value["user_role"], "user");
    }

    #[test]
    fn flags_decode_leniently() {
        let u: UserRecord = serde_json::from_value(json!({
            "id": 3,
            "user_name": "x",
            "user_role": "ADMIN",
            "case_entry": "1",
            "case_view": true,
            "analytics": 1,
            "chat": "0"
        }))
        .unwrap();
        assert_eq!(u.id, "3");
        assert_eq!(u.user_role, Role::Admin);
        assert_eq!(
            u.permissions,
            Permissions {
                case_entry: true,
                case_view: true,
                analytics: true,
                chat: false
            }
        );
    }

    #[test]
    fn missing_flags_default_to_denied() {
        let u: UserRecord =
            serde_json::from_value(json!({ "id": "9", "user_name": "y", "user_role": "user" })).unwrap();
        assert_eq!(u.permissions, Permissions::default());
    }

    #[test]
    fn unknown_role_is_user() {
        assert_eq!(Role::from_str_or_default("superuser"), Role::User);
        assert_eq!(Role::from_str_or_default(" Admin "), Role::Admin);
    }

    #[test]
    fn login_response_success_shape() {
        let ok = LoginResponse {
            message: LOGIN_SUCCESS_MESSAGE.into(),
            user: Some(user("1", Role::User)),
            token: None,
        };
        assert!(ok.authenticated_user().is_some());

        let wrong_message = LoginResponse {
            message: "Welcome".into(),
            ..ok.clone()
        };
        assert!(wrong_message.authenticated_user().is_none());

        let no_user = LoginResponse {
            user: None,
            ..ok
        };
        assert!(no_user.authenticated_user().is_none());
    }

    #[test]
    fn admins_cannot_manage_themselves() {
        let admin = user("1", Role::Admin);
        let other = user("2", Role::User);
        assert!(can_manage(Some(&admin), &other));
        assert!(!can_manage(Some(&admin), &admin));
        assert!(!can_manage(Some(&other), &admin));
        assert!(!can_manage(None, &other));
    }

    #[test]
    fn filter_users_by_name_or_role() {
        let users = vec![user("1", Role::Admin), user("2", Role::User)];
        assert_eq!(filter_users(&users, "").len(), 2);
        assert_eq!(filter_users(&users, "ADM").len(), 1);
        assert_eq!(filter_users(&users, "user2")[0].id, "2");
        assert!(filter_users(&users, "zzz").is_empty());
    }

    #[test]
    fn update_body_omits_blank_password() {
        let target = user("5", Role::User);
        let update = UserUpdate::for_user(&target, "admin", "");
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["updated_by"], "admin");
        assert_eq!(value["case_view"], "0");

        let with_pw = UserUpdate::for_user(&target, "admin", "secret1");
        assert_eq!(with_pw.password.as_deref(), Some("secret1"));
    }

    #[test]
    fn apply_update_keeps_id() {
        let mut target = user("5", Role::User);
        let mut update = UserUpdate::for_user(&target, "admin", "");
        update.user_role = Role::Admin;
        update.permissions.chat = true;
        target.apply_update(&update);
        assert_eq!(target.id, "5");
        assert!(target.is_admin());
        assert!(target.permissions.chat);
    }

    #[test]
    fn granted_labels_in_order() {
        let p = Permissions {
            case_view: true,
            chat: true,
            ..Default::default()
        };
        assert_eq!(p.granted_labels(), vec!["Case View", "Chat"]);
    }

    #[cfg(feature = "validation")]
    #[test]
    fn registration_validation_messages() {
        use crate::AppError;

        let form = RegistrationForm {
            user_name: "clerk".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
            ..Default::default()
        };
        let err: AppError = form.validate().unwrap_err().into();
        assert_eq!(err.first_field_error(), "Passwords do not match");
        assert_eq!(
            err.field_errors.get("password").map(String::as_str),
            Some("Password must be at least 6 characters long")
        );

        let ok = RegistrationForm {
            user_name: "clerk".into(),
            password: "abcdef".into(),
            confirm_password: "abcdef".into(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }
}
