use serde::{Deserialize, Serialize};
use std::fmt;

use crate::user::UserRecord;

/// Every navigable page of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Home,
    CaseEntry,
    CaseView,
    Analytics,
    Chat,
    Register,
    UserList,
}

impl Page {
    /// Sidebar order.
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::CaseEntry,
        Page::CaseView,
        Page::Analytics,
        Page::Chat,
        Page::Register,
        Page::UserList,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::CaseEntry => "case-entry",
            Page::CaseView => "case-view",
            Page::Analytics => "analytics",
            Page::Chat => "chat",
            Page::Register => "register",
            Page::UserList => "user-list",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == name)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            Page::CaseEntry => "Case Entry",
            Page::CaseView => "Case View",
            Page::Analytics => "Analytics",
            Page::Chat => "Chat",
            Page::Register => "Register User",
            Page::UserList => "User List",
        }
    }

    pub fn admin_only(&self) -> bool {
        matches!(self, Page::Register | Page::UserList)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `user` may open `page`.
pub fn can_access(user: Option<&UserRecord>, page: Page) -> bool {
    let Some(user) = user else {
        return false;
    };
    if user.is_admin() {
        return true;
    }
    let flags = &user.permissions;
    match page {
        Page::Home => true,
        Page::CaseEntry => flags.case_entry,
        Page::CaseView => flags.case_view,
        Page::Analytics => flags.analytics,
        Page::Chat => flags.chat,
        Page::Register | Page::UserList => false,
    }
}

/// Same rules keyed by page name. Unknown names are denied.
pub fn can_access_named(user: Option<&UserRecord>, name: &str) -> bool {
    Page::from_name(name).is_some_and(|page| can_access(user, page))
}

/// Keep `active` when still allowed, otherwise fall back to the home page.
pub fn resolve_active_page(user: Option<&UserRecord>, active: Page) -> Page {
    if can_access(user, active) {
        active
    } else {
        Page::Home
    }
}

/// Pages shown in the sidebar for `user`.
pub fn accessible_pages(user: Option<&UserRecord>) -> Vec<Page> {
    Page::ALL
        .into_iter()
        .filter(|page| can_access(user, *page))
        .collect()
}
