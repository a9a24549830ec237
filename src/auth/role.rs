//! User roles and the pages each role may open.

use serde::{Deserialize, Serialize};

/// Access role of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access to users, runners, and all records
    Admin,
    /// Sees only their own runners and those runners' records
    Coach,
    /// Shared views only
    Runner,
}

impl Role {
    /// All roles, in the order offered when adding a user.
    pub const ALL: [Role; 3] = [Role::Runner, Role::Coach, Role::Admin];

    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Coach => "coach",
            Role::Runner => "runner",
        }
    }

    /// Parse the stored string form.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "coach" => Some(Role::Coach),
            "runner" => Some(Role::Runner),
            _ => None,
        }
    }

    /// Pages reachable from the navigation for this role.
    pub fn pages(&self) -> &'static [Page] {
        match self {
            Role::Admin => &[
                Page::UploadAnalyze,
                Page::ViewReports,
                Page::ManageUsers,
                Page::ManageRunners,
            ],
            Role::Coach => &[Page::UploadAnalyze, Page::ViewReports, Page::MyRunners],
            Role::Runner => &[Page::UploadAnalyze, Page::ViewReports],
        }
    }

    /// Whether this role may open the given page.
    pub fn can_view(&self, page: Page) -> bool {
        self.pages().contains(&page)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Navigable pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    UploadAnalyze,
    ViewReports,
    ManageUsers,
    ManageRunners,
    MyRunners,
}

impl Page {
    pub fn label(&self) -> &'static str {
        match self {
            Page::UploadAnalyze => "Upload & Analyze",
            Page::ViewReports => "View Reports",
            Page::ManageUsers => "Manage Users",
            Page::ManageRunners => "Manage Runners",
            Page::MyRunners => "My Runners",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_string_roundtrip() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    #[test]
    fn test_pages_per_role() {
        assert!(Role::Admin.can_view(Page::ManageUsers));
        assert!(Role::Admin.can_view(Page::ManageRunners));
        assert!(!Role::Admin.can_view(Page::MyRunners));

        assert!(Role::Coach.can_view(Page::MyRunners));
        assert!(!Role::Coach.can_view(Page::ManageUsers));

        assert_eq!(
            Role::Runner.pages(),
            &[Page::UploadAnalyze, Page::ViewReports]
        );
    }
}
