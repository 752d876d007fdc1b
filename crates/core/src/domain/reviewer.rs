use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerRole {
    Creative,
    Legal,
    Finance,
    SuperAdmin,
}

impl ReviewerRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Creative => "creative",
            Self::Legal => "legal",
            Self::Finance => "finance",
            Self::SuperAdmin => "super_admin",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace([' ', '-'], "_").as_str() {
            "creative" => Some(Self::Creative),
            "legal" => Some(Self::Legal),
            "finance" => Some(Self::Finance),
            "super_admin" | "superadmin" | "admin" => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Creative => "Reviews creative content and materials",
            Self::Legal => "Reviews legal compliance and content standards",
            Self::Finance => "Reviews financial aspects and pricing",
            Self::SuperAdmin => "Full system access and configuration",
        }
    }

    pub fn default_permissions(&self) -> BTreeSet<Permission> {
        use Permission::*;

        let permissions: &[Permission] = match self {
            Self::Creative => &[ViewRequests, ApproveCreative, RejectCreative],
            Self::Legal => &[ViewRequests, ApproveLegal, RejectLegal],
            Self::Finance => &[ViewRequests, ApproveFinance, RejectFinance, ViewPricing],
            Self::SuperAdmin => {
                &[ViewAll, EditAll, ApproveAll, RejectAll, ConfigureAll, ManageUsers]
            }
        };
        permissions.iter().copied().collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewRequests,
    ApproveCreative,
    ApproveLegal,
    ApproveFinance,
    RejectCreative,
    RejectLegal,
    RejectFinance,
    ViewPricing,
    EditPrograms,
    EditPricing,
    ManageUsers,
    ViewAll,
    EditAll,
    ApproveAll,
    RejectAll,
    ConfigureAll,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewRequests => "view_requests",
            Self::ApproveCreative => "approve_creative",
            Self::ApproveLegal => "approve_legal",
            Self::ApproveFinance => "approve_finance",
            Self::RejectCreative => "reject_creative",
            Self::RejectLegal => "reject_legal",
            Self::RejectFinance => "reject_finance",
            Self::ViewPricing => "view_pricing",
            Self::EditPrograms => "edit_programs",
            Self::EditPricing => "edit_pricing",
            Self::ManageUsers => "manage_users",
            Self::ViewAll => "view_all",
            Self::EditAll => "edit_all",
            Self::ApproveAll => "approve_all",
            Self::RejectAll => "reject_all",
            Self::ConfigureAll => "configure_all",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    pub user_id: String,
    pub role: ReviewerRole,
    pub permissions: BTreeSet<Permission>,
}

impl Reviewer {
    /// Reviewer holding exactly the default permission set of `role`.
    pub fn with_role(user_id: impl Into<String>, role: ReviewerRole) -> Self {
        Self { user_id: user_id.into(), role, permissions: role.default_permissions() }
    }

    pub fn has(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    pub fn grant(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    pub fn revoke(mut self, permission: Permission) -> Self {
        self.permissions.remove(&permission);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Permission, Reviewer, ReviewerRole};

    #[test]
    fn role_defaults_follow_the_permission_matrix() {
        let finance = Reviewer::with_role("u-3", ReviewerRole::Finance);
        assert!(finance.has(Permission::ApproveFinance));
        assert!(finance.has(Permission::ViewPricing));
        assert!(!finance.has(Permission::ApproveLegal));

        let admin = Reviewer::with_role("u-4", ReviewerRole::SuperAdmin);
        assert!(admin.has(Permission::ApproveAll));
        assert!(admin.has(Permission::RejectAll));
        assert!(!admin.has(Permission::ViewRequests));
    }

    #[test]
    fn role_parsing_accepts_display_names() {
        assert_eq!(ReviewerRole::parse("Super Admin"), Some(ReviewerRole::SuperAdmin));
        assert_eq!(ReviewerRole::parse("super-admin"), Some(ReviewerRole::SuperAdmin));
        assert_eq!(ReviewerRole::parse(" Legal "), Some(ReviewerRole::Legal));
        assert_eq!(ReviewerRole::parse("marketing"), None);
    }

    #[test]
    fn permissions_can_be_customised_per_reviewer() {
        let reviewer = Reviewer::with_role("u-1", ReviewerRole::Creative)
            .revoke(Permission::RejectCreative)
            .grant(Permission::ApproveLegal);

        assert!(!reviewer.has(Permission::RejectCreative));
        assert!(reviewer.has(Permission::ApproveLegal));
        assert_eq!(Permission::ApproveLegal.as_str(), "approve_legal");
    }
}
