use serde::{Deserialize, Serialize};

use finledger_core::wire_enum;

/// Role of a FinLedger user.
///
/// The set is closed: a user holds exactly one of these. Route and UI gating
/// is a pure function of this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Books transactions and drafts journal entries.
    Accountant,
    /// Reviews entries, manages the chart of accounts, approves payments.
    Manager,
    /// Approves and completes payments.
    Boss,
}

wire_enum!(Role, "role", {
    Accountant => "ACCOUNTANT",
    Manager => "MANAGER",
    Boss => "BOSS",
});

/// Roles admitted by a gated route or action: a single role or a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRequirement {
    One(Role),
    AnyOf(Vec<Role>),
}

impl RoleRequirement {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::AnyOf(roles.into_iter().collect())
    }

    /// Whether `role` satisfies the requirement. An absent role never does.
    pub fn admits(&self, role: Option<Role>) -> bool {
        let Some(role) = role else {
            return false;
        };
        match self {
            RoleRequirement::One(required) => *required == role,
            RoleRequirement::AnyOf(roles) => roles.contains(&role),
        }
    }

    pub fn roles(&self) -> &[Role] {
        match self {
            RoleRequirement::One(role) => core::slice::from_ref(role),
            RoleRequirement::AnyOf(roles) => roles,
        }
    }
}

impl From<Role> for RoleRequirement {
    fn from(role: Role) -> Self {
        Self::One(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_role_requirement() {
        let req = RoleRequirement::from(Role::Manager);
        assert!(req.admits(Some(Role::Manager)));
        assert!(!req.admits(Some(Role::Boss)));
        assert!(!req.admits(None));
    }

    #[test]
    fn set_requirement() {
        let req = RoleRequirement::any_of([Role::Manager, Role::Boss]);
        assert!(req.admits(Some(Role::Boss)));
        assert!(!req.admits(Some(Role::Accountant)));
        assert_eq!(req.roles(), &[Role::Manager, Role::Boss]);
    }

    #[test]
    fn empty_set_admits_nobody() {
        let req = RoleRequirement::any_of([]);
        for role in Role::ALL {
            assert!(!req.admits(Some(*role)));
        }
    }

    #[test]
    fn role_wire_form() {
        assert_eq!(serde_json::to_string(&Role::Accountant).unwrap(), "\"ACCOUNTANT\"");
        assert_eq!(" boss ".parse::<Role>().unwrap(), Role::Boss);
        assert!("ADMIN".parse::<Role>().is_err());
    }
}
