//! Role predicates used for capability-based UI gating.
//!
//! These mirror the backend's checks so views can hide actions a user cannot
//! perform. They are advisory: the backend remains the enforcement point.
//! Every predicate is total; an absent user or a user without a role is
//! denied everything.

use serde::{Deserialize, Serialize};

use finledger_core::EntryStatus;

use crate::{Role, RoleRequirement, UserProfile};

pub fn has_role(user: Option<&UserProfile>, role: Role) -> bool {
    user.and_then(|u| u.role) == Some(role)
}

pub fn is_accountant(user: Option<&UserProfile>) -> bool {
    has_role(user, Role::Accountant)
}

pub fn is_manager(user: Option<&UserProfile>) -> bool {
    has_role(user, Role::Manager)
}

pub fn is_boss(user: Option<&UserProfile>) -> bool {
    has_role(user, Role::Boss)
}

pub fn is_manager_or_boss(user: Option<&UserProfile>) -> bool {
    is_manager(user) || is_boss(user)
}

pub fn can_create_transaction(user: Option<&UserProfile>) -> bool {
    is_accountant(user)
}

pub fn can_create_entry(user: Option<&UserProfile>) -> bool {
    is_accountant(user)
}

pub fn can_review_entry(user: Option<&UserProfile>) -> bool {
    is_manager(user)
}

pub fn can_manage_account(user: Option<&UserProfile>) -> bool {
    is_manager(user)
}

pub fn can_approve_payment(user: Option<&UserProfile>) -> bool {
    is_manager_or_boss(user)
}

pub fn can_complete_payment(user: Option<&UserProfile>) -> bool {
    is_boss(user)
}

/// Reports are visible to every role.
pub fn can_view_report(user: Option<&UserProfile>) -> bool {
    user.and_then(|u| u.role).is_some()
}

/// Whether `user` may move an entry to `status`.
///
/// Submitting is the accountant's step; approving or rejecting is the
/// manager's. Other targets carry no role restriction.
pub fn can_set_entry_status(user: Option<&UserProfile>, status: EntryStatus) -> bool {
    match status {
        EntryStatus::Submitted => is_accountant(user),
        EntryStatus::Approved | EntryStatus::Rejected => is_manager(user),
        EntryStatus::Draft => true,
    }
}

/// An action a view may offer, gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    CreateTransaction,
    CreateEntry,
    ReviewEntry,
    ManageAccount,
    ApprovePayment,
    CompletePayment,
    ViewReport,
}

impl Capability {
    pub const ALL: &'static [Capability] = &[
        Capability::CreateTransaction,
        Capability::CreateEntry,
        Capability::ReviewEntry,
        Capability::ManageAccount,
        Capability::ApprovePayment,
        Capability::CompletePayment,
        Capability::ViewReport,
    ];

    /// Roles granted this capability.
    pub fn requirement(&self) -> RoleRequirement {
        match self {
            Capability::CreateTransaction | Capability::CreateEntry => Role::Accountant.into(),
            Capability::ReviewEntry | Capability::ManageAccount => Role::Manager.into(),
            Capability::ApprovePayment => RoleRequirement::any_of([Role::Manager, Role::Boss]),
            Capability::CompletePayment => Role::Boss.into(),
            Capability::ViewReport => RoleRequirement::any_of(Role::ALL.iter().copied()),
        }
    }

    pub fn check(&self, user: Option<&UserProfile>) -> bool {
        match self {
            Capability::CreateTransaction => can_create_transaction(user),
            Capability::CreateEntry => can_create_entry(user),
            Capability::ReviewEntry => can_review_entry(user),
            Capability::ManageAccount => can_manage_account(user),
            Capability::ApprovePayment => can_approve_payment(user),
            Capability::CompletePayment => can_complete_payment(user),
            Capability::ViewReport => can_view_report(user),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::CreateTransaction => "create_transaction",
            Capability::CreateEntry => "create_entry",
            Capability::ReviewEntry => "review_entry",
            Capability::ManageAccount => "manage_account",
            Capability::ApprovePayment => "approve_payment",
            Capability::CompletePayment => "complete_payment",
            Capability::ViewReport => "view_report",
        }
    }
}

impl core::fmt::Display for Capability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finledger_core::UserId;
    use proptest::prelude::*;

    fn user(role: Option<Role>) -> UserProfile {
        UserProfile::new(UserId::new(1), "u", role)
    }

    fn any_role() -> impl Strategy<Value = Option<Role>> {
        prop_oneof![
            Just(None),
            Just(Some(Role::Accountant)),
            Just(Some(Role::Manager)),
            Just(Some(Role::Boss)),
        ]
    }

    #[test]
    fn approve_payment_is_manager_or_boss() {
        assert!(can_approve_payment(Some(&user(Some(Role::Manager)))));
        assert!(can_approve_payment(Some(&user(Some(Role::Boss)))));
        assert!(!can_approve_payment(Some(&user(Some(Role::Accountant)))));
        assert!(!can_approve_payment(Some(&user(None))));
        assert!(!can_approve_payment(None));
    }

    #[test]
    fn complete_payment_is_boss_only() {
        assert!(can_complete_payment(Some(&user(Some(Role::Boss)))));
        assert!(!can_complete_payment(Some(&user(Some(Role::Manager)))));
        assert!(!can_complete_payment(None));
    }

    #[test]
    fn entry_status_transitions_follow_backend_rules() {
        let accountant = user(Some(Role::Accountant));
        let manager = user(Some(Role::Manager));

        assert!(can_set_entry_status(Some(&accountant), EntryStatus::Submitted));
        assert!(!can_set_entry_status(Some(&manager), EntryStatus::Submitted));
        assert!(can_set_entry_status(Some(&manager), EntryStatus::Approved));
        assert!(can_set_entry_status(Some(&manager), EntryStatus::Rejected));
        assert!(!can_set_entry_status(Some(&accountant), EntryStatus::Rejected));
    }

    proptest! {
        /// Capability predicates agree with the declared role requirements.
        #[test]
        fn predicates_match_requirements(role in any_role()) {
            let profile = user(role);
            for cap in Capability::ALL {
                prop_assert_eq!(cap.check(Some(&profile)), cap.requirement().admits(role));
            }
        }
    }

    #[test]
    fn absent_user_is_denied_everything() {
        for cap in Capability::ALL {
            assert!(!cap.check(None));
        }
        for role in Role::ALL {
            assert!(!has_role(None, *role));
        }
    }
}
