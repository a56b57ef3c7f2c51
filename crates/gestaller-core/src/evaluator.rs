//! The allow/deny verdict and the effective permission set.
//!
//! Decision order for `has_capability`:
//!
//! 1. inactive subject: deny
//! 2. admin classification: grant, unconditionally (not filtered by area,
//!    catalog membership, or spelling; the escalation policy wants the
//!    admin role to pass even for capabilities nobody declared)
//! 3. capability not granted to the role: deny
//! 4. area-scoped capability checked for an operator: grant only when the
//!    supplied context area is one of the operator's assigned areas; a
//!    missing context denies
//! 5. otherwise the role grant alone suffices
//!
//! The caller resolves the subject fresh per request, so a mid-session
//! role/status/area change is visible on the very next check.

use uuid::Uuid;

use crate::capability::CapabilityKey;
use crate::catalog::{CapabilityEntry, PermissionCatalog};
use crate::subject::{RoleClass, Subject};

/// May `subject` perform (`module`, `action`), optionally in `context_area`?
pub fn has_capability(
    subject: &Subject,
    catalog: &PermissionCatalog,
    module: &str,
    action: &str,
    context_area: Option<&str>,
) -> bool {
    if !subject.is_active() {
        return false;
    }
    if subject.class.is_admin() {
        return true;
    }

    let Some(key) = CapabilityKey::new(module, action) else {
        return false;
    };
    if !catalog.is_granted(subject.role_id, &key) {
        return false;
    }
    let Some(entry) = catalog.lookup(&key) else {
        return false;
    };

    if entry.area_scoped && subject.class.is_operator() {
        return match context_area {
            Some(area) => subject.has_area(area),
            None => false,
        };
    }

    true
}

/// Fully resolved, per-user view of role flags, areas, and capabilities.
///
/// Derived on every query, never persisted or cached server side. For any
/// non-area-scoped capability `c`, `c` appears in `capabilities` iff
/// [`has_capability`] grants it. Area-scoped capabilities appear
/// unconditionally (the set has no place to carry per-area context); their
/// per-area availability is resolved only at check time. Two consequences
/// consumers must expect: an inactive user has empty `capabilities` and
/// `areas`, and an admin's `capabilities` is the entire declared catalog
/// while the bypass additionally covers undeclared pairs (`is_admin`
/// signals that).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePermissionSet {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub role_name: String,
    pub is_admin: bool,
    pub is_supervisor: bool,
    pub is_operator: bool,
    pub is_warehouse: bool,
    pub areas: Vec<String>,
    pub capabilities: Vec<CapabilityEntry>,
}

pub fn effective_permissions(
    subject: &Subject,
    catalog: &PermissionCatalog,
) -> EffectivePermissionSet {
    let areas = match (&subject.class, subject.is_active()) {
        (RoleClass::Operator { areas }, true) => areas.iter().cloned().collect(),
        _ => Vec::new(),
    };

    let capabilities = if !subject.is_active() {
        Vec::new()
    } else if subject.class.is_admin() {
        catalog.entries().into_iter().cloned().collect()
    } else {
        catalog
            .role_entries(subject.role_id)
            .into_iter()
            .cloned()
            .collect()
    };

    EffectivePermissionSet {
        user_id: subject.user_id,
        role_id: subject.role_id,
        role_name: subject.role_name.clone(),
        is_admin: subject.class.is_admin(),
        is_supervisor: subject.class.is_supervisor(),
        is_operator: subject.class.is_operator(),
        is_warehouse: subject.class.is_warehouse(),
        areas,
        capabilities,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::subject::UserStatus;

    fn entry(module: &str, action: &str, area_scoped: bool) -> CapabilityEntry {
        CapabilityEntry {
            id: Uuid::new_v4(),
            name: format!("{module}.{action}"),
            module: module.to_string(),
            action: action.to_string(),
            area_scoped,
        }
    }

    fn catalog_for(role_id: Uuid, granted: Vec<CapabilityEntry>) -> PermissionCatalog {
        let grant_rows: Vec<(Uuid, Uuid)> = granted.iter().map(|e| (role_id, e.id)).collect();
        PermissionCatalog::build(granted, grant_rows)
    }

    fn subject(role_id: Uuid, tag: &str, areas: &[&str]) -> Subject {
        Subject {
            user_id: Uuid::new_v4(),
            role_id,
            role_name: tag.to_string(),
            status: UserStatus::Active,
            class: RoleClass::classify(tag, areas.iter().map(|a| a.to_string()).collect()),
        }
    }

    #[test]
    fn test_admin_bypass_covers_undeclared_pairs() {
        let role_id = Uuid::new_v4();
        let catalog = PermissionCatalog::build(vec![], vec![]);
        let admin = subject(role_id, "admin", &[]);

        assert!(has_capability(&admin, &catalog, "Clients", "View", None));
        assert!(has_capability(&admin, &catalog, "NoSuchModule", "NoSuchAction", None));
        assert!(has_capability(&admin, &catalog, "Projects", "CompleteArea", None));
    }

    #[test]
    fn test_ungranted_capability_is_denied() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Clients", "View", false)]);
        let supervisor = subject(role_id, "supervisor", &[]);

        assert!(has_capability(&supervisor, &catalog, "Clients", "View", None));
        assert!(!has_capability(&supervisor, &catalog, "Clients", "Delete", None));
        assert!(!has_capability(&supervisor, &catalog, "Inventory", "View", None));
    }

    #[test]
    fn test_inactive_user_is_denied_everything() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Clients", "View", false)]);
        let mut admin = subject(role_id, "admin", &[]);
        admin.status = UserStatus::Inactive;

        assert!(!has_capability(&admin, &catalog, "Clients", "View", None));

        let mut supervisor = subject(role_id, "supervisor", &[]);
        supervisor.status = UserStatus::Inactive;
        assert!(!has_capability(&supervisor, &catalog, "Clients", "View", None));
    }

    #[test]
    fn test_area_scoped_check_for_operator() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Projects", "CompleteArea", true)]);
        let operator = subject(role_id, "operator", &["Cutting"]);

        assert!(has_capability(&operator, &catalog, "Projects", "CompleteArea", Some("Cutting")));
        assert!(!has_capability(&operator, &catalog, "Projects", "CompleteArea", Some("Sewing")));
        // Missing context is a denial, never an automatic grant.
        assert!(!has_capability(&operator, &catalog, "Projects", "CompleteArea", None));
    }

    #[test]
    fn test_area_scoped_grant_suffices_for_non_operator() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Projects", "CompleteArea", true)]);
        let supervisor = subject(role_id, "supervisor", &[]);

        assert!(has_capability(&supervisor, &catalog, "Projects", "CompleteArea", None));
        assert!(has_capability(&supervisor, &catalog, "Projects", "CompleteArea", Some("Sewing")));
    }

    #[test]
    fn test_capability_identity_ignores_case_and_whitespace() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Clients", "View", false)]);
        let supervisor = subject(role_id, "supervisor", &[]);

        assert_eq!(
            has_capability(&supervisor, &catalog, "clients", "view", None),
            has_capability(&supervisor, &catalog, " Clients ", "View", None),
        );
        assert!(has_capability(&supervisor, &catalog, " CLIENTS", "view ", None));
    }

    #[test]
    fn test_empty_components_are_denied() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Clients", "View", false)]);
        let supervisor = subject(role_id, "supervisor", &[]);

        assert!(!has_capability(&supervisor, &catalog, "", "View", None));
        assert!(!has_capability(&supervisor, &catalog, "Clients", "  ", None));
    }

    #[test]
    fn test_effective_set_round_trips_with_checks() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(
            role_id,
            vec![
                entry("Clients", "View", false),
                entry("Projects", "View", false),
                entry("Projects", "CompleteArea", true),
            ],
        );
        let operator = subject(role_id, "operator", &["Cutting"]);
        let set = effective_permissions(&operator, &catalog);

        // Every non-area-scoped capability in the set passes the check, and
        // every declared non-area-scoped capability that passes is in the set.
        for cap in set.capabilities.iter().filter(|c| !c.area_scoped) {
            assert!(has_capability(&operator, &catalog, &cap.module, &cap.action, None));
        }
        for cap in catalog.entries().into_iter().filter(|c| !c.area_scoped) {
            let held = set.capabilities.iter().any(|c| c.id == cap.id);
            assert_eq!(
                held,
                has_capability(&operator, &catalog, &cap.module, &cap.action, None)
            );
        }

        // Area-scoped capabilities appear unconditionally.
        assert!(set.capabilities.iter().any(|c| c.area_scoped));
        assert_eq!(set.areas, vec!["Cutting".to_string()]);
        assert!(set.is_operator);
        assert!(!set.is_admin);
    }

    #[test]
    fn test_effective_set_for_inactive_user_is_empty() {
        let role_id = Uuid::new_v4();
        let catalog = catalog_for(role_id, vec![entry("Clients", "View", false)]);
        let mut operator = subject(role_id, "operator", &["Cutting"]);
        operator.status = UserStatus::Inactive;

        let set = effective_permissions(&operator, &catalog);
        assert!(set.capabilities.is_empty());
        assert!(set.areas.is_empty());
        assert!(set.is_operator);
    }

    #[test]
    fn test_effective_set_for_admin_is_whole_catalog() {
        let admin_role = Uuid::new_v4();
        let other_role = Uuid::new_v4();
        let declared = vec![
            entry("Clients", "View", false),
            entry("Projects", "CompleteArea", true),
        ];
        // Grants point at another role; the admin holds none directly.
        let grant_rows: Vec<(Uuid, Uuid)> =
            declared.iter().map(|e| (other_role, e.id)).collect();
        let catalog = PermissionCatalog::build(declared, grant_rows);
        let admin = subject(admin_role, "admin", &[]);

        let set = effective_permissions(&admin, &catalog);
        assert_eq!(set.capabilities.len(), 2);
        assert!(set.is_admin);
    }
}
