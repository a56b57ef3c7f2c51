//! Capability identity.
//!
//! A capability is a (module, action) pair drawn from the administered
//! catalog. Two capability strings name the same capability iff their
//! normalized forms match, so `("Clients", "View")` and `(" clients ",
//! "view")` are one capability. The catalog and the evaluator only ever
//! compare [`CapabilityKey`] values, never raw strings.

use std::fmt;

/// Module names as declared in the administered catalog.
///
/// The catalog is data, not code; these constants exist so route bindings
/// and seeds reference one spelling.
pub mod modules {
    pub const CLIENTS: &str = "Clients";
    pub const PROJECTS: &str = "Projects";
    pub const INVENTORY: &str = "Inventory";
    pub const SUPPLIERS: &str = "Suppliers";
    pub const WORKSHOPS: &str = "Workshops";
    pub const USERS: &str = "Users";
    pub const AREAS: &str = "Areas";
    pub const PERMISSIONS: &str = "Permissions";
}

/// Action names as declared in the administered catalog.
pub mod actions {
    pub const VIEW: &str = "View";
    pub const CREATE: &str = "Create";
    pub const EDIT: &str = "Edit";
    pub const DELETE: &str = "Delete";
    pub const COMPLETE_AREA: &str = "CompleteArea";
    pub const ASSIGN_AREAS: &str = "AssignAreas";
    pub const RELOAD: &str = "Reload";
}

/// Trim and case-fold a capability or area name.
pub(crate) fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalized identity of one capability.
///
/// Construction fails (`None`) when either component is empty after
/// trimming; callers treat that as a denial, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CapabilityKey {
    module: String,
    action: String,
}

impl CapabilityKey {
    pub fn new(module: &str, action: &str) -> Option<Self> {
        let module = normalize(module);
        let action = normalize(action);
        if module.is_empty() || action.is_empty() {
            return None;
        }
        Some(Self { module, action })
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn action(&self) -> &str {
        &self.action
    }
}

impl fmt::Display for CapabilityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_normalizes_case_and_whitespace() {
        let a = CapabilityKey::new("Clients", "View").unwrap();
        let b = CapabilityKey::new(" clients ", "VIEW").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_distinguishes_different_capabilities() {
        let a = CapabilityKey::new("Clients", "View").unwrap();
        let b = CapabilityKey::new("Clients", "Edit").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_components_are_rejected() {
        assert!(CapabilityKey::new("", "View").is_none());
        assert!(CapabilityKey::new("Clients", "").is_none());
        assert!(CapabilityKey::new("   ", "View").is_none());
        assert!(CapabilityKey::new("Clients", "   ").is_none());
    }

    #[test]
    fn test_display_uses_normalized_form() {
        let key = CapabilityKey::new(" Projects ", "CompleteArea").unwrap();
        assert_eq!(key.to_string(), "projects.completearea");
    }
}
