//! Resolved user snapshot used by the evaluator.
//!
//! The application layer reads the user row and, for operators, the area
//! assignments, then builds a [`Subject`]. The evaluator never touches
//! storage; it only sees this snapshot, so a check is one pure function
//! call over data resolved inside the current request.

use std::collections::BTreeSet;

use uuid::Uuid;

use crate::capability::normalize;

/// Account status. Anything that is not recognizably active is treated as
/// inactive, so a corrupt status value denies instead of granting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Inactive,
}

impl UserStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "active" => Self::Active,
            _ => Self::Inactive,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Role classification.
///
/// The assigned area set exists only on the `Operator` variant: a
/// non-operator with areas is unrepresentable, which is the invariant the
/// assignment store also enforces at its boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleClass {
    Admin,
    Supervisor,
    Operator { areas: BTreeSet<String> },
    Warehouse,
    Other,
}

impl RoleClass {
    /// Build a classification from the persisted tag. Unknown tags map to
    /// `Other` (no grants beyond what the catalog explicitly lists). The
    /// area set is only attached when the tag names an operator.
    pub fn classify(tag: &str, areas: BTreeSet<String>) -> Self {
        match tag.trim() {
            "admin" => Self::Admin,
            "supervisor" => Self::Supervisor,
            "operator" => Self::Operator { areas },
            "warehouse" => Self::Warehouse,
            _ => Self::Other,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn is_supervisor(&self) -> bool {
        matches!(self, Self::Supervisor)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Operator { .. })
    }

    pub fn is_warehouse(&self) -> bool {
        matches!(self, Self::Warehouse)
    }

    /// Assigned areas, present only for operators.
    pub fn areas(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::Operator { areas } => Some(areas),
            _ => None,
        }
    }
}

/// A user resolved for one authorization decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub user_id: Uuid,
    pub role_id: Uuid,
    pub role_name: String,
    pub status: UserStatus,
    pub class: RoleClass,
}

impl Subject {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Case-insensitive membership test against the assigned areas.
    /// Always false for non-operators.
    pub fn has_area(&self, name: &str) -> bool {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return false;
        }
        self.class
            .areas()
            .is_some_and(|areas| areas.iter().any(|a| normalize(a) == wanted))
    }
}
