//! # Gestaller Core
//!
//! Pure authorization core for the Gestaller API.
//!
//! This crate holds the decision logic of the permission system and nothing
//! else: no HTTP, no storage, no IO. The application layer resolves a user
//! into a [`Subject`] snapshot and hands it, together with the current
//! [`PermissionCatalog`], to the evaluator.
//!
//! - [`capability`]: capability identity, normalized (module, action) keys
//! - [`subject`]: resolved user snapshot and role classification
//! - [`catalog`]: immutable capability/grant lookup with atomic swap
//! - [`evaluator`]: the allow/deny verdict and effective permission set
//!
//! Every ambiguity denies. An unknown user, an inactive user, an undeclared
//! capability, a missing area context for an area-scoped check: all of them
//! evaluate to `false`, never to an implicit grant.

pub mod capability;
pub mod catalog;
pub mod evaluator;
pub mod subject;

pub use capability::{CapabilityKey, actions, modules};
pub use catalog::{CapabilityEntry, CatalogHandle, PermissionCatalog};
pub use evaluator::{EffectivePermissionSet, effective_permissions, has_capability};
pub use subject::{RoleClass, Subject, UserStatus};
