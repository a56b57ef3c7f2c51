//! # Gestaller API
//!
//! Backend for a production-workshop management application. The
//! interesting part of this crate is its authorization engine: every
//! privileged request is decided, at request time, from the user's role
//! grants and, for floor operators, their dynamically assigned areas.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Environment configuration (database, JWT, CORS)
//! ├── middleware/       # Identity extractor and the authorization gate
//! ├── modules/          # Feature modules
//! │   ├── users/       # User provisioning (create, status, role)
//! │   ├── areas/       # Area administration and user assignments
//! │   └── permissions/ # Catalog, evaluator service, effective sets
//! └── utils/            # Errors, JWT verification, pagination
//! ```
//!
//! Each feature module follows a consistent structure: `model.rs` (rows
//! and DTOs), `service.rs` (business logic), `controller.rs` (handlers),
//! `router.rs` (routes with their capability bindings).
//!
//! ## Authorization model
//!
//! Roles carry a classification (`admin`, `supervisor`, `operator`,
//! `warehouse`, `other`). Capabilities are (module, action) pairs from an
//! administered catalog; role grants are static. Operators additionally
//! hold a set of areas, and area-scoped capabilities require the request's
//! area context to match one of them. Admin is an unconditional bypass.
//! The pure decision logic lives in the `gestaller-core` crate; this crate
//! resolves users and areas fresh from the store on every check, so there
//! is no decision cache to go stale.
//!
//! Identity is external: requests arrive with an already-issued bearer
//! token and this crate only verifies it. Token issuance, passwords, and
//! session lifecycle are the identity provider's problem.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

// Re-export the decision core for consumers and tests.
pub use gestaller_core;
