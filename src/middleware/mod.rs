//! Request middleware.
//!
//! - [`auth`]: bearer-token identity extractor
//! - [`gate`]: capability enforcement bound per route at registration time

pub mod auth;
pub mod gate;
