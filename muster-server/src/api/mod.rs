//! HTTP API surface
//!
//! One module per resource; each exposes a `router()` merged by the
//! server bootstrap.

pub mod attendance;
pub mod employees;
pub mod exports;
pub mod health;
pub mod settings;
pub mod shifts;
pub mod workspaces;
