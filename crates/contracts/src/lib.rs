//! Shared contracts between the Vinops frontend and the backend REST API.
//!
//! Everything here is plain Rust (no browser bindings) so the validation
//! rules and the small layout/geo utilities can be unit tested on the host.

pub mod domain;
pub mod shared;
pub mod system;
