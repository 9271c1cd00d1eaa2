//! HTTP API surface.
//!
//! Four groups:
//! - `public`    – anonymous browse/search endpoints (`/api/...`)
//! - `user`      – signed-in operations (`/api/user/...`)
//! - `admin`     – admin review operations (`/api/admin/...`)
//! - `internal`  – scheduler-triggered operations (`/api/internal/...`)

pub mod admin;
pub mod extractors;
pub mod internal;
pub mod public;
pub mod user;
