//! # RepairSys API
//!
//! Typed access to the repair-shop backend.
//!
//! Every request goes through [`ApiClient::request`], which sends JSON,
//! carries the session cookie from the client's cookie jar and normalizes
//! error bodies into [`ApiError`]. The jar is shared by every clone of the
//! client, so the authentication gateway and the domain calls see the same
//! session.
//!
//! ## Endpoints
//!
//! - `/api/auth/verify`, `/api/auth/logout`, `/api/auth/*login` - session
//! - `/api/auth/client/*` - client portal reads and password change
//! - `/api/auth/admin/*` - shop-wide reads

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod paths;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use endpoints::MessageResponse;
pub use error::ApiError;
