//! # RepairSys Model
//!
//! Domain types shared by the client portal and the staff console.
//!
//! ## Contents
//!
//! - Identities and the per-application role enums
//! - Machines, repair statuses and client records as served by the backend
//! - Derived views: dashboard statistics, list filters, display helpers
//! - Form types whose validation runs before anything reaches the network

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod credentials;
pub mod display;
pub mod error;
pub mod filter;
pub mod identity;
pub mod machine;
pub mod password;
pub mod stats;

pub use client::ClientRecord;
pub use credentials::Credentials;
pub use error::ValidationError;
pub use filter::{search_clients, MachineFilter, StatusFilter};
pub use identity::{AccessRole, Identity, PortalRole, StaffRole};
pub use machine::{Machine, MachineStatus, PersonRef};
pub use password::{PasswordChange, MIN_PASSWORD_LEN};
pub use stats::{AdminStats, MachineStats};
