//! linkvault-core - Core library for LinkVault
//!
//! This crate contains the shared models, the REST API client, the session
//! store and the client-side collection state used by every LinkVault
//! interface.

pub mod api;
pub mod auth;
pub mod collections;
pub mod config;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod models;
pub mod routes;
pub mod scope;
pub mod session;
pub mod share;
pub mod shared;
pub mod util;

pub use error::{Error, Result};
pub use models::{Folder, FolderId, Link, LinkId, LinkType};
