//! # Navtrail Common
//!
//! Identifiers and collaborator traits shared by the navigation history core
//! and the editor hosts that embed it.

pub mod ids;
pub mod services;

pub use ids::*;
pub use services::*;
