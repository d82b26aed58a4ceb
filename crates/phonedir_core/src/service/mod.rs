//! Core use-case services.
//!
//! # Responsibility
//! - Turn caller input (CLI/UI forms) into directory operations.
//! - Keep collaborators decoupled from snapshot storage details.

pub mod directory_service;
