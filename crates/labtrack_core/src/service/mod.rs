//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the web layer decoupled from storage details.

pub mod association_service;
pub mod detail_service;
pub mod error;
