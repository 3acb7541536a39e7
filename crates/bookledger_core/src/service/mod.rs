//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate inventory commands and repository calls into use-case APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod library_service;
