//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep outer layers (CLI, web) decoupled from storage and rendering.

pub mod cat_service;
