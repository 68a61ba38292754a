//! Domain layer for the Feedback Portal backend.
//!
//! This crate contains:
//! - Domain models (Feedback, Category, Tag, Question, Clarification)
//! - Content moderation and keyword extraction
//! - The AI categorization collaborator contract

pub mod models;
pub mod services;
