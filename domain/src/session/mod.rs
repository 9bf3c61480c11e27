//! Conversation messages sent to model endpoints.
//!
//! - [`entities::Message`] - a single role-tagged message
//! - [`entities::Role`] - system / user / assistant

pub mod entities;
