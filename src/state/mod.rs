/// State management module
///
/// This module handles all gallery state, including:
/// - Shared data structures and size formatting (data.rs)
/// - The session controller: records, viewer and prompts (session.rs)

pub mod data;
pub mod session;
