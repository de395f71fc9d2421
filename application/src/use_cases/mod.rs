//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod find_meeting_point;
pub mod request_replacement;
pub mod session_controller;
