//! Payment status workflow client for contest team registrations.
//!
//! Loads a registration's payment record from the backend, validates
//! user-entered payment claims, submits them, and derives the display
//! state (`Loading`, `Verified`, `Processing`, `AwaitingSubmission`).

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
