//! Homework submission
//!
//! `rules` decides whether an assignment accepts uploads right now, `locks`
//! serializes submissions of one student for one assignment, and `service`
//! runs the whole check, store and replace sequence against a
//! [`SubmissionStore`].

pub mod locks;
pub mod rules;
pub mod service;
pub mod store;

pub use locks::KeyedLocks;
pub use rules::{evaluate, RejectReason, WindowDecision};
pub use service::{HomeworkService, SubmissionRequest};
pub use store::{PgSubmissionStore, SubmissionStore};
