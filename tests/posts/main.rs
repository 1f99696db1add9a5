//! Post repository integration tests.
//!
//! - Id allocation under concurrent creates
//! - Per-post locking: independence, blocking, and removal while waited on
//! - Forum flows racing on the same post
//! - Store failures surfacing without leaving posts locked

#[path = "../support/mod.rs"]
mod support;

mod flows;
