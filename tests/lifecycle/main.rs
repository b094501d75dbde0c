//! Lifecycle E2E test suite.
//!
//! Drives the HTTP API over the in-memory store with a pinned clock:
//! redemption and login, streak evaluation, score credit, the leaderboard,
//! role changes and the reaper.
//!
//! Run with: cargo test --test lifecycle

mod test_helpers;

mod test_admin;
mod test_leaderboard;
mod test_reaper;
mod test_session;
