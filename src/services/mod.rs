//! Business logic services.

pub mod admin;
pub mod invites;
pub mod leaderboard;
pub mod login;
pub mod notes;
pub mod reaper;
pub mod scores;

pub use reaper::{run_reaper_sweep, start_reaper_task};
