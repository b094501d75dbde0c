//! Exam Portal Server library.
//!
//! Provides the user activity lifecycle (streaks, inactivity tiers, the
//! reaper), the storage layer, and the HTTP API of the exam-preparation
//! portal.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod lifecycle;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
pub mod store;
