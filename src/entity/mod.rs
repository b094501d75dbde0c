//! SeaORM entity definitions for PostgreSQL database.

pub mod invite_code;
pub mod personal_note;
pub mod profile;
pub mod score;
