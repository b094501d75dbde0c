//! SeaORM database migrations.

pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_profiles;
mod m20261001_000002_create_scores;
mod m20261001_000003_create_personal_notes;
mod m20261001_000004_create_invite_codes;
mod m20261001_000005_add_profile_created_on;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_profiles::Migration),
            Box::new(m20261001_000002_create_scores::Migration),
            Box::new(m20261001_000003_create_personal_notes::Migration),
            Box::new(m20261001_000004_create_invite_codes::Migration),
            Box::new(m20261001_000005_add_profile_created_on::Migration),
        ]
    }
}
