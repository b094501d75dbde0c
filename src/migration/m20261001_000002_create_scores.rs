//! Migration: Create scores table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE scores (
                    id UUID PRIMARY KEY, -- UUIDv7 for time-ordered sorting
                    -- No ON DELETE CASCADE: purges delete scores before the profile
                    user_id UUID NOT NULL REFERENCES profiles(id),
                    exam VARCHAR(100) NOT NULL,
                    correct INTEGER NOT NULL CHECK (correct >= 0),
                    total INTEGER NOT NULL CHECK (total > 0 AND correct <= total),
                    percentage DOUBLE PRECISION NOT NULL,
                    taken_on DATE NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_scores_user_id ON scores(user_id, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS scores CASCADE;")
            .await?;

        Ok(())
    }
}
