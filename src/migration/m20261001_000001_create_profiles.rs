//! Migration: Create profiles table.
//!
//! One row per portal user, created when an invite code is redeemed.

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
                -- Function to auto-update updated_at timestamp
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = NOW();
                    RETURN NEW;
                END;
                $$ LANGUAGE plpgsql;

                CREATE TABLE profiles (
                    id UUID PRIMARY KEY,
                    username VARCHAR(32) NOT NULL,
                    -- LOWER(username), enforces case-insensitive uniqueness
                    username_key VARCHAR(32) NOT NULL,
                    role VARCHAR(20) NOT NULL DEFAULT 'student'
                        CHECK (role IN ('student', 'moderator', 'elite_moderator', 'super_user')),

                    -- Streak state (calendar days only, never timestamps)
                    streak_count INTEGER NOT NULL DEFAULT 0 CHECK (streak_count >= 0),
                    streak_points INTEGER NOT NULL DEFAULT 0 CHECK (streak_points >= 0),
                    last_mock_date DATE,

                    -- GPA accumulators
                    total_percentage_points DOUBLE PRECISION NOT NULL DEFAULT 0,
                    total_exams_completed INTEGER NOT NULL DEFAULT 0
                        CHECK (total_exams_completed >= 0),

                    -- SHA-256 of the personal access key
                    access_key_hash VARCHAR(64) NOT NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE UNIQUE INDEX idx_profiles_username_key ON profiles(username_key);

                -- Reaper scans by last activity
                CREATE INDEX idx_profiles_last_mock_date ON profiles(last_mock_date);

                CREATE TRIGGER update_profiles_updated_at
                    BEFORE UPDATE ON profiles
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TRIGGER IF EXISTS update_profiles_updated_at ON profiles;
                DROP TABLE IF EXISTS profiles CASCADE;
                DROP FUNCTION IF EXISTS update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }
}
