//! Shared test helpers for PostgreSQL tests.

use std::sync::LazyLock;

use chrono::{NaiveDate, Utc};
use exam_portal_lib::auth::hash_access_key;
use exam_portal_lib::config::{Config, DatabaseSettings, Environment, StoreBackend};
use exam_portal_lib::db::DbPool;
use exam_portal_lib::models::{InviteCode, NewProfile, ProfilePatch, Role, UserProfile};
use exam_portal_lib::store::{PortalStore, Redemption};
use secrecy::SecretString;
use tokio::sync::OnceCell;
use uuid::Uuid;

static MIGRATIONS_RUN: LazyLock<OnceCell<()>> = LazyLock::new(OnceCell::new);

fn test_config(url: String) -> Config {
    Config {
        environment: Environment::Development,
        host: "127.0.0.1".to_string(),
        port: 0,
        store: StoreBackend::Postgres,
        database: DatabaseSettings {
            url,
            max_connections: 4,
            min_connections: 1,
            connect_timeout_secs: 5,
        },
        admin_key: None,
        session_secret: SecretString::from("test-session-secret-for-postgres".to_string()),
        session_ttl_secs: 3600,
        utc_offset_minutes: 0,
        reaper_interval_secs: 0,
    }
}

/// Connect to `DATABASE_URL`, or `None` when it is not configured.
/// Migrations run only once per test binary.
pub async fn create_test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL test");
        return None;
    };

    let pool = DbPool::new(&test_config(url))
        .await
        .expect("Failed to connect to database");

    MIGRATIONS_RUN
        .get_or_init(|| async {
            pool.run_migrations()
                .await
                .expect("Failed to run migrations");
        })
        .await;

    Some(pool)
}

/// Generate a unique username for test isolation.
pub fn unique_name(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..12])
}

/// Insert an unused invite code and return it.
pub async fn create_invite(pool: &DbPool, role: Role) -> String {
    let code = format!("inv_{}", Uuid::new_v4().simple());
    pool.insert_invite(&InviteCode {
        code: code.clone(),
        role,
        created_at: Utc::now(),
        used_by: None,
        used_at: None,
    })
    .await
    .expect("Failed to insert invite");
    code
}

pub fn new_profile(username: &str, created_on: NaiveDate) -> NewProfile {
    NewProfile {
        id: Uuid::now_v7(),
        username: username.to_string(),
        role: Role::Student,
        access_key_hash: hash_access_key("pk_postgres_test"),
        created_at: created_on.and_hms_opt(12, 0, 0).unwrap().and_utc(),
        created_on,
    }
}

/// Create a profile through invite redemption, then set its last activity.
pub async fn seed_profile(
    pool: &DbPool,
    role: Role,
    created_on: NaiveDate,
    last_mock_date: Option<NaiveDate>,
) -> UserProfile {
    let code = create_invite(pool, role).await;
    let mut new = new_profile(&unique_name("pg"), created_on);
    new.role = role;

    let profile = match pool.redeem_invite(&code, new).await.unwrap() {
        Redemption::Created(profile) => profile,
        other => panic!("expected a new profile, got {:?}", other),
    };

    if last_mock_date.is_none() {
        return profile;
    }

    let patch = ProfilePatch {
        last_mock_date: Some(last_mock_date),
        ..Default::default()
    };
    pool.update_profile(profile.id, &patch)
        .await
        .unwrap()
        .expect("seeded profile vanished")
}

/// Today's UTC day, for rows that must never look stale to other tests.
pub fn real_today() -> NaiveDate {
    Utc::now().date_naive()
}
