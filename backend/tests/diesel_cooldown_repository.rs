//! `DieselCooldownRepository` against embedded PostgreSQL.

use arena_backend::domain::ports::CooldownRepository;
use arena_backend::domain::{ApplicationCooldown, UserId};
use arena_backend::outbound::persistence::DieselCooldownRepository;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rstest::{fixture, rstest};
use uuid::Uuid;

mod support;

use support::{TestDatabase, handle_cluster_setup_failure};

struct Context {
    db: TestDatabase,
    repository: DieselCooldownRepository,
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

/// Insert a user restricted until `now() + offset`.
fn restrict(db: &TestDatabase, username: &str, offset: Duration) -> ApplicationCooldown {
    let id = Uuid::new_v4();
    let email = format!("{username}@arena.test");
    let reason = format!("{username} cooling down");
    let expires_at = now() + offset;
    db.execute(
        "INSERT INTO users (id, email, username) VALUES ($1, $2, $3)",
        &[&id, &email, &username],
    );
    db.execute(
        "INSERT INTO application_cooldowns (user_id, reason, expires_at) VALUES ($1, $2, $3)",
        &[&id, &reason, &expires_at],
    );
    ApplicationCooldown {
        user_id: UserId::from_uuid(id),
        reason,
        expires_at,
    }
}

fn setup() -> Result<Context, String> {
    let db = TestDatabase::new()?;
    let repository = DieselCooldownRepository::new(db.pool.clone());
    Ok(Context { db, repository })
}

#[fixture]
fn context() -> Option<Context> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn only_unexpired_cooldowns_are_listed_soonest_first(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: only_unexpired_cooldowns_are_listed_soonest_first skipped");
        return;
    };
    let later = restrict(&ctx.db, "later", Duration::days(2));
    restrict(&ctx.db, "expired", -Duration::hours(1));
    restrict(&ctx.db, "boundary", Duration::zero());
    let sooner = restrict(&ctx.db, "sooner", Duration::hours(1));

    let active = ctx
        .db
        .runtime
        .block_on(ctx.repository.active_at(now()))
        .expect("query succeeds");

    assert_eq!(active, vec![sooner, later]);
}

#[rstest]
fn nothing_is_active_once_every_cooldown_lapses(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: nothing_is_active_once_every_cooldown_lapses skipped");
        return;
    };
    restrict(&ctx.db, "short", Duration::hours(1));
    restrict(&ctx.db, "long", Duration::days(2));

    let active = ctx
        .db
        .runtime
        .block_on(ctx.repository.active_at(now() + Duration::days(3)))
        .expect("query succeeds");

    assert!(active.is_empty());
}
