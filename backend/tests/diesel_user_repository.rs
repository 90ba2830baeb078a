//! `DieselUserRepository` against embedded PostgreSQL.
//!
//! Seeds rows directly so the adapter's SQL, not its own writes, is what gets
//! checked: email matching must ignore case the way the `lower(email)` unique
//! index does.

use arena_backend::domain::ports::UserRepository;
use arena_backend::domain::{Email, Role, UserId};
use arena_backend::outbound::persistence::DieselUserRepository;
use rstest::{fixture, rstest};
use uuid::Uuid;

mod support;

use support::{TestDatabase, handle_cluster_setup_failure};

const STORED_EMAIL: &str = "Mixed.Case@Arena.test";

struct Context {
    db: TestDatabase,
    repository: DieselUserRepository,
    user_id: Uuid,
}

fn setup() -> Result<Context, String> {
    let db = TestDatabase::new()?;
    let user_id = Uuid::new_v4();
    db.execute(
        "INSERT INTO users (id, email, username, role) VALUES ($1, $2, $3, 'member')",
        &[&user_id, &STORED_EMAIL, &"mixed"],
    );
    let repository = DieselUserRepository::new(db.pool.clone());
    Ok(Context {
        db,
        repository,
        user_id,
    })
}

#[fixture]
fn context() -> Option<Context> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn stored_role(ctx: &Context) -> String {
    ctx.db
        .client()
        .query_one("SELECT role FROM users WHERE id = $1", &[&ctx.user_id])
        .expect("seeded user exists")
        .get(0)
}

#[rstest]
#[case("mixed.case@arena.test")]
#[case("MIXED.CASE@ARENA.TEST")]
fn update_role_matches_email_case_insensitively(
    context: Option<Context>,
    #[case] lookup: &str,
) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: update_role_matches_email_case_insensitively skipped");
        return;
    };
    let email = Email::new(lookup).expect("valid email");

    let updated = ctx
        .db
        .runtime
        .block_on(ctx.repository.update_role(&email, Role::Admin))
        .expect("update succeeds")
        .expect("user matched");

    assert_eq!(updated.id(), &UserId::from_uuid(ctx.user_id));
    assert_eq!(updated.role(), Role::Admin);
    assert_eq!(updated.email().as_ref(), STORED_EMAIL);
    assert_eq!(stored_role(&ctx), "admin");
}

#[rstest]
fn update_role_for_unknown_email_changes_nothing(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: update_role_for_unknown_email_changes_nothing skipped");
        return;
    };
    let email = Email::new("nobody@arena.test").expect("valid email");

    let updated = ctx
        .db
        .runtime
        .block_on(ctx.repository.update_role(&email, Role::Admin))
        .expect("update succeeds");

    assert!(updated.is_none());
    assert_eq!(stored_role(&ctx), "member");
}

#[rstest]
fn lookups_resolve_seeded_rows(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: lookups_resolve_seeded_rows skipped");
        return;
    };
    let email = Email::new("mixed.case@ARENA.test").expect("valid email");

    let (by_email, by_id, missing) = ctx.db.runtime.block_on(async {
        (
            ctx.repository.find_by_email(&email).await,
            ctx.repository
                .find_by_id(&UserId::from_uuid(ctx.user_id))
                .await,
            ctx.repository.find_by_id(&UserId::random()).await,
        )
    });

    let by_email = by_email.expect("query succeeds").expect("user by email");
    assert_eq!(by_email.username(), "mixed");
    assert_eq!(by_email.role(), Role::Member);
    assert_eq!(by_id.expect("query succeeds"), Some(by_email));
    assert!(missing.expect("query succeeds").is_none());
}
