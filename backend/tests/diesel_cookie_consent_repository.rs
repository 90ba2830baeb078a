//! `DieselCookieConsentRepository` against embedded PostgreSQL.

use arena_backend::domain::ports::CookieConsentRepository;
use arena_backend::domain::{CookieConsent, UNKNOWN_CLIENT_ATTRIBUTE};
use arena_backend::outbound::persistence::DieselCookieConsentRepository;
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

mod support;

use support::{TestDatabase, handle_cluster_setup_failure};

struct Context {
    db: TestDatabase,
    repository: DieselCookieConsentRepository,
}

fn setup() -> Result<Context, String> {
    let db = TestDatabase::new()?;
    let repository = DieselCookieConsentRepository::new(db.pool.clone());
    Ok(Context { db, repository })
}

#[fixture]
fn context() -> Option<Context> {
    match setup() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn consented_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .expect("valid instant")
}

fn stored_rows(ctx: &Context) -> Vec<(String, String, bool)> {
    ctx.db
        .client()
        .query(
            "SELECT ip_address, user_agent, accepted FROM cookie_consents ORDER BY recorded_at",
            &[],
        )
        .expect("select consents")
        .iter()
        .map(|row| (row.get(0), row.get(1), row.get(2)))
        .collect()
}

#[rstest]
#[case(1)]
#[case(3)]
fn each_insert_appends_a_row(context: Option<Context>, #[case] inserts: usize) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: each_insert_appends_a_row skipped");
        return;
    };
    let consent = CookieConsent::new(None, None, true, consented_at());

    ctx.db.runtime.block_on(async {
        for _ in 0..inserts {
            ctx.repository
                .insert(&consent)
                .await
                .expect("insert succeeds");
        }
    });

    let rows = stored_rows(&ctx);
    assert_eq!(rows.len(), inserts);
    assert!(rows.iter().all(|row| row
        == &(
            UNKNOWN_CLIENT_ATTRIBUTE.to_owned(),
            UNKNOWN_CLIENT_ATTRIBUTE.to_owned(),
            true
        )));
}

#[rstest]
fn normalised_client_attributes_are_stored(context: Option<Context>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: normalised_client_attributes_are_stored skipped");
        return;
    };
    let agent = "Mozilla/5.0 ".repeat(64);
    let forged = "x".repeat(512);
    let consents = [
        CookieConsent::new(Some("2001:db8::1"), Some(&agent), false, consented_at()),
        CookieConsent::new(Some(&forged), Some("curl/8.5"), true, consented_at()),
    ];

    ctx.db.runtime.block_on(async {
        for consent in &consents {
            ctx.repository
                .insert(consent)
                .await
                .expect("insert succeeds");
        }
    });

    let mut rows = stored_rows(&ctx);
    rows.sort();
    assert_eq!(
        rows,
        vec![
            ("2001:db8::1".to_owned(), agent.trim().to_owned(), false),
            (UNKNOWN_CLIENT_ATTRIBUTE.to_owned(), "curl/8.5".to_owned(), true),
        ]
    );
}
