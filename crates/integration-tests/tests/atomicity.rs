//! Transactional integrity tests against a live database.
//!
//! These tests require a migrated `PostgreSQL` database reachable via
//! `SARI_DATABASE_URL` (or `DATABASE_URL`). They talk to the repositories
//! directly rather than going through the HTTP surface.
//!
//! Run with: cargo test -p sari-integration-tests -- --ignored

use chrono::NaiveDate;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use sari_core::{OperatorCode, Password};
use sari_server::db::{OperatorRepository, PersonRepository, RepositoryError};
use sari_server::models::{NewPerson, PersonPatch};
use sari_server::services::auth::hash_password;

async fn test_pool() -> PgPool {
    let url = std::env::var("SARI_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("SARI_DATABASE_URL or DATABASE_URL not set");

    PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("Failed to connect to test database")
}

fn new_person(first_name: &str) -> NewPerson {
    NewPerson {
        birthdate: NaiveDate::from_ymd_opt(1991, 6, 15).expect("valid date"),
        first_name: first_name.to_owned(),
        last_name: "Reyes".to_owned(),
        middle_name: None,
        suffix: None,
    }
}

/// A failed operator insert must take the person created in the same
/// transaction down with it; no orphan rows survive the rollback.
#[tokio::test]
#[ignore = "Requires a migrated database"]
async fn test_failed_operator_insert_rolls_back_person() {
    let pool = test_pool().await;
    let password = Password::parse("Str0ng!Pass").expect("valid password");
    let hash = hash_password(&password).expect("hashing");

    // Occupy a code so the second insert collides on the unique constraint.
    let code = OperatorCode::generate();
    let mut tx = pool.begin().await.expect("begin");
    let anchor = PersonRepository::create_in_tx(&mut tx, &new_person("Iris"))
        .await
        .expect("anchor person");
    OperatorRepository::create_in_tx(&mut tx, anchor.id, &code, &hash)
        .await
        .expect("anchor operator");
    tx.commit().await.expect("commit");

    // Same sequence the composite creator runs, failing mid-transaction.
    let mut tx = pool.begin().await.expect("begin");
    let person = PersonRepository::create_in_tx(&mut tx, &new_person("Noel"))
        .await
        .expect("person insert");
    let err = OperatorRepository::create_in_tx(&mut tx, person.id, &code, &hash)
        .await
        .expect_err("duplicate code must fail");
    assert!(matches!(err, RepositoryError::Conflict(_)));
    drop(tx);

    let orphan = PersonRepository::new(&pool)
        .get_by_id(person.id)
        .await
        .expect("lookup");
    assert!(orphan.is_none(), "person row survived the rollback");

    // Cleanup; cascades to the anchor operator.
    PersonRepository::new(&pool)
        .delete(anchor.id)
        .await
        .expect("cleanup");
}

/// Two concurrent patches touching different fields must both survive;
/// the update locks the row for the read-merge-write cycle.
#[tokio::test]
#[ignore = "Requires a migrated database"]
async fn test_concurrent_patches_do_not_lose_updates() {
    let pool = test_pool().await;
    let repo = PersonRepository::new(&pool);
    let person = repo.create(&new_person("Mara")).await.expect("person");
    let id = person.id;

    let first_pool = pool.clone();
    let second_pool = pool.clone();
    let first = tokio::spawn(async move {
        PersonRepository::new(&first_pool)
            .update(
                id,
                &PersonPatch {
                    first_name: Some("Amara".to_owned()),
                    ..PersonPatch::default()
                },
            )
            .await
    });
    let second = tokio::spawn(async move {
        PersonRepository::new(&second_pool)
            .update(
                id,
                &PersonPatch {
                    suffix: Some("Jr.".to_owned()),
                    ..PersonPatch::default()
                },
            )
            .await
    });

    first.await.expect("join").expect("first patch");
    second.await.expect("join").expect("second patch");

    let updated = repo
        .get_by_id(id)
        .await
        .expect("lookup")
        .expect("person exists");
    assert_eq!(updated.first_name, "Amara");
    assert_eq!(updated.suffix.as_deref(), Some("Jr."));

    repo.delete(id).await.expect("cleanup");
}
