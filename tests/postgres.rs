//! Store tests against a real database.
//!
//! Requires `DATABASE_URL` pointing at a database with `sql/schema.sql` applied:
//! `cargo test --test postgres -- --ignored --test-threads=1`

use dotenv::dotenv;
use sqlx::PgPool;
use todoforge::{
    error::AppError,
    models::TaskChanges,
    store::{PgTaskStore, PgUserStore, TaskStore, UserStore},
};

async fn connect() -> PgPool {
    dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB")
}

#[ignore]
#[actix_rt::test]
async fn test_pg_task_lifecycle() {
    let pool = connect().await;
    let store = PgTaskStore::new(pool.clone());

    let created = store.create_task("pg lifecycle").await.unwrap();
    assert!(!created.completed);

    let updated = store
        .update_task(created.id, &TaskChanges::Completed(true))
        .await
        .unwrap()
        .expect("task should exist");
    assert!(updated.completed);
    assert_eq!(updated.text, "pg lifecycle");

    let listed = store.list_tasks().await.unwrap();
    assert!(listed.iter().any(|task| task.id == created.id));

    let deleted = store.delete_task(created.id).await.unwrap();
    assert_eq!(deleted.map(|task| task.id), Some(created.id));
    assert!(store.get_task(created.id).await.unwrap().is_none());
    assert!(store
        .update_task(created.id, &TaskChanges::Text("gone".into()))
        .await
        .unwrap()
        .is_none());

    pool.close().await;
}

#[ignore]
#[actix_rt::test]
async fn test_pg_duplicate_email_is_conflict() {
    let pool = connect().await;
    let email = "pg_duplicate@example.com";
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&pool)
        .await;

    let store = PgUserStore::new(pool.clone());
    let profile = store.create_user(email, "hash-one").await.unwrap();
    assert_eq!(profile.email, email);

    match store.create_user(email, "hash-two").await {
        Err(AppError::Conflict(msg)) => assert_eq!(msg, "Email already exists"),
        other => panic!("expected conflict, got {:?}", other),
    }

    let user = store.find_by_email(email).await.unwrap().unwrap();
    assert_eq!(user.password, "hash-one");

    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(&pool)
        .await;
    pool.close().await;
}
