//! Shared helpers for integration tests backed by a temporary SQLite file.

use client_registry::db::{DbPool, establish_connection_pool};
use client_registry::domain::client::Client;
use client_registry::repository::{ClientWriter, DieselRepository};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// A migrated database living in its own temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let path = dir.path().join(name);
        let url = path.to_str().expect("utf-8 database path");

        let pool = establish_connection_pool(url, 2).expect("connection pool");
        {
            let mut pooled = pool.get().expect("pooled connection");
            let conn: &mut SqliteConnection = &mut pooled;
            conn.run_pending_migrations(MIGRATIONS)
                .expect("pending migrations");
        }

        Self { _dir: dir, pool }
    }

    pub fn repository(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn client(name: &str, cpf: &str, income: f64, birth_date: &str, children: i32) -> Client {
    Client::new(
        None,
        name,
        cpf,
        income,
        birth_date.parse().expect("RFC 3339 timestamp"),
        children,
    )
}

/// Stores the sample clients in insertion order and returns them with ids.
pub fn seed_clients(repo: &DieselRepository) -> Vec<Client> {
    [
        client("Conceição Evaristo", "10619244881", 1500.0, "2020-07-13T20:50:00Z", 2),
        client("Carolina Maria de Jesus", "10419244771", 7500.0, "1996-12-23T07:00:00Z", 0),
        client("Jose Saramago", "10239254871", 5000.0, "1996-12-23T07:00:00Z", 0),
        client("Toni Morrison", "10219344681", 10000.0, "1940-02-23T07:00:00Z", 0),
        client("Djamila Ribeiro", "10619244884", 4500.0, "1975-11-10T07:00:00Z", 1),
        client("Jorge Amado", "10204374161", 2500.0, "1975-11-10T07:00:00Z", 0),
    ]
    .iter()
    .map(|c| repo.save_client(c).expect("seed client"))
    .collect()
}
