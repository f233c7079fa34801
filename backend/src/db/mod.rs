pub mod schema;
pub mod seed;

use diesel::sqlite::SqliteConnection;
use diesel::ConnectionError;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::{AsyncDieselConnectionManager, ManagerConfig};
use diesel_async::sync_connection_wrapper::SyncConnectionWrapper;
use diesel_async::{AsyncConnection, SimpleAsyncConnection};
use futures_util::FutureExt;
use thiserror::Error;

pub type DbConnection = SyncConnectionWrapper<SqliteConnection>;
pub type DbPool = Pool<DbConnection>;

/// Applied to every pooled connection. SQLite leaves foreign keys off by
/// default, and the part delete path relies on them being enforced.
const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;";

const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS czesci (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nazwa TEXT NOT NULL,
    kategoria TEXT NOT NULL,
    ilosc INTEGER NOT NULL,
    zarezerwowane INTEGER NOT NULL DEFAULT 0,
    min_stan INTEGER NOT NULL,
    status TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS dostawy (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    dostawca TEXT NOT NULL,
    czesc_id INTEGER NOT NULL,
    ilosc INTEGER NOT NULL,
    termin DATE NOT NULL,
    status TEXT NOT NULL,
    FOREIGN KEY(czesc_id) REFERENCES czesci(id)
);
CREATE TABLE IF NOT EXISTS harmonogram (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    zadanie TEXT NOT NULL,
    lokalizacja TEXT NOT NULL,
    zasob_id TEXT NOT NULL,
    priorytet TEXT NOT NULL,
    godzina TEXT NOT NULL,
    czas_trwania TEXT NOT NULL
);
"#;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("connection pool error: {0}")]
    Pool(String),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
}

fn establish_connection(
    database_url: &str,
) -> futures_util::future::BoxFuture<'_, diesel::ConnectionResult<DbConnection>> {
    let fut = async {
        let mut conn = DbConnection::establish(database_url).await?;
        conn.batch_execute(CONNECTION_PRAGMAS)
            .await
            .map_err(|e| ConnectionError::BadConnection(e.to_string()))?;
        Ok(conn)
    };
    fut.boxed()
}

pub fn build_pool(database_url: &str, max_size: usize) -> Result<DbPool, DbError> {
    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup = Box::new(establish_connection);

    let manager =
        AsyncDieselConnectionManager::<DbConnection>::new_with_config(database_url, manager_config);
    Pool::builder(manager)
        .max_size(max_size)
        .build()
        .map_err(|e| DbError::Pool(e.to_string()))
}

/// Creates missing tables and, when `seed` is set, fills an empty database
/// with sample rows.
pub async fn initialize(pool: &DbPool, seed: bool) -> Result<(), DbError> {
    let mut conn = pool.get().await.map_err(|e| DbError::Pool(e.to_string()))?;

    conn.batch_execute(CREATE_TABLES).await?;

    if seed {
        seed::seed_if_empty(&mut conn).await?;
    }

    Ok(())
}
