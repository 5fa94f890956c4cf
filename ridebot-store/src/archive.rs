//! SQLite archive: loads both collections at startup and rewrites them after
//! every committed mutation. The persisted format is an implementation detail
//! of this module; the store only sees the [`Archive`] trait.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

use crate::error::StoreError;
use crate::models::{Driver, Travel};

/// Persistence seam for the record store. `load_*` run once at process start;
/// `save_*` receive a full snapshot of the collection after a mutation.
#[async_trait]
pub trait Archive: Send + Sync {
    async fn load_drivers(&self) -> Result<Vec<Driver>, StoreError>;
    async fn load_travels(&self) -> Result<Vec<Travel>, StoreError>;
    async fn save_drivers(&self, drivers: &[Driver]) -> Result<(), StoreError>;
    async fn save_travels(&self, travels: &[Travel]) -> Result<(), StoreError>;
}

/// SQLite-backed [`Archive`]; creates the database file and tables if missing.
pub struct SqliteArchive {
    pool: SqlitePool,
}

impl SqliteArchive {
    /// Opens (or creates) the database at the given URL, e.g.
    /// `sqlite:ridebot.db` or `sqlite::memory:`.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        info!(database_url = %database_url, "Initializing SQLite archive");

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // Single connection: saves are whole-collection rewrites, and one
        // writer keeps `sqlite::memory:` databases alive across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let archive = Self { pool };
        archive.init().await?;
        Ok(archive)
    }

    async fn init(&self) -> Result<(), StoreError> {
        info!("Creating archive tables if not exist");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS drivers (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                vehicle TEXT NOT NULL,
                rating INTEGER NOT NULL,
                token TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS travels (
                id INTEGER PRIMARY KEY,
                destination TEXT NOT NULL,
                date TEXT NOT NULL,
                driver_token TEXT NOT NULL,
                price REAL NOT NULL,
                seats INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl Archive for SqliteArchive {
    async fn load_drivers(&self) -> Result<Vec<Driver>, StoreError> {
        let drivers = sqlx::query_as::<_, Driver>(
            "SELECT id, name, age, vehicle, rating, token FROM drivers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        info!(count = drivers.len(), "Loaded drivers from archive");
        Ok(drivers)
    }

    async fn load_travels(&self) -> Result<Vec<Travel>, StoreError> {
        let travels = sqlx::query_as::<_, Travel>(
            "SELECT id, destination, date, driver_token, price, seats FROM travels ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        info!(count = travels.len(), "Loaded travels from archive");
        Ok(travels)
    }

    async fn save_drivers(&self, drivers: &[Driver]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM drivers").execute(&mut *tx).await?;
        for driver in drivers {
            sqlx::query(
                "INSERT INTO drivers (id, name, age, vehicle, rating, token) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(driver.id)
            .bind(&driver.name)
            .bind(driver.age)
            .bind(&driver.vehicle)
            .bind(driver.rating)
            .bind(&driver.token)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save_travels(&self, travels: &[Travel]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM travels").execute(&mut *tx).await?;
        for travel in travels {
            sqlx::query(
                "INSERT INTO travels (id, destination, date, driver_token, price, seats) \
                 VALUES (?, ?, ?, ?, ?, ?)",
            )
            .bind(travel.id)
            .bind(&travel.destination)
            .bind(travel.date)
            .bind(&travel.driver_token)
            .bind(travel.price)
            .bind(travel.seats)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
