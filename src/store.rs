//! SQLite record store.
//!
//! Owns the database connection and its schema: two wide, date-keyed data
//! tables that gain one `REAL` column per station as stations are
//! discovered, and two station metadata tables. All writes go through a
//! [`StoreTransaction`] so that one archive entry is committed as a unit.

use crate::constants::DATE_COLUMN;
use crate::error::Result;
use crate::models::Category;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use std::path::Path;
use tracing::debug;

/// Persistent store for station metadata and measurements
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        debug!("Opening database {}", path.display());
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the data and station tables if they do not exist yet
    ///
    /// Existing tables, columns and rows are left untouched, so this is
    /// safe to run against a database from an earlier import.
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(&format!(
            "BEGIN;
             CREATE TABLE IF NOT EXISTS {water_data} ({date} TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS {water_stations} (
                 id TEXT PRIMARY KEY,
                 name TEXT,
                 \"offset\" REAL
             );
             CREATE TABLE IF NOT EXISTS {rain_data} ({date} TEXT PRIMARY KEY);
             CREATE TABLE IF NOT EXISTS {rain_stations} (
                 id TEXT PRIMARY KEY,
                 name TEXT
             );
             COMMIT;",
            water_data = quote_identifier(Category::Water.data_table()),
            water_stations = quote_identifier(Category::Water.stations_table()),
            rain_data = quote_identifier(Category::Rain.data_table()),
            rain_stations = quote_identifier(Category::Rain.stations_table()),
            date = quote_identifier(DATE_COLUMN),
        ))?;
        Ok(())
    }

    /// Start a transaction covering the writes of one archive entry
    pub fn transaction(&mut self) -> Result<StoreTransaction<'_>> {
        Ok(StoreTransaction {
            tx: self.conn.transaction()?,
        })
    }

    /// Station columns currently present on the category's data table
    pub fn station_columns(&self, category: Category) -> Result<Vec<String>> {
        station_columns(&self.conn, category)
    }

    /// Stored value for one station on one date; `None` if the row is
    /// missing or the value is null
    pub fn measurement(
        &self,
        category: Category,
        date: &str,
        station_id: &str,
    ) -> Result<Option<f64>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ?1",
            quote_identifier(station_id),
            quote_identifier(category.data_table()),
            quote_identifier(DATE_COLUMN),
        );
        let value = self
            .conn
            .query_row(&sql, params![date], |row| row.get::<_, Option<f64>>(0))
            .optional()?;
        Ok(value.flatten())
    }

    /// Number of distinct dates stored for the category
    pub fn row_count(&self, category: Category) -> Result<usize> {
        let sql = format!(
            "SELECT COUNT(*) FROM {}",
            quote_identifier(category.data_table())
        );
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Display name recorded for a station
    pub fn station_name(&self, category: Category, station_id: &str) -> Result<Option<String>> {
        let sql = format!(
            "SELECT name FROM {} WHERE id = ?1",
            quote_identifier(category.stations_table())
        );
        let name = self
            .conn
            .query_row(&sql, params![station_id], |row| row.get::<_, Option<String>>(0))
            .optional()?;
        Ok(name.flatten())
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> Result<()> {
        self.conn.close().map_err(|(_, err)| err)?;
        debug!("Database connection closed");
        Ok(())
    }
}

/// Writes for one archive entry, committed together
///
/// Dropping the transaction without calling [`StoreTransaction::commit`]
/// rolls back everything written through it.
pub struct StoreTransaction<'a> {
    tx: Transaction<'a>,
}

impl StoreTransaction<'_> {
    /// Add a `REAL` column for `station_id` unless the table already has one
    ///
    /// Returns `true` when the column was added.
    pub fn ensure_station_column(&self, category: Category, station_id: &str) -> Result<bool> {
        let existing = station_columns(&self.tx, category)?;
        if existing.iter().any(|column| column == station_id) {
            return Ok(false);
        }

        self.tx.execute(
            &format!(
                "ALTER TABLE {} ADD COLUMN {} REAL",
                quote_identifier(category.data_table()),
                quote_identifier(station_id)
            ),
            [],
        )?;
        debug!("Added column {} to {}", station_id, category.data_table());
        Ok(true)
    }

    /// Insert a station or refresh its display name
    ///
    /// Only `name` is overwritten for a known station; other metadata
    /// columns keep their stored values.
    pub fn upsert_station_metadata(
        &self,
        category: Category,
        station_id: &str,
        name: &str,
    ) -> Result<()> {
        let sql = format!(
            "INSERT INTO {} (id, name) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
            quote_identifier(category.stations_table())
        );
        self.tx
            .prepare_cached(&sql)?
            .execute(params![station_id, name])?;
        Ok(())
    }

    /// Set one station's value for `date`, keeping other stations' values
    /// on that row intact
    pub fn upsert_measurement(
        &self,
        category: Category,
        date: &str,
        station_id: &str,
        value: Option<f64>,
    ) -> Result<()> {
        let column = quote_identifier(station_id);
        let date_column = quote_identifier(DATE_COLUMN);
        let sql = format!(
            "INSERT INTO {table} ({date_column}, {column}) VALUES (?1, ?2)
             ON CONFLICT({date_column}) DO UPDATE SET {column} = excluded.{column}",
            table = quote_identifier(category.data_table()),
        );
        self.tx.prepare_cached(&sql)?.execute(params![date, value])?;
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}

fn station_columns(conn: &Connection, category: Category) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;
    let columns = stmt
        .query_map(params![category.data_table()], |row| row.get::<_, String>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns
        .into_iter()
        .filter(|column| column != DATE_COLUMN)
        .collect())
}

/// Quote an SQL identifier, doubling any embedded quotes
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
