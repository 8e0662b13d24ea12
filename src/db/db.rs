use crate::db::migrations::init_with_migrations;
use crate::libs::data_storage::DataStorage;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "appwarden.db";

/// An open database with every migration applied.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens the database in the user data directory.
    pub fn new() -> Result<Db> {
        let db_file_path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(&db_file_path)
    }

    pub fn open(path: &Path) -> Result<Db> {
        let conn = Connection::open(path)?;
        Self::prepare(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        let conn = Connection::open_in_memory()?;
        Self::prepare(conn)
    }

    /// Hands the connection over for sharing between stores.
    pub fn shared(self) -> Arc<Mutex<Connection>> {
        Arc::new(Mutex::new(self.conn))
    }

    fn prepare(mut conn: Connection) -> Result<Db> {
        // The daemon and CLI commands may write at the same time.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
