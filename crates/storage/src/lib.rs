pub mod db;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("Stored unit symbol is not in the vocabulary: '{0}'")]
    CorruptUnit(String),
}

pub use db::{
    clear_measurements, create_db, get_all_measurements, get_measurements_by_unit,
    insert_measurement, DbPool, InsertOutcome,
};
