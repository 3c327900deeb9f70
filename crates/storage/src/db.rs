use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use mensura_core::{Measurement, Unit};

use crate::StorageError;

pub type DbPool = Pool<Sqlite>;

pub async fn create_db(path: &Path) -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA synchronous = NORMAL")
        .execute(&pool)
        .await?;
    sqlx::query("PRAGMA busy_timeout = 5000")
        .execute(&pool)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS measurements (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            value REAL NOT NULL,
            unit TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE (value, unit)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Outcome of an insert against the `(value, unit)` uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The exact `(value, unit)` pair is already stored. Expected during
    /// normal operation, not an error.
    Duplicate,
}

pub async fn insert_measurement(
    pool: &DbPool,
    m: &Measurement,
) -> Result<InsertOutcome, StorageError> {
    let result = sqlx::query("INSERT INTO measurements (value, unit) VALUES (?, ?)")
        .bind(m.value)
        .bind(m.unit.symbol())
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(InsertOutcome::Inserted),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
        Err(e) => Err(e.into()),
    }
}

/// All stored measurements in ascending value order.
pub async fn get_all_measurements(pool: &DbPool) -> Result<Vec<Measurement>, StorageError> {
    let rows = sqlx::query_as::<_, (f64, String)>(
        "SELECT value, unit FROM measurements ORDER BY value",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(value, unit)| {
            let unit = Unit::from_str(&unit).map_err(|_| StorageError::CorruptUnit(unit.clone()))?;
            Ok(Measurement { value, unit })
        })
        .collect()
}

/// All stored values grouped by unit symbol, ascending within each group.
/// Groups come back in symbol order.
pub async fn get_measurements_by_unit(
    pool: &DbPool,
) -> Result<BTreeMap<String, Vec<f64>>, StorageError> {
    let rows = sqlx::query_as::<_, (f64, String)>(
        "SELECT value, unit FROM measurements ORDER BY unit, value",
    )
    .fetch_all(pool)
    .await?;

    let mut grouped: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (value, unit) in rows {
        grouped.entry(unit).or_default().push(value);
    }
    Ok(grouped)
}

/// Delete every stored measurement. Returns the number of rows removed.
pub async fn clear_measurements(pool: &DbPool) -> Result<u64, StorageError> {
    let result = sqlx::query("DELETE FROM measurements").execute(pool).await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> (tempfile::TempDir, DbPool) {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_db(&dir.path().join("test.db")).await.unwrap();
        (dir, pool)
    }

    #[tokio::test]
    async fn insert_then_duplicate() {
        let (_dir, pool) = test_db().await;
        let m = Measurement::new(23.5, Unit::Kg);

        assert_eq!(
            insert_measurement(&pool, &m).await.unwrap(),
            InsertOutcome::Inserted
        );
        assert_eq!(
            insert_measurement(&pool, &m).await.unwrap(),
            InsertOutcome::Duplicate
        );
    }

    #[tokio::test]
    async fn same_value_different_unit_is_not_a_duplicate() {
        let (_dir, pool) = test_db().await;

        insert_measurement(&pool, &Measurement::new(10.0, Unit::Kg))
            .await
            .unwrap();
        assert_eq!(
            insert_measurement(&pool, &Measurement::new(10.0, Unit::G))
                .await
                .unwrap(),
            InsertOutcome::Inserted
        );
    }

    #[tokio::test]
    async fn get_all_orders_by_value() {
        let (_dir, pool) = test_db().await;

        for m in [
            Measurement::new(50.0, Unit::Kg),
            Measurement::new(1.5, Unit::Ml),
            Measurement::new(23.5, Unit::Kg),
        ] {
            insert_measurement(&pool, &m).await.unwrap();
        }

        let all = get_all_measurements(&pool).await.unwrap();
        let values: Vec<f64> = all.iter().map(|m| m.value).collect();
        assert_eq!(values, vec![1.5, 23.5, 50.0]);
    }

    #[tokio::test]
    async fn micro_symbol_survives_a_round_trip() {
        let (_dir, pool) = test_db().await;

        insert_measurement(&pool, &Measurement::new(10.0, Unit::Ug))
            .await
            .unwrap();
        let all = get_all_measurements(&pool).await.unwrap();
        assert_eq!(all, vec![Measurement::new(10.0, Unit::Ug)]);
    }

    #[tokio::test]
    async fn grouped_retrieval_sorts_units_and_values() {
        let (_dir, pool) = test_db().await;

        for m in [
            Measurement::new(50.0, Unit::Kg),
            Measurement::new(2.0, Unit::G),
            Measurement::new(23.5, Unit::Kg),
        ] {
            insert_measurement(&pool, &m).await.unwrap();
        }

        let grouped = get_measurements_by_unit(&pool).await.unwrap();
        let keys: Vec<&str> = grouped.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["g", "kg"]);
        assert_eq!(grouped["kg"], vec![23.5, 50.0]);
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (_dir, pool) = test_db().await;

        insert_measurement(&pool, &Measurement::new(1.0, Unit::L))
            .await
            .unwrap();
        insert_measurement(&pool, &Measurement::new(2.0, Unit::L))
            .await
            .unwrap();

        assert_eq!(clear_measurements(&pool).await.unwrap(), 2);
        assert!(get_all_measurements(&pool).await.unwrap().is_empty());
    }
}
