use crate::models::history::HistoryEntry;
use rusqlite::{params, Connection, Result};
use serde_json::Value;

const DB_SCHEMA_VERSION: i64 = 1;

pub fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;

    let mut version: i64 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    if version < 1 {
        apply_migration_1(conn)?;
        version = 1;
        conn.pragma_update(None, "user_version", version)?;
    }

    if version > DB_SCHEMA_VERSION {
        log::warn!("history database has newer schema version {version}");
    }

    Ok(())
}

fn apply_migration_1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS calculation_history (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            calculator TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            data_json TEXT NOT NULL DEFAULT 'null'
        );

        CREATE INDEX IF NOT EXISTS idx_history_calculator_seq ON calculation_history(calculator, seq);
        ",
    )
}

pub fn get_db_connection(data_dir: &str) -> Result<Connection> {
    let db_path = format!("{data_dir}/history.db");
    let conn = Connection::open(db_path)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

/// Insert a new entry for `calculator` and keep only the newest `limit` entries.
pub fn save_history_entry(
    conn: &Connection,
    calculator: &str,
    data: &Value,
    limit: usize,
) -> Result<HistoryEntry> {
    let entry = insert_entry(conn, calculator, data)?;
    trim_history(conn, calculator, limit)?;
    Ok(entry)
}

fn insert_entry(conn: &Connection, calculator: &str, data: &Value) -> Result<HistoryEntry> {
    let entry = HistoryEntry {
        id: uuid::Uuid::new_v4().to_string(),
        calculator: calculator.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        data: data.clone(),
    };
    let data_json = serde_json::to_string(&entry.data).unwrap_or_else(|_| "null".to_string());

    conn.execute(
        "INSERT INTO calculation_history (id, calculator, timestamp, data_json) VALUES (?1, ?2, ?3, ?4)",
        params![&entry.id, &entry.calculator, &entry.timestamp, data_json],
    )?;

    Ok(entry)
}

pub fn trim_history(conn: &Connection, calculator: &str, limit: usize) -> Result<usize> {
    let removed = conn.execute(
        "DELETE FROM calculation_history
         WHERE calculator = ?1
           AND seq NOT IN (
               SELECT seq FROM calculation_history WHERE calculator = ?1 ORDER BY seq DESC LIMIT ?2
           )",
        params![calculator, limit as i64],
    )?;
    if removed > 0 {
        log::debug!("trimmed {removed} history entries for {calculator}");
    }
    Ok(removed)
}

/// Entries for `calculator`, newest first.
pub fn list_history(conn: &Connection, calculator: &str) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        "SELECT id, calculator, timestamp, data_json FROM calculation_history WHERE calculator = ?1 ORDER BY seq DESC",
    )?;

    let entries = stmt
        .query_map(params![calculator], |row| {
            let data_json: String = row.get(3)?;
            Ok(HistoryEntry {
                id: row.get(0)?,
                calculator: row.get(1)?,
                timestamp: row.get(2)?,
                data: serde_json::from_str(&data_json).unwrap_or(Value::Null),
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(entries)
}

pub fn delete_history_entry(conn: &Connection, calculator: &str, id: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM calculation_history WHERE calculator = ?1 AND id = ?2",
        params![calculator, id],
    )
}

pub fn clear_history(conn: &Connection, calculator: &str) -> Result<usize> {
    conn.execute(
        "DELETE FROM calculation_history WHERE calculator = ?1",
        params![calculator],
    )
}

/// Replace every entry of `calculator` with `entries` (first element newest),
/// each under a fresh id and timestamp.
pub fn replace_history(
    conn: &Connection,
    calculator: &str,
    entries: &[Value],
    limit: usize,
) -> Result<Vec<HistoryEntry>> {
    let tx = conn.unchecked_transaction()?;
    clear_history(&tx, calculator)?;
    for data in entries.iter().rev() {
        insert_entry(&tx, calculator, data)?;
    }
    trim_history(&tx, calculator, limit)?;
    tx.commit()?;

    list_history(conn, calculator)
}

pub async fn history_crud(
    data_dir: String,
    operation: String,
    calculator: String,
    data: Option<Value>,
    id: Option<String>,
) -> Result<Value, String> {
    if calculator.trim().is_empty() {
        return Err("Calculator key required".to_string());
    }

    crate::commands::settings::ensure_data_dir(&data_dir)?;
    let conn = get_db_connection(&data_dir).map_err(|e| format!("DB error: {e}"))?;

    match operation.as_str() {
        "save" => {
            let data = data.ok_or("Data required for save")?;
            let limit = crate::commands::settings::load_effective_settings(&data_dir)?.history_limit;
            let entry = save_history_entry(&conn, &calculator, &data, limit)
                .map_err(|e| format!("Insert error: {e}"))?;
            log::info!("saved history entry {} for {calculator}", entry.id);
            Ok(serde_json::to_value(entry).unwrap_or_default())
        }
        "list" => {
            let entries = list_history(&conn, &calculator).map_err(|e| format!("Query error: {e}"))?;
            Ok(serde_json::to_value(entries).unwrap_or_default())
        }
        "delete" => {
            let id = id.ok_or("ID required for delete")?;
            delete_history_entry(&conn, &calculator, &id)
                .map_err(|e| format!("Delete error: {e}"))?;
            Ok(serde_json::json!({"status": "deleted", "id": id}))
        }
        "clear" => {
            let removed = clear_history(&conn, &calculator).map_err(|e| format!("Delete error: {e}"))?;
            log::info!("cleared {removed} history entries for {calculator}");
            Ok(serde_json::json!({"status": "cleared", "removed": removed}))
        }
        "load" => {
            let entries = match data {
                Some(Value::Array(items)) => items,
                _ => return Err("Array of entries required for load".to_string()),
            };
            let limit = crate::commands::settings::load_effective_settings(&data_dir)?.history_limit;
            let loaded = replace_history(&conn, &calculator, &entries, limit)
                .map_err(|e| format!("Load error: {e}"))?;
            Ok(serde_json::to_value(loaded).unwrap_or_default())
        }
        _ => Err(format!("Unknown operation: {operation}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        initialize_schema(&conn).expect("schema init");
        conn
    }

    #[test]
    fn schema_initializes_with_expected_version() {
        let conn = memory_db();
        let version: i64 = conn
            .pragma_query_value(None, "user_version", |row| row.get(0))
            .expect("schema version");
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn entries_are_listed_newest_first_per_calculator() {
        let conn = memory_db();
        save_history_entry(&conn, "loan", &json!({"amount": 1}), 50).expect("save");
        save_history_entry(&conn, "loan", &json!({"amount": 2}), 50).expect("save");
        save_history_entry(&conn, "cagr", &json!({"years": 5}), 50).expect("save");

        let loans = list_history(&conn, "loan").expect("list");
        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].data["amount"], json!(2));
        assert_eq!(loans[1].data["amount"], json!(1));
        assert_eq!(list_history(&conn, "cagr").expect("list").len(), 1);
    }

    #[test]
    fn retention_keeps_most_recent_entries() {
        let conn = memory_db();
        for n in 0..5 {
            save_history_entry(&conn, "tip", &json!({"n": n}), 3).expect("save");
        }

        let entries = list_history(&conn, "tip").expect("list");
        let kept: Vec<i64> = entries.iter().filter_map(|e| e.data["n"].as_i64()).collect();
        assert_eq!(kept, vec![4, 3, 2]);
    }

    #[test]
    fn delete_and_clear_are_scoped_to_calculator() {
        let conn = memory_db();
        let first = save_history_entry(&conn, "roi", &json!({}), 50).expect("save");
        save_history_entry(&conn, "roi", &json!({}), 50).expect("save");
        save_history_entry(&conn, "tip", &json!({}), 50).expect("save");

        assert_eq!(delete_history_entry(&conn, "tip", &first.id).expect("delete"), 0);
        assert_eq!(delete_history_entry(&conn, "roi", &first.id).expect("delete"), 1);
        assert_eq!(clear_history(&conn, "roi").expect("clear"), 1);
        assert!(list_history(&conn, "roi").expect("list").is_empty());
        assert_eq!(list_history(&conn, "tip").expect("list").len(), 1);
    }

    #[test]
    fn replace_history_preserves_supplied_order() {
        let conn = memory_db();
        save_history_entry(&conn, "loan", &json!({"old": true}), 50).expect("save");

        let loaded = replace_history(&conn, "loan", &[json!({"n": 1}), json!({"n": 2})], 50)
            .expect("replace");
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].data["n"], json!(1));
        assert_eq!(loaded[1].data["n"], json!(2));
        assert_ne!(loaded[0].id, loaded[1].id);
    }
}
