use super::error::{RepoError, RepoResult};
use rusqlite::Connection;

/// Fails with `MissingRequiredTable` unless `table` exists.
pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(RepoError::MissingRequiredTable(table))
    }
}
