//! Test catalog database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::TestPrice;

impl Database {
    /// Insert a new catalog entry.
    pub fn insert_test_price(&self, test: &TestPrice) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO test_catalog (id, name, normal_range, price)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![test.id, test.name, test.normal_range, test.price],
        )?;
        Ok(())
    }

    /// Get a catalog entry by ID.
    pub fn get_test_price(&self, id: &str) -> DbResult<Option<TestPrice>> {
        self.conn
            .query_row(
                "SELECT id, name, normal_range, price FROM test_catalog WHERE id = ?",
                [id],
                test_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List the catalog in creation order.
    pub fn list_test_prices(&self) -> DbResult<Vec<TestPrice>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, normal_range, price FROM test_catalog ORDER BY rowid")?;

        let rows = stmt.query_map([], test_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Set the price of a catalog entry. Returns the updated entry if it exists.
    pub fn update_test_price(&self, id: &str, price: f64) -> DbResult<Option<TestPrice>> {
        let rows_affected = self.conn.execute(
            "UPDATE test_catalog SET price = ?, updated_at = datetime('now') WHERE id = ?",
            params![price, id],
        )?;
        if rows_affected == 0 {
            return Ok(None);
        }
        self.get_test_price(id)
    }
}

fn test_from_row(row: &Row<'_>) -> rusqlite::Result<TestPrice> {
    Ok(TestPrice {
        id: row.get(0)?,
        name: row.get(1)?,
        normal_range: row.get(2)?,
        price: row.get(3)?,
    })
}
