//! Schema-validated conversion of raw value grids into typed records.
//!
//! Spreadsheet reads come back as loosely-typed grids. Everything the form
//! logic consumes passes through here first, so a missing column fails fast
//! with a named error instead of surfacing as a lookup failure deep inside
//! a submission.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use storewatch_core::{CatalogEntry, GuardRosterEntry, Sku, WarehouseUser};

use crate::sheets::ValueGrid;

/// Errors converting a value grid into typed records.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    /// The grid had no header row.
    #[error("table {table} is empty")]
    Empty {
        /// Table name.
        table: &'static str,
    },

    /// An expected column is absent from the header row.
    #[error("table {table} is missing column {column:?}")]
    MissingColumn {
        /// Table name.
        table: &'static str,
        /// The absent column.
        column: &'static str,
    },
}

/// A header-indexed view over a value grid.
struct GridReader {
    table: &'static str,
    header: HashMap<String, usize>,
    rows: Vec<Vec<Value>>,
}

impl GridReader {
    fn new(table: &'static str, mut grid: ValueGrid) -> Result<Self, TableError> {
        if grid.is_empty() {
            return Err(TableError::Empty { table });
        }
        let header_row = grid.remove(0);
        let header = header_row
            .iter()
            .enumerate()
            .map(|(i, cell)| (cell_text(cell).trim().to_owned(), i))
            .collect();
        Ok(Self {
            table,
            header,
            rows: grid,
        })
    }

    fn column(&self, name: &'static str) -> Result<usize, TableError> {
        self.header
            .get(name)
            .copied()
            .ok_or(TableError::MissingColumn {
                table: self.table,
                column: name,
            })
    }
}

/// Render a cell as text. Numbers keep their canonical form; everything
/// else that is not a string renders empty.
fn cell_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Parse a cell as an integer, accepting numeric strings as the sheet
/// sometimes returns them.
fn cell_i64(cell: &Value) -> Option<i64> {
    match cell {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn row_cell<'a>(row: &'a [Value], index: usize) -> &'a Value {
    row.get(index).unwrap_or(&Value::Null)
}

/// Convert the `VIGILANTES` grid into guard roster entries.
///
/// Rows with a blank guard name or an unparseable store id are skipped, the
/// way the original selectors dropped blank roster rows.
///
/// # Errors
///
/// Returns [`TableError`] when the grid is empty or a column is absent.
pub fn parse_guards(grid: ValueGrid) -> Result<Vec<GuardRosterEntry>, TableError> {
    let reader = GridReader::new("VIGILANTES", grid)?;
    let store_col = reader.column("ID_TIENDA")?;
    let name_col = reader.column("NOMBRE VIGILANTE")?;

    Ok(reader
        .rows
        .iter()
        .filter_map(|row| {
            let store_id = cell_i64(row_cell(row, store_col))?;
            let guard_name = cell_text(row_cell(row, name_col));
            let guard_name = guard_name.trim();
            if guard_name.is_empty() {
                return None;
            }
            Some(GuardRosterEntry {
                store_id,
                guard_name: guard_name.to_owned(),
            })
        })
        .collect())
}

/// Convert the `HFB` grid into catalog entries, normalizing SKUs on load.
///
/// # Errors
///
/// Returns [`TableError`] when the grid is empty or a column is absent.
pub fn parse_catalog(grid: ValueGrid) -> Result<Vec<CatalogEntry>, TableError> {
    let reader = GridReader::new("HFB", grid)?;
    let sku_col = reader.column("SKU")?;
    let item_col = reader.column("ITEM")?;
    let family_col = reader.column("FAMILIA")?;

    Ok(reader
        .rows
        .iter()
        .filter_map(|row| {
            let raw_sku = cell_text(row_cell(row, sku_col));
            if raw_sku.trim().is_empty() {
                return None;
            }
            Some(CatalogEntry {
                sku: Sku::normalize(&raw_sku),
                item: cell_text(row_cell(row, item_col)).trim().to_owned(),
                family: cell_text(row_cell(row, family_col)).trim().to_owned(),
            })
        })
        .collect())
}

/// Convert the `USUARIO WH` grid into warehouse users.
///
/// # Errors
///
/// Returns [`TableError`] when the grid is empty or a column is absent.
pub fn parse_warehouse_users(grid: ValueGrid) -> Result<Vec<WarehouseUser>, TableError> {
    let reader = GridReader::new("USUARIO WH", grid)?;
    let name_col = reader.column("NOMBRE")?;
    let username_col = reader.column("USUARIO")?;

    Ok(reader
        .rows
        .iter()
        .filter_map(|row| {
            let username = cell_text(row_cell(row, username_col));
            let username = username.trim();
            if username.is_empty() {
                return None;
            }
            Some(WarehouseUser {
                name: cell_text(row_cell(row, name_col)).trim().to_owned(),
                username: username.to_owned(),
            })
        })
        .collect())
}
