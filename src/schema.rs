use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum SchemaError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::Io(e) => write!(f, "schema file error: {}", e),
            SchemaError::Parse(e) => write!(f, "schema parse error: {}", e),
        }
    }
}

impl Error for SchemaError {}

impl From<std::io::Error> for SchemaError {
    fn from(e: std::io::Error) -> Self {
        SchemaError::Io(e)
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Parse(e)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
}

fn is_false(v: &bool) -> bool {
    !*v
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub columns: Vec<ColumnDef>,
}

/// Database schema used for prompt context and display. Tables and columns
/// keep their declaration order; the schema is never validated against a
/// real database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub database_name: String,
    pub tables: IndexMap<String, TableDef>,
}

impl Schema {
    /// Load the schema from a JSON file. If the file does not exist, the
    /// built-in e-commerce schema is written to that path and returned.
    /// Malformed JSON propagates to the caller unchanged.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            info!(
                "No schema file at {}, writing default schema",
                path.display()
            );
            let schema = Schema::default_ecommerce();
            schema.save(path)?;
            Ok(schema)
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SchemaError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The built-in four-table e-commerce schema used when no schema file
    /// is present.
    pub fn default_ecommerce() -> Self {
        let mut tables = IndexMap::new();
        tables.insert(
            "customers".to_string(),
            TableDef {
                columns: vec![
                    pk("customer_id", "INT"),
                    col("name", "VARCHAR(255)"),
                    col("email", "VARCHAR(255)"),
                    col("city", "VARCHAR(100)"),
                    col("country", "VARCHAR(100)"),
                    col("created_at", "DATETIME"),
                ],
            },
        );
        tables.insert(
            "orders".to_string(),
            TableDef {
                columns: vec![
                    pk("order_id", "INT"),
                    fk("customer_id", "INT", "customers.customer_id"),
                    col("order_date", "DATE"),
                    col("total_amount", "DECIMAL(10,2)"),
                    col("status", "VARCHAR(50)"),
                ],
            },
        );
        tables.insert(
            "products".to_string(),
            TableDef {
                columns: vec![
                    pk("product_id", "INT"),
                    col("name", "VARCHAR(255)"),
                    col("price", "DECIMAL(10,2)"),
                    col("category", "VARCHAR(100)"),
                    col("stock_quantity", "INT"),
                ],
            },
        );
        tables.insert(
            "order_items".to_string(),
            TableDef {
                columns: vec![
                    pk("item_id", "INT"),
                    fk("order_id", "INT", "orders.order_id"),
                    fk("product_id", "INT", "products.product_id"),
                    col("quantity", "INT"),
                    col("price", "DECIMAL(10,2)"),
                ],
            },
        );

        Schema {
            database_name: "ecommerce".to_string(),
            tables,
        }
    }

    /// Multi-line human-readable rendering: database header, then one block
    /// per table listing columns with PRIMARY KEY / FOREIGN KEY annotations.
    pub fn render_text(&self) -> String {
        let mut out = format!("Database: {}\n\n", self.database_name);

        for (table_name, table) in &self.tables {
            out.push_str(&format!("Table: {}\n", table_name));
            out.push_str("Columns:\n");
            for column in &table.columns {
                let mut line = format!("  - {} ({}", column.name, column.column_type);
                if column.primary_key {
                    line.push_str(", PRIMARY KEY");
                }
                if let Some(target) = &column.foreign_key {
                    line.push_str(&format!(", FOREIGN KEY -> {}", target));
                }
                line.push(')');
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Column names for a table, in declaration order. Unknown tables yield
    /// an empty list rather than an error.
    pub fn columns(&self, table_name: &str) -> Vec<&str> {
        self.tables
            .get(table_name)
            .map(|table| table.columns.iter().map(|c| c.name.as_str()).collect())
            .unwrap_or_default()
    }
}

fn col(name: &str, column_type: &str) -> ColumnDef {
    ColumnDef {
        name: name.to_string(),
        column_type: column_type.to_string(),
        primary_key: false,
        foreign_key: None,
    }
}

fn pk(name: &str, column_type: &str) -> ColumnDef {
    ColumnDef {
        primary_key: true,
        ..col(name, column_type)
    }
}

fn fk(name: &str, column_type: &str, target: &str) -> ColumnDef {
    ColumnDef {
        foreign_key: Some(target.to_string()),
        ..col(name, column_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schema_has_expected_tables_in_order() {
        let schema = Schema::default_ecommerce();
        assert_eq!(
            schema.table_names(),
            vec!["customers", "orders", "products", "order_items"]
        );
    }

    #[test]
    fn columns_preserve_declaration_order() {
        let schema = Schema::default_ecommerce();
        assert_eq!(
            schema.columns("orders"),
            vec![
                "order_id",
                "customer_id",
                "order_date",
                "total_amount",
                "status"
            ]
        );
    }

    #[test]
    fn columns_of_unknown_table_is_empty() {
        let schema = Schema::default_ecommerce();
        assert!(schema.columns("no_such_table").is_empty());
    }

    #[test]
    fn render_text_lists_every_table_and_column_once() {
        let schema = Schema::default_ecommerce();
        let text = schema.render_text();

        assert!(text.starts_with("Database: ecommerce\n\n"));
        for table_name in schema.table_names() {
            assert_eq!(
                text.matches(&format!("Table: {}\n", table_name)).count(),
                1
            );
        }
        assert!(text.contains("  - customer_id (INT, PRIMARY KEY)"));
        assert!(text.contains("  - customer_id (INT, FOREIGN KEY -> customers.customer_id)"));
        assert!(text.contains("  - status (VARCHAR(50))"));
    }

    #[test]
    fn load_writes_default_schema_when_file_missing() {
        let path = std::env::temp_dir().join(format!(
            "text2sql_schema_missing_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let schema = Schema::load(&path).unwrap();
        assert_eq!(schema.database_name, "ecommerce");
        assert!(path.exists());

        // A second load reads the persisted file back verbatim.
        let reloaded = Schema::load(&path).unwrap();
        assert_eq!(reloaded.table_names(), schema.table_names());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_and_load_round_trip_preserves_order_and_flags() {
        let path = std::env::temp_dir().join(format!(
            "text2sql_schema_roundtrip_{}.json",
            std::process::id()
        ));
        let schema = Schema::default_ecommerce();
        schema.save(&path).unwrap();

        let loaded = Schema::load(&path).unwrap();
        assert_eq!(loaded.table_names(), schema.table_names());
        let item_cols = &loaded.tables["order_items"].columns;
        assert!(item_cols[0].primary_key);
        assert_eq!(
            item_cols[1].foreign_key.as_deref(),
            Some("orders.order_id")
        );
        assert!(!item_cols[3].primary_key);
        assert!(item_cols[3].foreign_key.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_schema_file_surfaces_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "text2sql_schema_bad_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();

        match Schema::load(&path) {
            Err(SchemaError::Parse(_)) => {}
            other => panic!("expected parse error, got {:?}", other.map(|s| s.database_name)),
        }

        let _ = fs::remove_file(&path);
    }
}
