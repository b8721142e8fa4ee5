//! Typestate SQL builders.
//!
//! Incomplete statements do not compile: `build()` only exists once every
//! mandatory clause has been supplied. Values are always collected as bound
//! parameters; only identifiers end up in the SQL text.
//!
//! # Example
//!
//! ```rust
//! use explorer_core::builder::{Select, col};
//!
//! let (sql, params) = Select::new()
//!     .columns(&["id", "name"])
//!     .from("users")
//!     .where_clause(col("id").eq(7_i64))
//!     .build();
//!
//! assert_eq!(sql, "SELECT id, name FROM users WHERE id = ?");
//! assert_eq!(params.len(), 1);
//! ```

mod delete;
mod expr;
mod insert;
mod select;
mod update;
pub mod value;

pub use delete::{SafeDelete, SafeDeleteWithWhere};
pub use expr::{col, Column, ExprBuilder};
pub use insert::Insert;
pub use select::Select;
pub use update::{Update, UpdateWithWhere};
pub use value::{SqlValue, ToSqlValue};
