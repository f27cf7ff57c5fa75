//! # Hashy
//!
//! From-scratch open-addressing hash tables, built without the standard
//! library's map types as a study of collision resolution.
//!
//! This crate provides two table families behind one [`HashTable`] contract:
//!
//! - [`LinearProbeTable`]: single-step linear probing with a pluggable hash
//!   strategy and eager compaction on delete. [`DateTable`] specializes it
//!   for 10-character calendar-date keys with a hash that maps a date stream
//!   almost collision-free.
//! - [`LazyDoubleTable`]: double hashing with lazy tombstone deletion; the
//!   probe step is forced coprime with the capacity so every probe sequence
//!   is a full cycle.
//!
//! Both tables are single-threaded, string-keyed, and grow along a fixed
//! ascending capacity sequence captured at construction.
//!
//! ## Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), hashy::TableError> {
//! use hashy::{HashTable, LazyDoubleTable};
//!
//! let mut table = LazyDoubleTable::new();
//!
//! // Insert and look up values
//! table.set("apple", 1)?;
//! table.set("banana", 2)?;
//! assert_eq!(table.get("apple"), Ok(&1));
//!
//! // Overwrite in place
//! table.set("apple", 10)?;
//! assert_eq!(table.get("apple"), Ok(&10));
//!
//! // Delete lazily; the slot becomes a tombstone until the next rehash
//! table.delete("apple")?;
//! assert!(!table.contains("apple"));
//! assert_eq!(table.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Date keys
//!
//! ```rust
//! # fn main() -> Result<(), hashy::TableError> {
//! use hashy::{DateTable, HashTable};
//!
//! let mut opening_games: DateTable<String> = DateTable::for_dates();
//! assert_eq!(opening_games.capacity(), 366);
//!
//! // All four key formats hash to the same slot
//! assert_eq!(opening_games.hash("2025-03-17"), opening_games.hash("17/03/2025"));
//!
//! opening_games.set("2025-03-17", "round one".to_string())?;
//! assert_eq!(opening_games.get("2025-03-17"), Ok(&"round one".to_string()));
//! # Ok(())
//! # }
//! ```

/// Date-tuned hash strategy and the table specialized with it
mod date;
/// Error types shared by every table
mod error;
/// Pluggable hash strategies for the probing tables
mod hasher;
/// Module implementing the double-hashing table with lazy deletion
mod lazy_double;
/// Module implementing the linear-probing table
mod linear_probe;
/// The physical slot model shared by the tables
mod slot;
/// The table contract and validated growth sequences
mod table;

pub use date::{DATE_SIZES, DateHasher, DateTable};
pub use error::TableError;
pub use hasher::{KeyHasher, PolynomialHasher};
pub use lazy_double::LazyDoubleTable;
pub use linear_probe::LinearProbeTable;
pub use slot::{Iter, Slot};
pub use table::{HashTable, PRIME_SIZES, TableSizes};
