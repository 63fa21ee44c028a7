//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract the cat service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return `InvalidData` for malformed rows in addition to
//!   DB transport errors; missing rows are `None`/empty, not errors.
//! - Business rules (empty names, negative ids) are not enforced here.

pub mod cat_repo;
