//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract the service layer depends on.
//! - Isolate SQLite query details from business orchestration.
//!
//! # Invariants
//! - Read paths reject invalid persisted state instead of masking it.
//! - Id assignment is owned by the store; callers never pick ids.

pub mod developer_repo;
