//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the parcel store contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repositories borrow an externally-owned connection and never open,
//!   close or pool connections themselves.
//! - Repository failures propagate to the caller; nothing is logged or
//!   swallowed here.

pub mod parcel_repo;
