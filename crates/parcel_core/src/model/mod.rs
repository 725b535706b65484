//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define the parcel record shared by store, service and CLI layers.
//! - Define the lifecycle vocabulary applied by the service layer.
//!
//! # Invariants
//! - Every stored parcel is identified by a store-assigned `ParcelNumber`.
//! - `ParcelNumber == 0` means "not assigned" or "not found".

pub mod parcel;
