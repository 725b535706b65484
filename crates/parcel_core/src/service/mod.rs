//! Core use-case services.
//!
//! # Responsibility
//! - Apply parcel lifecycle policy on top of the status-agnostic store.
//! - Keep CLI callers decoupled from storage details.

pub mod parcel_service;
