//! Parcel domain model.
//!
//! # Responsibility
//! - Define the canonical shipment record persisted in the `parcel` table.
//! - Provide the `registered -> sent -> delivered` status vocabulary.
//!
//! # Invariants
//! - `number` is assigned by the store; callers never choose it on insert.
//! - `status` on `Parcel` is an opaque label. Only `ParcelStatus` gives it
//!   meaning, and only outside the store.
//! - `created_at` is an RFC 3339 string captured by the caller.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Store-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Owning client identifier. Not validated against any registry.
pub type ClientId = i64;

/// Canonical shipment record.
///
/// `Parcel::default()` is the zero-value record returned alongside lookup
/// failures (`number == 0`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Auto-increment identifier. Ignored on insert, always set on read.
    pub number: ParcelNumber,
    pub client: ClientId,
    /// Free-form status label, e.g. `registered`.
    pub status: String,
    pub address: String,
    /// RFC 3339 creation timestamp, stored verbatim.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unassigned parcel (`number == 0`).
    pub fn new(
        client: ClientId,
        status: impl Into<String>,
        address: impl Into<String>,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            number: 0,
            client,
            status: status.into(),
            address: address.into(),
            created_at: created_at.into(),
        }
    }

    /// Returns whether the store has assigned an identifier to this record.
    pub fn is_assigned(&self) -> bool {
        self.number != 0
    }
}

/// Lifecycle state of a parcel as understood by the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Accepted and awaiting dispatch. Address changes and deletion allowed.
    Registered,
    /// Handed to the carrier.
    Sent,
    /// Terminal state.
    Delivered,
}

impl ParcelStatus {
    /// Stable storage label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Sent => "sent",
            Self::Delivered => "delivered",
        }
    }

    /// Parses a storage label. Returns `None` for labels outside the lifecycle.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registered" => Some(Self::Registered),
            "sent" => Some(Self::Sent),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Returns the following state, or `None` when already terminal.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
