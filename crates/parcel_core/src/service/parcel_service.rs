//! Parcel lifecycle service.
//!
//! # Responsibility
//! - Register parcels with a creation timestamp and initial status.
//! - Advance status along `registered -> sent -> delivered`.
//! - Restrict address changes and deletion to registered parcels.
//!
//! # Invariants
//! - Lifecycle rules live here only; the repository accepts any status label.
//! - `delivered` is terminal: advancing it writes nothing.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoError};
use chrono::{SecondsFormat, Utc};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ParcelServiceResult<T> = Result<T, ParcelServiceError>;

/// Service error for parcel use-cases.
#[derive(Debug)]
pub enum ParcelServiceError {
    /// Target parcel does not exist.
    ParcelNotFound(ParcelNumber),
    /// Operation requires `registered`, parcel is in another state.
    NotRegistered {
        number: ParcelNumber,
        status: String,
    },
    /// Stored status label is outside the known lifecycle.
    UnknownStatus {
        number: ParcelNumber,
        status: String,
    },
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ParcelServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParcelNotFound(number) => write!(f, "parcel not found: {number}"),
            Self::NotRegistered { number, status } => write!(
                f,
                "parcel {number} has status `{status}`; only registered parcels can be changed"
            ),
            Self::UnknownStatus { number, status } => {
                write!(f, "parcel {number} has unknown status `{status}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParcelServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ParcelServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(number) => Self::ParcelNotFound(number),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service over any parcel repository.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client` and returns the stored record.
    ///
    /// # Contract
    /// - Status starts as `registered`.
    /// - `created_at` is the current UTC time in RFC 3339, second precision.
    pub fn register(
        &self,
        client: ClientId,
        address: impl Into<String>,
    ) -> ParcelServiceResult<Parcel> {
        let mut parcel = Parcel::new(
            client,
            ParcelStatus::Registered.as_str(),
            address,
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        );
        parcel.number = self.repo.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    /// Loads one parcel by number.
    pub fn get(&self, number: ParcelNumber) -> ParcelServiceResult<Parcel> {
        Ok(self.repo.get(number)?)
    }

    /// Lists every parcel of one client in unspecified order.
    pub fn client_parcels(&self, client: ClientId) -> ParcelServiceResult<Vec<Parcel>> {
        let parcels = self.repo.get_by_client(client)?;
        info!(
            "event=parcel_list module=service status=ok client={} count={}",
            client,
            parcels.len()
        );
        Ok(parcels)
    }

    /// Moves a parcel to its next lifecycle state and returns the new state.
    ///
    /// A delivered parcel stays delivered and nothing is written.
    pub fn next_status(&self, number: ParcelNumber) -> ParcelServiceResult<ParcelStatus> {
        let parcel = self.repo.get(number)?;
        let current = lifecycle_status(&parcel)?;

        let Some(next) = current.next() else {
            info!("event=parcel_next_status module=service status=noop number={number} parcel_status={current}");
            return Ok(current);
        };

        self.repo.set_status(number, next.as_str())?;
        info!(
            "event=parcel_next_status module=service status=ok number={number} from={current} to={next}"
        );
        Ok(next)
    }

    /// Changes the delivery address of a registered parcel.
    pub fn change_address(
        &self,
        number: ParcelNumber,
        address: &str,
    ) -> ParcelServiceResult<()> {
        self.ensure_registered(number, "parcel_change_address")?;
        self.repo.set_address(number, address)?;
        info!("event=parcel_change_address module=service status=ok number={number}");
        Ok(())
    }

    /// Deletes a registered parcel.
    pub fn delete(&self, number: ParcelNumber) -> ParcelServiceResult<()> {
        self.ensure_registered(number, "parcel_delete")?;
        self.repo.delete(number)?;
        info!("event=parcel_delete module=service status=ok number={number}");
        Ok(())
    }

    fn ensure_registered(
        &self,
        number: ParcelNumber,
        event: &'static str,
    ) -> ParcelServiceResult<()> {
        let parcel = self.repo.get(number)?;
        if ParcelStatus::parse(&parcel.status) == Some(ParcelStatus::Registered) {
            return Ok(());
        }

        warn!(
            "event={event} module=service status=error number={number} error_code=not_registered"
        );
        Err(ParcelServiceError::NotRegistered {
            number,
            status: parcel.status,
        })
    }
}

fn lifecycle_status(parcel: &Parcel) -> ParcelServiceResult<ParcelStatus> {
    ParcelStatus::parse(&parcel.status).ok_or_else(|| ParcelServiceError::UnknownStatus {
        number: parcel.number,
        status: parcel.status.clone(),
    })
}
