//! Location resolution
//!
//! Combines a device fix, an optional user selection and a fixed default so
//! that weather queries always have a coordinate to work with.

use std::{fmt, sync::Arc};

use domain::GeoLocation;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::ports::{LocationError, LocationPort};

/// Outcome of the most recent device location request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LocationStatus {
    NotRequested,
    Resolved { location: GeoLocation },
    Failed { error: LocationError },
}

/// Which input a resolved coordinate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationOrigin {
    /// Selected by the user, e.g. from a place search
    Override,
    Device,
    Default,
}

/// The coordinate downstream queries should use
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLocation {
    pub location: GeoLocation,
    pub origin: LocationOrigin,
}

#[derive(Debug)]
struct LocationState {
    status: LocationStatus,
    user_override: Option<GeoLocation>,
}

/// Tracks device fixes and user overrides
pub struct LocationService {
    source: Arc<dyn LocationPort>,
    fallback: GeoLocation,
    state: RwLock<LocationState>,
}

impl fmt::Debug for LocationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationService")
            .field("source", &"<LocationPort>")
            .field("fallback", &self.fallback)
            .field("state", &*self.state.read())
            .finish()
    }
}

impl LocationService {
    /// Create a service falling back to the centre of India
    #[must_use]
    pub fn new(source: Arc<dyn LocationPort>) -> Self {
        Self::with_fallback(source, GeoLocation::india_center())
    }

    #[must_use]
    pub fn with_fallback(source: Arc<dyn LocationPort>, fallback: GeoLocation) -> Self {
        Self {
            source,
            fallback,
            state: RwLock::new(LocationState {
                status: LocationStatus::NotRequested,
                user_override: None,
            }),
        }
    }

    /// Asks the device for its position once and records the outcome
    #[instrument(skip(self))]
    pub async fn request_location(&self) -> Result<GeoLocation, LocationError> {
        let outcome = self.source.current_position().await;
        let status = match &outcome {
            Ok(location) => {
                info!(location = %location, "Device location resolved");
                LocationStatus::Resolved {
                    location: *location,
                }
            },
            Err(error) => {
                warn!(error = %error, "Device location unavailable");
                LocationStatus::Failed {
                    error: error.clone(),
                }
            },
        };
        self.state.write().status = status;
        outcome
    }

    /// Outcome of the last device request
    #[must_use]
    pub fn status(&self) -> LocationStatus {
        self.state.read().status.clone()
    }

    /// Pins queries to `location` until cleared
    pub fn set_override(&self, location: GeoLocation) {
        info!(location = %location, "Location override set");
        self.state.write().user_override = Some(location);
    }

    pub fn clear_override(&self) {
        self.state.write().user_override = None;
    }

    #[must_use]
    pub fn user_override(&self) -> Option<GeoLocation> {
        self.state.read().user_override
    }

    /// Override first, then the device fix, then the fallback
    #[must_use]
    pub fn resolve(&self) -> ResolvedLocation {
        let state = self.state.read();
        if let Some(location) = state.user_override {
            return ResolvedLocation {
                location,
                origin: LocationOrigin::Override,
            };
        }
        if let LocationStatus::Resolved { location } = state.status {
            return ResolvedLocation {
                location,
                origin: LocationOrigin::Device,
            };
        }
        ResolvedLocation {
            location: self.fallback,
            origin: LocationOrigin::Default,
        }
    }
}
