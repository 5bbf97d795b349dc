//! Named places returned by geocoding

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// A geocoded place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
    pub location: GeoLocation,
}

impl Place {
    /// `"{name}, {state}, {country}"`, skipping empty parts
    #[must_use]
    pub fn display_name(&self) -> String {
        [Some(self.name.as_str()), self.state.as_deref(), Some(self.country.as_str())]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
