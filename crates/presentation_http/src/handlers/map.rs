//! Map overlay handler

use application::{HOUR_PRESETS, OverlaySettings, OverlayTile};
use axum::{Json, extract::State};
use chrono::Utc;
use domain::OverlayLayer;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::Validate;

use crate::{
    error::ApiError,
    middleware::{ValidatedJson, ValidatedQuery},
    state::AppState,
};

/// Overlay settings layered over the stored ones
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OverlayQuery {
    /// Layer code (`TA2`) or name (`temperature`)
    #[validate(length(min = 1, max = 32, message = "must be between 1 and 32 characters"))]
    pub layer: Option<String>,
    pub hours: Option<u32>,
    /// Clamped into [0, 1]
    pub opacity: Option<f32>,
}

impl OverlayQuery {
    fn merge_into(&self, base: OverlaySettings) -> Result<OverlaySettings, ApiError> {
        let layer = match self.layer.as_deref() {
            Some(layer) => layer.parse::<OverlayLayer>()?,
            None => base.layer,
        };
        Ok(OverlaySettings {
            layer,
            hour_offset: self.hours.unwrap_or(base.hour_offset),
            opacity: self.opacity.unwrap_or(base.opacity),
        })
    }
}

/// Entry in the layer catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerEntry {
    pub layer: OverlayLayer,
    pub code: String,
    pub name: String,
}

/// Tile descriptor plus the choices a client can offer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayResponse {
    pub tile: OverlayTile,
    pub layers: Vec<LayerEntry>,
    pub hour_presets: Vec<u32>,
}

impl OverlayResponse {
    fn new(tile: OverlayTile) -> Self {
        Self {
            tile,
            layers: layer_catalogue(),
            hour_presets: HOUR_PRESETS.to_vec(),
        }
    }
}

fn layer_catalogue() -> Vec<LayerEntry> {
    OverlayLayer::ALL
        .iter()
        .map(|layer| LayerEntry {
            layer: *layer,
            code: layer.code().to_string(),
            name: layer.display_name().to_string(),
        })
        .collect()
}

/// Describe the tile for the stored settings with any query overrides.
///
/// Nothing is stored; use `PUT` to change the defaults.
pub async fn get_overlay(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<OverlayQuery>,
) -> Result<Json<OverlayResponse>, ApiError> {
    let controller = &state.map_overlay;
    let settings = query.merge_into(controller.settings())?;

    let tile = controller.tile_for(settings, Utc::now());
    debug!(layer = %tile.layer_code, hour_offset = tile.hour_offset, "Overlay tile described");

    Ok(Json(OverlayResponse::new(tile)))
}

/// Store new overlay settings and describe the resulting tile
pub async fn update_overlay(
    State(state): State<AppState>,
    ValidatedJson(update): ValidatedJson<OverlayQuery>,
) -> Result<Json<OverlayResponse>, ApiError> {
    let controller = &state.map_overlay;
    let settings = update.merge_into(controller.settings())?;
    controller.apply(settings);

    let tile = controller.current_tile(Utc::now());
    info!(layer = %tile.layer_code, hour_offset = tile.hour_offset, "Overlay settings updated");

    Ok(Json(OverlayResponse::new(tile)))
}
