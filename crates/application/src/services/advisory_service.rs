//! Farm advisory generation
//!
//! Builds a fixed-template prompt from a weather snapshot and asks the
//! inference backend for six short bullet points. Each category has its own
//! panel. Only the newest request per category may update its panel.

use std::{collections::HashMap, fmt, sync::Arc};

use domain::{AdvisoryCategory, AdvisoryResult, Humidity, WeatherSnapshot};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::ports::InferencePort;

/// Bullet count the prompt asks for
pub const EXPECTED_BULLETS: usize = 6;

/// Panel text shown when no advice could be produced
pub const NO_ADVISORY_MESSAGE: &str = "No advisory available right now.";

/// Render state of one advisory panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AdvisoryPanel {
    /// Nothing requested yet
    Idle,
    /// Waiting on the model
    Loading,
    Ready { result: AdvisoryResult },
    /// The request failed or returned nothing usable
    Unavailable { message: String },
}

impl AdvisoryPanel {
    fn unavailable() -> Self {
        Self::Unavailable {
            message: NO_ADVISORY_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct PanelSlot {
    generation: u64,
    panel: AdvisoryPanel,
}

impl Default for PanelSlot {
    fn default() -> Self {
        Self {
            generation: 0,
            panel: AdvisoryPanel::Idle,
        }
    }
}

/// Formats the rain proxy series, e.g. `62%, 70%, 81%`
fn format_rain_series(series: &[Humidity]) -> String {
    if series.is_empty() {
        return "unavailable".to_string();
    }
    series
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the advisory prompt for `category`
#[must_use]
pub fn build_advisory_prompt(
    category: AdvisoryCategory,
    snapshot: &WeatherSnapshot,
    rain_series: &[Humidity],
) -> String {
    let display = snapshot.display();
    format!(
        "You are an agricultural expert. Respond with {EXPECTED_BULLETS} concise bullet points only.\n\n\
         Advisory Task → {category}\n\n\
         Weather inputs:\n\
         - Temperature: {temperature}°C\n\
         - Humidity: {humidity}%\n\
         - Wind speed: {wind} m/s\n\
         - Pressure: {pressure} hPa\n\
         - Visibility: {visibility}\n\
         - Next 5-day rain trend approximation: {rain}\n\n\
         Return a practical farm recommendation. Avoid generic text.",
        category = category.label(),
        temperature = snapshot.temperature,
        humidity = snapshot.humidity.value(),
        wind = snapshot.wind_speed,
        pressure = snapshot.pressure,
        visibility = display.visibility,
        rain = format_rain_series(rain_series),
    )
}

/// Requests advice and tracks one panel per category
pub struct AdvisoryService {
    inference: Arc<dyn InferencePort>,
    panels: RwLock<HashMap<AdvisoryCategory, PanelSlot>>,
}

impl fmt::Debug for AdvisoryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryService")
            .field("inference", &"<InferencePort>")
            .field("panels", &self.panels.read().len())
            .finish()
    }
}

impl AdvisoryService {
    #[must_use]
    pub fn new(inference: Arc<dyn InferencePort>) -> Self {
        Self {
            inference,
            panels: RwLock::new(HashMap::new()),
        }
    }

    /// Current panel for `category`
    #[must_use]
    pub fn panel(&self, category: AdvisoryCategory) -> AdvisoryPanel {
        self.panels
            .read()
            .get(&category)
            .map_or(AdvisoryPanel::Idle, |slot| slot.panel.clone())
    }

    /// Requests fresh advice for `category`.
    ///
    /// Returns the panel state after this request settles. When a newer
    /// request for the same category started meanwhile, this response is
    /// discarded and the newer state is returned instead.
    #[instrument(skip(self, snapshot, rain_series), fields(category = category.slug()))]
    pub async fn request(
        &self,
        category: AdvisoryCategory,
        snapshot: &WeatherSnapshot,
        rain_series: &[Humidity],
    ) -> AdvisoryPanel {
        let generation = {
            let mut panels = self.panels.write();
            let slot = panels.entry(category).or_default();
            slot.generation += 1;
            slot.panel = AdvisoryPanel::Loading;
            slot.generation
        };

        let prompt = build_advisory_prompt(category, snapshot, rain_series);
        let outcome = match self.inference.generate(&prompt).await {
            Ok(result) if result.content.trim().is_empty() => {
                warn!(model = %result.model, "Advisory model returned empty text");
                AdvisoryPanel::unavailable()
            },
            Ok(result) => {
                let advisory = AdvisoryResult::new(category, result.content.trim());
                if advisory.bullets.len() != EXPECTED_BULLETS {
                    debug!(
                        bullets = advisory.bullets.len(),
                        "Advisory bullet count differs from requested"
                    );
                }
                info!(
                    model = %result.model,
                    latency_ms = result.latency_ms,
                    "Advisory generated"
                );
                AdvisoryPanel::Ready { result: advisory }
            },
            Err(e) => {
                warn!(error = %e, "Advisory request failed");
                AdvisoryPanel::unavailable()
            },
        };

        let mut panels = self.panels.write();
        let slot = panels.entry(category).or_default();
        if slot.generation == generation {
            slot.panel = outcome;
        } else {
            debug!(
                generation,
                latest = slot.generation,
                "Discarding stale advisory response"
            );
        }
        slot.panel.clone()
    }
}
