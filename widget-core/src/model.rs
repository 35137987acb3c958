use serde::{Deserialize, Serialize};

/// The most recently persisted weather values available at render time.
///
/// Key names follow the external key-value contract (`city`, `temperature`,
/// `description`, `humidity`, `windSpeed`, `lastUpdate`). Every field has a
/// default, so a partial document still deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeatherSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(rename = "temperature")]
    pub temperature_c: i32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "humidity")]
    pub humidity_pct: u8,

    #[serde(rename = "windSpeed")]
    pub wind_speed_kph: f64,

    /// Epoch milliseconds of the last successful update; 0 means never.
    #[serde(rename = "lastUpdate")]
    pub last_update_epoch_ms: i64,
}

/// Display strings for one widget surface.
///
/// Produced fresh on every render call and consumed by the view-binding
/// layer; nothing outlives the call that created it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetDisplay {
    pub city_text: String,
    pub temperature_text: String,
    pub description_text: String,
    pub details_text: String,
    pub last_update_text: String,
    pub is_error_state: bool,
}

/// Host-assigned id of a single widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub i32);

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tap action wired to the whole widget surface: open the host application,
/// tagged with where the launch came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchAction {
    pub target: String,
    pub source: String,
}

impl LaunchAction {
    pub fn open_app(target: impl Into<String>) -> Self {
        Self { target: target.into(), source: "widget".to_string() }
    }
}
