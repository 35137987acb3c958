use chrono::{DateTime, Utc};

use crate::model::{WeatherSnapshot, WidgetDisplay};

const CITY_PLACEHOLDER: &str = "Loading...";
const TAP_TO_UPDATE: &str = "Tap to update";

/// Produce the display strings for one widget surface.
///
/// Pure and infallible: every snapshot field has a default, so there is no
/// input for which this panics or returns an error. Idempotent for the same
/// `(snapshot, now)` pair.
pub fn render(snapshot: &WeatherSnapshot, now: DateTime<Utc>) -> WidgetDisplay {
    let city_text =
        snapshot.city.clone().unwrap_or_else(|| CITY_PLACEHOLDER.to_string());
    let description_text =
        snapshot.description.clone().unwrap_or_else(|| TAP_TO_UPDATE.to_string());

    WidgetDisplay {
        city_text,
        temperature_text: format!("{}°", snapshot.temperature_c),
        description_text,
        // Wind speed is truncated to whole km/h, not rounded.
        details_text: format!(
            "Humidity: {}% | Wind: {} km/h",
            snapshot.humidity_pct, snapshot.wind_speed_kph as i64,
        ),
        last_update_text: format_last_update(snapshot.last_update_epoch_ms, now),
        is_error_state: false,
    }
}

/// Fixed display shown when the snapshot itself could not be acquired.
///
/// Rendering cannot fail by construction, so this is only reached when the
/// caller's store fails; it takes no inputs and is constant across calls.
pub fn error_state() -> WidgetDisplay {
    WidgetDisplay {
        city_text: "Error".to_string(),
        temperature_text: "--°".to_string(),
        description_text: "Tap to retry".to_string(),
        details_text: String::new(),
        last_update_text: String::new(),
        is_error_state: true,
    }
}

/// Coarse relative-time label for the last successful update.
fn format_last_update(last_update_epoch_ms: i64, now: DateTime<Utc>) -> String {
    if last_update_epoch_ms == 0 {
        // Never updated.
        return TAP_TO_UPDATE.to_string();
    }

    let diff_minutes = (now.timestamp_millis() - last_update_epoch_ms) / 60_000;

    if diff_minutes < 1 {
        "Just now".to_string()
    } else if diff_minutes < 60 {
        format!("Updated: {diff_minutes}m ago")
    } else {
        format!("Updated: {}h ago", diff_minutes / 60)
    }
}
