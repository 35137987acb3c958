use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::{
    model::{LaunchAction, WidgetDisplay, WidgetId},
    render::{error_state, render},
    store::SnapshotStore,
};

/// The five text slots of the widget layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayField {
    City,
    Temperature,
    Description,
    Details,
    LastUpdate,
}

/// Error returned by a surface that rejects a bound value.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("Surface rejected text for {field:?}: {reason}")]
    Text { field: DisplayField, reason: String },

    #[error("Surface rejected tap action: {reason}")]
    TapAction { reason: String },
}

/// View-binding collaborator for one widget instance.
///
/// A binding failure fails the whole update for that instance; the host
/// propagates it instead of swallowing individual fields.
pub trait WidgetSurface {
    fn set_text(&mut self, field: DisplayField, text: &str) -> Result<(), SurfaceError>;

    fn set_tap_action(&mut self, action: &LaunchAction) -> Result<(), SurfaceError>;
}

fn bind(
    surface: &mut dyn WidgetSurface,
    display: &WidgetDisplay,
    action: &LaunchAction,
) -> Result<(), SurfaceError> {
    surface.set_text(DisplayField::City, &display.city_text)?;
    surface.set_text(DisplayField::Temperature, &display.temperature_text)?;
    surface.set_text(DisplayField::Description, &display.description_text)?;
    surface.set_text(DisplayField::Details, &display.details_text)?;
    surface.set_text(DisplayField::LastUpdate, &display.last_update_text)?;
    surface.set_tap_action(action)
}

/// Drives the update cycle for the widget instances backed by one store.
///
/// Logging happens here, on the calling side; the renderer itself stays
/// silent and pure.
#[derive(Debug)]
pub struct WidgetHost<S> {
    store: S,
    launch: LaunchAction,
}

impl<S: SnapshotStore> WidgetHost<S> {
    pub fn new(store: S, launch: LaunchAction) -> Self {
        Self { store, launch }
    }

    /// Current display for this store's snapshot.
    ///
    /// A store failure falls back to the fixed error state; a subsequent tap
    /// or scheduled refresh retries with a fresh snapshot, nothing retries
    /// here.
    pub fn display(&self, now: DateTime<Utc>) -> WidgetDisplay {
        match self.store.load() {
            Ok(snapshot) => render(&snapshot, now),
            Err(err) => {
                warn!("snapshot unavailable, showing error state: {err}");
                error_state()
            }
        }
    }

    /// Update a single widget instance.
    pub fn update(
        &self,
        id: WidgetId,
        surface: &mut dyn WidgetSurface,
        now: DateTime<Utc>,
    ) -> Result<(), SurfaceError> {
        debug!(%id, "updating widget");

        let display = self.display(now);
        bind(surface, &display, &self.launch)
    }

    /// Update every listed instance, isolating failures per widget.
    ///
    /// `make_surface` builds the surface for one instance; a widget whose
    /// surface cannot be built or bound is logged and skipped, the rest
    /// still update.
    pub fn update_all<F, W>(&self, ids: &[WidgetId], mut make_surface: F, now: DateTime<Utc>)
    where
        F: FnMut(WidgetId) -> anyhow::Result<W>,
        W: WidgetSurface,
    {
        debug!(count = ids.len(), "update requested");

        for &id in ids {
            let mut surface = match make_surface(id) {
                Ok(surface) => surface,
                Err(err) => {
                    error!(%id, "failed to build widget surface: {err:#}");
                    continue;
                }
            };

            if let Err(err) = self.update(id, &mut surface, now) {
                error!(%id, "failed to update widget: {err}");
            }
        }
    }

    pub fn on_enabled(&self) {
        debug!("widget enabled");
    }

    pub fn on_disabled(&self) {
        debug!("widget disabled");
    }

    pub fn on_deleted(&self, ids: &[WidgetId]) {
        debug!(?ids, "widgets deleted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::WeatherSnapshot,
        store::StoreError,
    };
    use chrono::TimeZone;

    struct FakeStore {
        snapshot: Option<WeatherSnapshot>,
    }

    impl SnapshotStore for FakeStore {
        fn load(&self) -> Result<WeatherSnapshot, StoreError> {
            self.snapshot.clone().ok_or(StoreError::NoDataDir)
        }

        fn save(&self, _snapshot: &WeatherSnapshot) -> Result<(), StoreError> {
            Ok(())
        }

        fn clear(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSurface {
        texts: Vec<(DisplayField, String)>,
        tap: Option<LaunchAction>,
        reject_all: bool,
    }

    impl WidgetSurface for RecordingSurface {
        fn set_text(&mut self, field: DisplayField, text: &str) -> Result<(), SurfaceError> {
            if self.reject_all {
                return Err(SurfaceError::Text {
                    field,
                    reason: "rejected by test surface".to_string(),
                });
            }
            self.texts.push((field, text.to_string()));
            Ok(())
        }

        fn set_tap_action(&mut self, action: &LaunchAction) -> Result<(), SurfaceError> {
            self.tap = Some(action.clone());
            Ok(())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
    }

    fn host_with(snapshot: Option<WeatherSnapshot>) -> WidgetHost<FakeStore> {
        WidgetHost::new(FakeStore { snapshot }, LaunchAction::open_app("weather-today"))
    }

    #[test]
    fn update_binds_all_fields_and_tap_action() {
        let host = host_with(Some(WeatherSnapshot {
            city: Some("Kyiv".to_string()),
            ..Default::default()
        }));
        let mut surface = RecordingSurface::default();

        host.update(WidgetId(1), &mut surface, now()).expect("update must succeed");

        let fields: Vec<DisplayField> = surface.texts.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            fields,
            vec![
                DisplayField::City,
                DisplayField::Temperature,
                DisplayField::Description,
                DisplayField::Details,
                DisplayField::LastUpdate,
            ]
        );
        assert_eq!(surface.texts[0].1, "Kyiv");

        let tap = surface.tap.expect("tap action must be wired");
        assert_eq!(tap.target, "weather-today");
        assert_eq!(tap.source, "widget");
    }

    #[test]
    fn store_failure_falls_back_to_error_state() {
        let host = host_with(None);

        let display = host.display(now());

        assert!(display.is_error_state);
        assert_eq!(display.city_text, "Error");
        assert_eq!(display.temperature_text, "--°");
        assert_eq!(display.description_text, "Tap to retry");
    }

    #[test]
    fn store_failure_still_updates_the_surface() {
        let host = host_with(None);
        let mut surface = RecordingSurface::default();

        host.update(WidgetId(2), &mut surface, now()).expect("update must succeed");

        assert_eq!(surface.texts[0].1, "Error");
        assert!(surface.tap.is_some());
    }

    #[test]
    fn surface_rejection_fails_the_whole_update() {
        let host = host_with(Some(WeatherSnapshot::default()));
        let mut surface = RecordingSurface { reject_all: true, ..Default::default() };

        let err = host.update(WidgetId(3), &mut surface, now()).unwrap_err();

        assert!(matches!(err, SurfaceError::Text { field: DisplayField::City, .. }));
        assert!(surface.texts.is_empty());
    }

    #[test]
    fn update_all_isolates_failing_widgets() {
        let host = host_with(Some(WeatherSnapshot::default()));
        let ids = [WidgetId(1), WidgetId(2), WidgetId(3)];

        let mut built = Vec::new();
        host.update_all(
            &ids,
            |id| {
                if id == WidgetId(2) {
                    anyhow::bail!("no surface for widget {id}");
                }
                built.push(id);
                Ok(RecordingSurface::default())
            },
            now(),
        );

        assert_eq!(built, vec![WidgetId(1), WidgetId(3)]);
    }
}
