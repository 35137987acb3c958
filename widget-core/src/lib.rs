//! Core library for the `weather-widget` CLI.
//!
//! This crate defines:
//! - The cached weather snapshot model and its on-disk store
//! - The pure renderer turning a snapshot into display strings
//! - The widget host and surface abstraction driving updates
//!
//! It is used by `widget-cli`, but can also be reused by other binaries or services.

pub mod model;
pub mod render;
pub mod store;
pub mod widget;

pub use model::{LaunchAction, WeatherSnapshot, WidgetDisplay, WidgetId};
pub use render::{error_state, render};
pub use store::{FileStore, SnapshotStore, StoreError};
pub use widget::{DisplayField, SurfaceError, WidgetHost, WidgetSurface};
