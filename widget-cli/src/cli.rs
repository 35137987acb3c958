use anyhow::Context;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::PathBuf;

use widget_core::{
    FileStore, LaunchAction, SnapshotStore, WeatherSnapshot, WidgetHost, WidgetId,
};

use crate::surface::TerminalSurface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Weather widget CLI")]
pub struct Cli {
    /// Snapshot file to use instead of the platform data directory.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store weather values for the widget to render.
    ///
    /// With no flags, prompts for each value interactively.
    Set(SetArgs),

    /// Render the widget from the stored snapshot.
    Show {
        /// Print the display record as JSON instead of drawing the widget.
        #[arg(long)]
        json: bool,
    },

    /// Remove the stored snapshot; the widget returns to its first-run state.
    Clear,
}

#[derive(Debug, Args, Default)]
pub struct SetArgs {
    /// City or location name.
    #[arg(long)]
    pub city: Option<String>,

    /// Temperature in whole degrees Celsius.
    #[arg(long)]
    pub temperature: Option<i32>,

    /// Short weather description, e.g. "light rain".
    #[arg(long)]
    pub description: Option<String>,

    /// Relative humidity percentage.
    #[arg(long)]
    pub humidity: Option<u8>,

    /// Wind speed in km/h.
    #[arg(long)]
    pub wind_speed: Option<f64>,
}

impl SetArgs {
    fn is_empty(&self) -> bool {
        self.city.is_none()
            && self.temperature.is_none()
            && self.description.is_none()
            && self.humidity.is_none()
            && self.wind_speed.is_none()
    }

    /// Overlay the provided flags onto the stored snapshot.
    fn apply(self, snapshot: &mut WeatherSnapshot) {
        if let Some(city) = self.city {
            snapshot.city = Some(city);
        }
        if let Some(temperature) = self.temperature {
            snapshot.temperature_c = temperature;
        }
        if let Some(description) = self.description {
            snapshot.description = Some(description);
        }
        if let Some(humidity) = self.humidity {
            snapshot.humidity_pct = humidity;
        }
        if let Some(wind_speed) = self.wind_speed {
            snapshot.wind_speed_kph = wind_speed;
        }
    }
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let store = match self.data_file {
            Some(path) => FileStore::new(path),
            None => FileStore::open_default().context("Could not locate the snapshot file")?,
        };

        match self.command {
            Command::Set(args) => set(&store, args),
            Command::Show { json } => show(&store, json),
            Command::Clear => clear(&store),
        }
    }
}

fn set(store: &FileStore, args: SetArgs) -> anyhow::Result<()> {
    let mut snapshot = store.load().context("Failed to load the current snapshot")?;

    if args.is_empty() {
        prompt_into(&mut snapshot)?;
    } else {
        args.apply(&mut snapshot);
    }

    snapshot.last_update_epoch_ms = Utc::now().timestamp_millis();

    store.save(&snapshot).context("Failed to save the snapshot")?;

    println!("Snapshot saved to {}", store.path().display());
    Ok(())
}

fn prompt_into(snapshot: &mut WeatherSnapshot) -> anyhow::Result<()> {
    let city = Text::new("City:")
        .with_initial_value(snapshot.city.as_deref().unwrap_or(""))
        .prompt()?;
    if !city.is_empty() {
        snapshot.city = Some(city);
    }

    snapshot.temperature_c = CustomType::<i32>::new("Temperature (°C):")
        .with_default(snapshot.temperature_c)
        .prompt()?;

    let description = Text::new("Description:")
        .with_initial_value(snapshot.description.as_deref().unwrap_or(""))
        .prompt()?;
    if !description.is_empty() {
        snapshot.description = Some(description);
    }

    snapshot.humidity_pct = CustomType::<u8>::new("Humidity (%):")
        .with_default(snapshot.humidity_pct)
        .prompt()?;

    snapshot.wind_speed_kph = CustomType::<f64>::new("Wind speed (km/h):")
        .with_default(snapshot.wind_speed_kph)
        .prompt()?;

    Ok(())
}

fn show(store: &FileStore, json: bool) -> anyhow::Result<()> {
    let host = WidgetHost::new(store.clone(), LaunchAction::open_app("weather-today"));
    let now = Utc::now();

    if json {
        let display = host.display(now);
        println!(
            "{}",
            serde_json::to_string_pretty(&display)
                .context("Failed to serialize the display record")?
        );
        return Ok(());
    }

    let mut surface = TerminalSurface::default();
    host.update(WidgetId(0), &mut surface, now)
        .context("Terminal surface rejected the rendered display")?;

    print!("{}", surface.into_frame());
    Ok(())
}

fn clear(store: &FileStore) -> anyhow::Result<()> {
    store.clear().context("Failed to remove the snapshot file")?;

    println!("Snapshot cleared.");
    Ok(())
}
