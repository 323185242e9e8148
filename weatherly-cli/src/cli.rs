use anyhow::{Context, Result};
use chrono::{NaiveTime, Timelike};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use weatherly_core::{
    CityRoute, Config, Coordinates, LocationError, ReminderConfig, Screen, Store,
    TemperatureUnit, provider_from_config,
    device::{DailyReminder, ReminderOutcome, ReminderToggle},
};

use crate::{
    render,
    services::{ConfigNotifier, ConfiguredLocation},
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherly", version, about = "Weather forecasts from the command line")]
pub struct Cli {
    /// Show temperatures in Fahrenheit.
    #[arg(long, global = true, conflicts_with = "celsius")]
    pub fahrenheit: bool,

    /// Show temperatures in Celsius.
    #[arg(long, global = true)]
    pub celsius: bool,

    /// Increase log output (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ViewArg {
    /// Conditions right now.
    #[default]
    Current,
    /// Five days, one line per day.
    Daily,
    /// The next 24 three-hour slots.
    Hourly,
}

impl From<ViewArg> for Screen {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Current => Screen::Current,
            ViewArg::Daily => Screen::Daily,
            ViewArg::Hourly => Screen::Hourly,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key, preferred unit and home location.
    Configure,

    /// Find a city by name, pick one of the suggestions and show its weather.
    Search {
        /// Text to search for; prompted for when absent.
        query: Option<String>,

        #[arg(long, value_enum, default_value_t)]
        view: ViewArg,
    },

    /// Show weather for a city name or a location path segment.
    Show {
        /// e.g. "London" or "lat%3D51.5%26lon%3D-0.12"
        location: String,

        #[arg(long, value_enum, default_value_t)]
        view: ViewArg,
    },

    /// Show weather at a latitude/longitude.
    Coords {
        #[arg(allow_negative_numbers = true)]
        lat: f64,

        #[arg(allow_negative_numbers = true)]
        lon: f64,

        #[arg(long, value_enum, default_value_t)]
        view: ViewArg,
    },

    /// Show weather at the configured home location.
    Here {
        #[arg(long, value_enum, default_value_t)]
        view: ViewArg,
    },

    /// Manage the daily forecast reminder.
    Reminder {
        #[command(subcommand)]
        action: ReminderAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReminderAction {
    /// Schedule the reminder.
    On {
        /// Local time as HH:MM.
        #[arg(long, value_parser = parse_time)]
        at: Option<NaiveTime>,
    },
    /// Cancel the reminder.
    Off,
    /// Print whether a reminder is scheduled.
    Status,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| format!("expected HH:MM, got '{value}'"))
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let Cli {
            fahrenheit,
            celsius,
            command,
            ..
        } = self;
        let mut config = Config::load()?;

        let unit_override = if fahrenheit {
            Some(TemperatureUnit::Fahrenheit)
        } else if celsius {
            Some(TemperatureUnit::Celsius)
        } else {
            None
        };

        match command {
            Command::Configure => configure(&mut config),
            Command::Reminder { action } => reminder(action, config).await,
            Command::Search { query, view } => {
                let store = build_store(&config, unit_override);
                search(&store, query, view.into()).await
            }
            Command::Show { location, view } => {
                let store = build_store(&config, unit_override);
                let route = CityRoute::parse(&location)?;
                open(&store, &route, view.into()).await;
                Ok(())
            }
            Command::Coords { lat, lon, view } => {
                let store = build_store(&config, unit_override);
                let route = CityRoute::Coordinates(Coordinates::new(lat, lon));
                open(&store, &route, view.into()).await;
                Ok(())
            }
            Command::Here { view } => {
                let store = build_store(&config, unit_override);
                match store
                    .use_my_location(&ConfiguredLocation::new(config.home))
                    .await
                {
                    Ok(route) => open(&store, &route, view.into()).await,
                    Err(LocationError::PermissionDenied) => println!(
                        "Location access is required. Add a home location with `weatherly configure`."
                    ),
                    Err(err) => println!("Error: {err}"),
                }
                Ok(())
            }
        }
    }
}

fn build_store(config: &Config, unit_override: Option<TemperatureUnit>) -> Store {
    let store = Store::new(provider_from_config(config), config.search_debounce())
        .with_unit(config.temperature_unit);

    if unit_override.is_some_and(|unit| unit != store.unit()) {
        store.toggle_unit();
    }
    store
}

async fn open(store: &Store, route: &CityRoute, screen: Screen) {
    tracing::debug!(path = %route.path(screen), "opening city screen");
    let label = store.open_city(route).await;
    println!("{}", render::screen(&store.snapshot(), &label, screen));
}

async fn search(store: &Store, query: Option<String>, screen: Screen) -> Result<()> {
    let query = match query {
        Some(query) => query,
        None => inquire::Text::new("City:")
            .with_placeholder("Enter city name...")
            .prompt()?,
    };

    store.set_query(&query);
    store.settle_search().await;

    let state = store.snapshot();
    if let Some(message) = render::search_status(&state) {
        println!("{message}");
    }

    let picked = if state.search.suggestions.is_empty() {
        if state.search.error.is_some() {
            return Ok(());
        }
        store.submit()
    } else {
        let choice = inquire::Select::new("Pick a location:", state.search.suggestions.clone())
            .raw_prompt()?;
        store.select_suggestion(choice.index)
    };

    match picked {
        Ok(route) => open(store, &route, screen).await,
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn configure(config: &mut Config) -> Result<()> {
    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key.trim().to_string());
    }

    let units = vec![TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];
    let start = units
        .iter()
        .position(|u| *u == config.temperature_unit)
        .unwrap_or(0);
    config.temperature_unit = inquire::Select::new("Temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()?;

    if inquire::Confirm::new("Set a home location for `weatherly here`?")
        .with_default(config.home.is_some())
        .prompt()?
    {
        let lat = inquire::CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = inquire::CustomType::<f64>::new("Longitude:").prompt()?;
        config.home = Some(Coordinates::new(lat, lon));
    }

    if inquire::Confirm::new("Remind me of the forecast every day?")
        .with_default(config.reminder.is_some())
        .prompt()?
    {
        let default = DailyReminder::at(config.reminder.unwrap_or_default()).time_label();
        let at = inquire::Text::new("Reminder time (HH:MM):")
            .with_default(&default)
            .prompt()?;
        let at = parse_time(&at).map_err(anyhow::Error::msg)?;
        config.reminder = Some(reminder_time(at)?);
    } else {
        config.reminder = None;
    }

    config.save()?;
    let path = Config::config_file_path()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn reminder_time(at: NaiveTime) -> Result<ReminderConfig> {
    Ok(ReminderConfig {
        hour: u8::try_from(at.hour()).context("hour out of range")?,
        minute: u8::try_from(at.minute()).context("minute out of range")?,
    })
}

async fn reminder(action: ReminderAction, config: Config) -> Result<()> {
    let current = config.reminder;
    let time = match &action {
        ReminderAction::On { at: Some(at) } => reminder_time(*at)?,
        _ => current.unwrap_or_default(),
    };

    let interactive = matches!(action, ReminderAction::On { .. });
    let notifier = ConfigNotifier::new(config, interactive);
    let mut toggle = ReminderToggle::new(DailyReminder::at(time), current.is_some());

    let outcome = match action {
        ReminderAction::On { .. } => toggle.enable(&notifier).await?,
        ReminderAction::Off => toggle.disable(&notifier).await?,
        ReminderAction::Status => {
            match notifier.reminder().await {
                Some(r) => println!(
                    "Daily reminder at {}",
                    DailyReminder::at(r).time_label()
                ),
                None => println!("Daily reminder is off"),
            }
            return Ok(());
        }
    };

    match outcome {
        ReminderOutcome::Enabled(message) => println!("{message}"),
        ReminderOutcome::Disabled => println!("Notifications disabled"),
        ReminderOutcome::PermissionDenied => println!("Permission denied for notifications"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["weatherly", "coords", "-33.87", "151.21", "--view", "hourly"])
            .expect("args parse");
        match cli.command {
            Command::Coords { lat, lon, view } => {
                assert_eq!(lat, -33.87);
                assert_eq!(lon, 151.21);
                assert!(matches!(view, ViewArg::Hourly));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn reminder_time_must_be_hh_mm() {
        assert!(parse_time("07:30").is_ok());
        assert!(parse_time("7pm").is_err());

        let time = reminder_time(parse_time("07:30").unwrap()).unwrap();
        assert_eq!(time, ReminderConfig { hour: 7, minute: 30 });
    }

    #[test]
    fn unit_flags_conflict() {
        let res = Cli::try_parse_from(["weatherly", "--fahrenheit", "--celsius", "here"]);
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn fahrenheit_flag_toggles_store_unit() {
        let config = Config::default();
        let store = build_store(&config, Some(TemperatureUnit::Fahrenheit));
        assert_eq!(store.unit(), TemperatureUnit::Fahrenheit);

        let store = build_store(&config, None);
        assert_eq!(store.unit(), TemperatureUnit::Celsius);
    }
}
