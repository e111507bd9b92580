use clap::{Parser, Subcommand};
use skycast_core::{
    AnimationAsset, Config, Coordinates, IpPositionSource, LoadState, StaticPositionSource,
    WeatherScreen, WeatherSnapshot, pick_animation, provider_from_config,
    screen::CancellationToken,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather for where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and location preferences.
    Configure,

    /// Show current weather for the device's location.
    Show {
        /// Latitude override; skips the location lookup.
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude override; skips the location lookup.
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lat, lon } => show(lat, lon).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Text::new("OpenWeather API key:").prompt()?;
    config.set_api_key(api_key)?;

    config.allow_ip_location = inquire::Confirm::new("Allow IP-based location lookups?")
        .with_default(true)
        .with_help_message("Your public IP is sent to ipapi.co to estimate coordinates")
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let screen = WeatherScreen::new();
    let cancel = CancellationToken::new();

    match (lat, lon) {
        (Some(latitude), Some(longitude)) => {
            let source = StaticPositionSource::new(Coordinates { latitude, longitude });
            screen.refresh(&source, &provider, &cancel).await;
        }
        _ => {
            let source = IpPositionSource::new(config.allow_ip_location);
            screen.refresh(&source, &provider, &cancel).await;
        }
    }

    match screen.state() {
        LoadState::Loaded(snapshot) => {
            render(&snapshot);
            Ok(())
        }
        // Details are in the log; the screen itself only knows "failed".
        _ => anyhow::bail!("Failed to load weather data"),
    }
}

fn render(snapshot: &WeatherSnapshot) {
    let animation = pick_animation(Some(&snapshot.condition));

    println!("{}", snapshot.city_name);
    println!("{}  {:.1} °C, {}", glyph(animation), snapshot.temperature_c, snapshot.condition);
    println!("as of {}", chrono::Local::now().format("%H:%M"));
}

/// Terminal stand-in for the animated icons the mobile screen plays.
fn glyph(animation: AnimationAsset) -> &'static str {
    match animation {
        AnimationAsset::Sunny => "\u{2600}",
        AnimationAsset::Cloudy => "\u{2601}",
        AnimationAsset::Rain => "\u{1F327}",
        AnimationAsset::Storm => "\u{26C8}",
    }
}
