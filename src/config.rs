//! Configuration management for radiosync.
//!
//! Values come from environment variables, optionally seeded from a `.env`
//! file in the local data directory. Every value has a default pointing at
//! the live services, so an empty environment is a valid configuration.
//!
//! The resolved values are gathered once into [`Settings`] and then handed
//! to the components that need them: [`SourceConfig`] goes to the FIP
//! extractor and [`DestinationConfig`] to the Tidal synchronizer. Nothing
//! reads endpoints from the environment after that, which lets tests point
//! each component at its own mock server.

use dotenv;
use std::{env, path::PathBuf};

pub const DEFAULT_FIP_API_URL: &str = "https://www.fip.fr/latest/api/graphql";
pub const DEFAULT_TIDAL_API_URL: &str = "https://api.tidalhifi.com/v1";
pub const DEFAULT_TOKEN_MANIFEST_URL: &str =
    "https://cdn.jsdelivr.net/gh/yaronzz/Tidal-Media-Downloader@latest/Else/tokens.json";
pub const DEFAULT_STATION: &str = "fip";

/// FIP station names and their GraphQL station ids.
pub const STATIONS: [(&str, u32); 9] = [
    ("fip", 7),
    ("fipRock", 64),
    ("fipJazz", 65),
    ("fipGroove", 66),
    ("fipPop", 78),
    ("fipElectro", 74),
    ("fipMonde", 69),
    ("fipReggae", 71),
    ("fipToutNouveau", 70),
];

/// Where and what the extractor reads.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub endpoint_url: String,
    pub station_name: String,
    pub station_id: u32,
}

/// Where the synchronizer writes.
#[derive(Debug, Clone)]
pub struct DestinationConfig {
    pub base_url: String,
    pub token_manifest_url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceConfig,
    pub destination: DestinationConfig,
    pub credentials_path: PathBuf,
}

impl Settings {
    /// Resolves the settings from the current environment.
    ///
    /// # Errors
    ///
    /// Fails when `FIP_STATION` is neither a known station name nor a
    /// numeric station id.
    pub fn from_env() -> Result<Self, String> {
        let station = env_or("FIP_STATION", DEFAULT_STATION);
        let (station_name, station_id) = resolve_station(&station)?;

        Ok(Settings {
            source: SourceConfig {
                endpoint_url: env_or("FIP_API_URL", DEFAULT_FIP_API_URL),
                station_name,
                station_id,
            },
            destination: DestinationConfig {
                base_url: env_or("TIDAL_API_URL", DEFAULT_TIDAL_API_URL),
                token_manifest_url: env_or("TIDAL_TOKEN_MANIFEST_URL", DEFAULT_TOKEN_MANIFEST_URL),
            },
            credentials_path: env::var("RADIOSYNC_CREDENTIALS")
                .map(PathBuf::from)
                .unwrap_or_else(|_| data_dir().join("credentials.json")),
        })
    }
}

impl SourceConfig {
    pub fn new(endpoint_url: impl Into<String>, station_id: u32) -> Self {
        let station_id_str = station_id.to_string();
        let station_name = STATIONS
            .iter()
            .find(|(_, id)| *id == station_id)
            .map(|(name, _)| name.to_string())
            .unwrap_or(station_id_str);

        SourceConfig {
            endpoint_url: endpoint_url.into(),
            station_name,
            station_id,
        }
    }
}

impl DestinationConfig {
    pub fn new(base_url: impl Into<String>, token_manifest_url: impl Into<String>) -> Self {
        DestinationConfig {
            base_url: base_url.into(),
            token_manifest_url: token_manifest_url.into(),
        }
    }
}

/// Loads environment variables from `<data_local_dir>/radiosync/.env`.
///
/// Creates the directory if it does not exist. A missing `.env` file is not
/// an error since every setting has a default; a malformed one is.
///
/// # Example
///
/// ```
/// use radiosync::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the platform-specific data directory of the application.
///
/// - Linux: `~/.local/share/radiosync`
/// - macOS: `~/Library/Application Support/radiosync`
/// - Windows: `%LOCALAPPDATA%/radiosync`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("radiosync");
    path
}

/// Maps a station name (`fipJazz`) or numeric id (`65`) to both forms.
pub fn resolve_station(station: &str) -> Result<(String, u32), String> {
    if let Some((name, id)) = STATIONS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(station))
    {
        return Ok((name.to_string(), *id));
    }

    match station.parse::<u32>() {
        Ok(id) => {
            let source = SourceConfig::new("", id);
            Ok((source.station_name, id))
        }
        Err(_) => Err(format!(
            "Unknown FIP station {:?}. Known stations: {}",
            station,
            STATIONS
                .iter()
                .map(|(name, _)| *name)
                .collect::<Vec<_>>()
                .join(", ")
        )),
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
