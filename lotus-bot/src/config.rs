//! Bot configuration.

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
    value::Uncased,
};
use lotus_model::card::Currency;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// The default Scryfall endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.scryfall.com";

/// The main configuration struct.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub general: GeneralConfig,
    /// Scryfall access configuration.
    pub api: ApiConfig,
    /// Command history storage.
    pub history: HistoryConfig,
    /// Accent text configuration.
    pub accent: AccentTextConfig,
}

impl Config {
    /// Loads a config from the environment and a given config path.
    pub fn load(config_path: impl AsRef<Path>) -> Result<Config, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("LOTUS_").split("__"))
            .merge(Env::raw().only(&["DISCORD_TOKEN", "DATABASE_URL"]).map(|k| {
                if k == "DISCORD_TOKEN" {
                    Uncased::from("GENERAL.DISCORD_TOKEN")
                } else if k == "DATABASE_URL" {
                    Uncased::from("HISTORY.DATABASE_URL")
                } else {
                    k.into()
                }
            }))
            .extract()
    }
}

/// General bot settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GeneralConfig {
    /// The token the bot uses.
    ///
    /// Only needed to serve Discord; the command line works without one.
    #[serde(default)]
    pub discord_token: Option<String>,
}

/// Scryfall connectivity config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    /// The API endpoint.
    pub endpoint: String,
    /// The user agent sent with every request.
    pub user_agent: String,
    /// How long a single request may take before it is abandoned.
    pub timeout_secs: u64,
    /// The most result pages a single search will fetch.
    pub max_pages: u32,
    /// The market prices are read from.
    pub currency: Currency,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            user_agent: concat!("lotus/", env!("CARGO_PKG_VERSION")).to_owned(),
            timeout_secs: 10,
            max_pages: 10,
            currency: Currency::Usd,
        }
    }
}

/// History storage config.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct HistoryConfig {
    /// The SQLite database history is written to.
    ///
    /// History is disabled when this is missing.
    #[serde(default)]
    pub database_url: Option<String>,
    /// How many entries `/history` shows.
    pub list_limit: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            database_url: None,
            list_limit: 20,
        }
    }
}

/// Configuration for accent text that appears in certain states or actions.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct AccentTextConfig {
    /// Accent text for when a search comes back empty.
    pub not_found: Vec<String>,
}

impl Default for AccentTextConfig {
    fn default() -> Self {
        AccentTextConfig {
            not_found: vec![
                "The library is empty.".to_owned(),
                "Nothing but basic lands here.".to_owned(),
                "Your search fizzles.".to_owned(),
            ],
        }
    }
}

impl AccentTextConfig {
    /// Selects a not found text.
    pub fn select_not_found(&self) -> Option<&str> {
        let mut rng = rand::rng();
        self.not_found.choose(&mut rng).map(String::as_str)
    }
}
