//! Configuration of the demo binary.

use serde::Deserialize;
use std::env;
use std::fs;
use std::io;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};

use crate::error::Error;

const CONFIG_PATH_ENV_VAR: &str = "TAGHVIM_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> io::Result<Vec<PathBuf>> {
    let config_env: Option<PathBuf> = if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        Some(PathBuf::from(path))
    } else {
        None
    };

    let home = if let Ok(dir) = env::var("HOME") {
        PathBuf::from(dir)
    } else {
        return Err(io::Error::new(
            io::ErrorKind::Other,
            "Unable to find home directory",
        ));
    };

    let home_config = PathBuf::from_iter([&home, &PathBuf::from(".taghvim.toml")].iter());

    let config_xdg = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        PathBuf::from_iter([dir, "taghvim".to_string(), "config.toml".to_string()].iter())
    } else {
        PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("taghvim"),
                Path::new("config.toml"),
            ]
            .iter(),
        )
    };

    let mut locations = vec![config_xdg, home_config];

    if let Some(path) = config_env {
        locations.insert(0, path);
    }

    Ok(locations)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Label shown while nothing is selected.
    pub placeholder: String,
    /// Marker printed next to today's cell.
    pub today_symbol: String,
    /// Render the page with ASCII instead of Persian-script digits.
    pub ascii_digits: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            placeholder: "انتخاب تاریخ".to_owned(),
            today_symbol: "*".to_owned(),
            ascii_digits: false,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Config, Error> {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(Error::from)
    }
}

/// Loads the explicitly given file, else the first existing file of the
/// standard locations, else the defaults.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config, Error> {
    if let Some(path) = path {
        return Config::load(path);
    }

    for location in find_configfile_locations()? {
        if location.exists() {
            log::debug!("loading config from {}", location.display());
            return Config::load(&location);
        }
    }

    Ok(Config::default())
}
