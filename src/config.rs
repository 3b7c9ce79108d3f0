// Settings for the translation service, loaded once at startup and passed
// by reference from there on. Sources: an optional JSON dotfile in the home
// directory, overridden by DOCTRAN_* environment variables.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

pub const DEFAULT_VERSION: &str = "2018-05-01";
const CONFIG_FILE: &str = ".doctran.json";

/// Resolved credentials for the document service.
#[derive(Debug, Clone)]
pub struct Settings {
    pub version: String,
    pub api_key: String,
    pub url: String,
}

/// Raw shape of the config file; every field optional.
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    version: Option<String>,
    api_key: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Default)]
struct EnvOverrides {
    version: Option<String>,
    api_key: Option<String>,
    url: Option<String>,
}

impl EnvOverrides {
    fn from_process() -> Self {
        Self {
            version: std::env::var("DOCTRAN_VERSION").ok(),
            api_key: std::env::var("DOCTRAN_API_KEY").ok(),
            url: std::env::var("DOCTRAN_URL").ok(),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = config_path();
        let file = read_file(&path)?;
        Self::resolve(file, EnvOverrides::from_process())
    }

    fn resolve(file: FileSettings, env: EnvOverrides) -> Result<Self> {
        let version = env
            .version
            .or(file.version)
            .unwrap_or_else(|| DEFAULT_VERSION.to_string());
        let api_key = env.api_key.or(file.api_key).ok_or_else(|| {
            anyhow!("api_key is not set: add \"api_key\" to ~/{CONFIG_FILE} or set DOCTRAN_API_KEY")
        })?;
        let url = env.url.or(file.url).ok_or_else(|| {
            anyhow!("url is not set: add \"url\" to ~/{CONFIG_FILE} or set DOCTRAN_URL")
        })?;
        Ok(Settings {
            version,
            api_key,
            url,
        })
    }
}

fn config_path() -> PathBuf {
    let dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.join(CONFIG_FILE)
}

/// A missing file is fine (everything may come from the environment); a
/// present but unreadable or malformed file is a startup error.
fn read_file(path: &Path) -> Result<FileSettings> {
    match std::fs::read_to_string(path) {
        Ok(data) => {
            serde_json::from_str(&data).with_context(|| format!("parsing {}", path.display()))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(FileSettings::default()),
        Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
    }
}
