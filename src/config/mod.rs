use std::{
    env, fs,
    io::ErrorKind,
    path::Path,
};

use anyhow::Result;

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "prokick.toml";

const ENV_NAME_BACKEND_URL: &str = "BACKEND_URL";
const ENV_NAME_GEOREF_URL: &str = "GEOREF_URL";
const ENV_NAME_PORT: &str = "PORT";
const ENV_NAME_MAPTILER_API_KEY: &str = "MAPTILER_API_KEY";

pub struct Config {
    pub backend: Backend,
    pub georef: Georef,
    pub webserver: WebServer,
    pub map: Map,
}

pub struct Backend {
    /// Base URL of the external ProKick backend.
    pub url: String,
}

pub struct Georef {
    /// Base URL of the Georef API.
    pub url: String,
}

pub struct WebServer {
    pub port: Option<u16>,
}

pub struct Map {
    /// Handed to the browser for tile rendering; unused server-side.
    pub maptiler_api_key: Option<String>,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{DEFAULT_CONFIG_FILE_NAME} not found => load default configuration."
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::from(raw_config);
        if let Ok(url) = env::var(ENV_NAME_BACKEND_URL) {
            cfg.backend.url = url;
        }
        if let Ok(url) = env::var(ENV_NAME_GEOREF_URL) {
            cfg.georef.url = url;
        }
        if let Ok(port) = env::var(ENV_NAME_PORT) {
            cfg.webserver.port = Some(port.parse()?);
        }
        if let Ok(key) = env::var(ENV_NAME_MAPTILER_API_KEY) {
            cfg.map.maptiler_api_key = Some(key);
        }
        Ok(cfg)
    }
}

impl From<raw::Config> for Config {
    fn from(from: raw::Config) -> Self {
        let raw::Config {
            backend,
            georef,
            webserver,
            map,
        } = from;
        let raw::Backend { url: backend_url } = backend.unwrap_or_default();
        let raw::Georef { url: georef_url } = georef.unwrap_or_default();
        let raw::WebServer { port } = webserver.unwrap_or_default();
        let raw::Map { maptiler_api_key } = map.unwrap_or_default();
        Self {
            backend: Backend { url: backend_url },
            georef: Georef { url: georef_url },
            webserver: WebServer { port },
            map: Map { maptiler_api_key },
        }
    }
}
