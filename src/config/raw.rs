use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = include_str!("prokick.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub backend: Option<Backend>,
    pub georef: Option<Georef>,
    pub webserver: Option<WebServer>,
    pub map: Option<Map>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Backend {
    pub url: String,
}

impl Default for Backend {
    fn default() -> Self {
        Config::default().backend.expect("Backend configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Georef {
    pub url: String,
}

impl Default for Georef {
    fn default() -> Self {
        Config::default().georef.expect("Georef configuration")
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct WebServer {
    pub port: Option<u16>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Map {
    pub maptiler_api_key: Option<String>,
}
