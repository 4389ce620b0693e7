use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub token: String,
}

impl GatewayConfig {
    pub fn from_parts(base_url: Option<String>, token: Option<String>) -> Option<Self> {
        match (base_url, token) {
            (Some(base_url), Some(token)) if !base_url.is_empty() && !token.is_empty() => {
                Some(Self { base_url, token })
            }
            _ => None,
        }
    }
}

pub struct Config {
    pub port: u16,
    pub static_dir: PathBuf,
    pub gateway: Option<GatewayConfig>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ConfigFile {
    #[serde(rename = "gateway-url", default)]
    gateway_url: Option<String>,
    #[serde(rename = "gateway-token", default)]
    gateway_token: Option<String>,
}

impl Config {
    pub fn load() -> Self {
        let file = match config_file_path() {
            Some(path) => read_config_file(&path),
            None => ConfigFile::default(),
        };

        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            static_dir: std::env::var("ARCADE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./static")),
            gateway: GatewayConfig::from_parts(file.gateway_url, file.gateway_token),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("ARCADE_CONFIG_PATH") {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    std::env::var("SNAP_COMMON")
        .ok()
        .filter(|base| !base.is_empty())
        .map(|base| Path::new(&base).join("arcade/config.yaml"))
}

fn read_config_file(path: &Path) -> ConfigFile {
    let raw = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read config file {}: {e}", path.display()));
    serde_yaml::from_str(&raw)
        .unwrap_or_else(|e| panic!("invalid config file {}: {e}", path.display()))
}
