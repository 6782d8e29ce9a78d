use handlens_analytics::highlights::{DetectorThresholds, MAX_HIGHLIGHTS};
use handlens_engine::reconstruct::PotScope;
use handlens_viewer::ViewerSettings;
use serde::{Deserialize, Serialize};
use std::fs;

pub const CONFIG_ENV: &str = "HANDLENS_CONFIG";
pub const BUCKET_ENV: &str = "HANDLENS_BUCKET";
pub const TOP_ENV: &str = "HANDLENS_TOP";
pub const SCOPE_ENV: &str = "HANDLENS_SCOPE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub bucket_size: usize,
    pub top: usize,
    pub scope: PotScope,
    pub thresholds: DetectorThresholds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub bucket_size: ValueSource,
    pub top: ValueSource,
    pub scope: ValueSource,
    pub thresholds: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            bucket_size: ValueSource::Default,
            top: ValueSource::Default,
            scope: ValueSource::Default,
            thresholds: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bucket_size: 1,
            top: MAX_HIGHLIGHTS,
            scope: PotScope::Round,
            thresholds: DetectorThresholds::default(),
        }
    }
}

impl Config {
    pub fn viewer_settings(&self) -> ViewerSettings {
        ViewerSettings {
            bucket_size: self.bucket_size,
            pot_scope: self.scope,
            highlight_count: self.top,
            thresholds: self.thresholds.clone(),
            ..ViewerSettings::default()
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_ENV, e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Defaults, then the TOML file named by `HANDLENS_CONFIG`, then `HANDLENS_*` variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_ENV)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.bucket_size {
            cfg.bucket_size = v;
            sources.bucket_size = ValueSource::File;
        }
        if let Some(v) = f.top {
            cfg.top = v;
            sources.top = ValueSource::File;
        }
        if let Some(v) = f.scope {
            cfg.scope = v;
            sources.scope = ValueSource::File;
        }
        if let Some(v) = f.thresholds {
            cfg.thresholds = v;
            sources.thresholds = ValueSource::File;
        }
    }

    if let Ok(bucket) = std::env::var(BUCKET_ENV)
        && !bucket.is_empty()
    {
        cfg.bucket_size = bucket
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", BUCKET_ENV, bucket)))?;
        sources.bucket_size = ValueSource::Env;
    }
    if let Ok(top) = std::env::var(TOP_ENV)
        && !top.is_empty()
    {
        cfg.top = top
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", TOP_ENV, top)))?;
        sources.top = ValueSource::Env;
    }
    if let Ok(scope) = std::env::var(SCOPE_ENV)
        && !scope.is_empty()
    {
        cfg.scope = parse_scope(&scope)
            .ok_or_else(|| ConfigError::Invalid(format!("Invalid {}: {}", SCOPE_ENV, scope)))?;
        sources.scope = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    bucket_size: Option<usize>,
    #[serde(default)]
    top: Option<usize>,
    #[serde(default)]
    scope: Option<PotScope>,
    #[serde(default)]
    thresholds: Option<DetectorThresholds>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.bucket_size == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bucket_size must be >=1".into(),
        ));
    }
    if cfg.top == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: top must be >=1".into(),
        ));
    }
    cfg.thresholds
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

pub fn parse_scope(s: &str) -> Option<PotScope> {
    match s.to_ascii_lowercase().as_str() {
        "round" => Some(PotScope::Round),
        "total" => Some(PotScope::Total),
        _ => None,
    }
}
