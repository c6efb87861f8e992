use crate::catalog::{CatalogEntry, ZoneCatalog};
use crate::clock::ZoneId;
use crate::template::{MeetingTemplate, TemplateError};
use config::{Config, ConfigError, Environment, File}; // Use the config crate
use directories_next::ProjectDirs;
use log::{debug, info};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "APP";

// Zones shown in the two meeting-time fields at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ZonesConfig {
    pub a: ZoneId,
    pub b: ZoneId,
}

// Meeting line template: inline text wins over a file
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MeetingConfig {
    pub template: Option<String>,
    pub template_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClockConfig {
    // Live clocks shown besides the two field zones
    #[serde(default)]
    pub extra_zones: Vec<ZoneId>,
}

// Top-level application configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub zones: ZonesConfig,
    #[serde(default)] // Empty means the built-in catalog
    pub catalog: Vec<CatalogEntry>,
    #[serde(default)]
    pub meeting: MeetingConfig,
    #[serde(default)]
    pub clock: ClockConfig,
}

impl AppConfig {
    /// Loads configuration from files and environment variables.
    ///
    /// Reads configuration from:
    /// 1. built-in defaults
    /// 2. `config.toml` in the platform config directory (optional)
    /// 3. `config.toml` in the working directory (optional)
    /// 4. Environment variables prefixed with `APP_` (e.g., `APP_ZONES__A=Asia/Kolkata`)
    pub fn load() -> Result<Self, ConfigError> {
        let mut files = Vec::new();
        if let Some(dirs) = ProjectDirs::from("", "", "meeting-clock") {
            files.push(dirs.config_dir().join("config"));
        }
        files.push(PathBuf::from("config"));

        let files: Vec<&Path> = files.iter().map(PathBuf::as_path).collect();
        Self::load_from(&files)
    }

    /// Same layering as [`AppConfig::load`] with explicit files, later ones overriding.
    pub fn load_from(files: &[&Path]) -> Result<Self, ConfigError> {
        Self::load_layers(files, ENV_PREFIX)
    }

    fn load_layers(files: &[&Path], env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("zones.a", "America/New_York")?
            .set_default("zones.b", "Europe/London")?;

        for file in files {
            debug!("Config source: {}", file.display());
            builder = builder.add_source(File::with_name(&file.to_string_lossy()).required(false));
        }

        // Note: `__` separates struct levels, e.g. APP_MEETING__TEMPLATE
        let config = builder
            .add_source(
                Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        info!(
            "Loaded config: zones {} / {}, {} catalog entries",
            loaded.zones.a,
            loaded.zones.b,
            loaded.catalog.len()
        );
        Ok(loaded)
    }

    pub fn catalog(&self) -> ZoneCatalog {
        if self.catalog.is_empty() {
            ZoneCatalog::default()
        } else {
            ZoneCatalog::new(self.catalog.clone())
        }
    }

    pub fn meeting_template(&self) -> Result<MeetingTemplate, TemplateError> {
        match (&self.meeting.template, &self.meeting.template_path) {
            (Some(text), _) => MeetingTemplate::from_content(text, "config_template"),
            (None, Some(path)) => MeetingTemplate::load(path),
            (None, None) => MeetingTemplate::builtin(),
        }
    }
}
