//! Application configuration loaded from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::metrics::aggregator::DEFAULT_TOTAL_TIME_SECS;
use crate::performance::synthetic::DEFAULT_PLACEHOLDER_SAMPLES;
use crate::performance::types::RangeLabel;

/// An RGB colour written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed `0xRRGGBB` value.
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl std::str::FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Colour used for each range in charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangePalette {
    pub range_0_25: HexColor,
    pub range_25_50: HexColor,
    pub range_50_75: HexColor,
    pub range_75_100: HexColor,
}

impl RangePalette {
    pub fn color(&self, range: RangeLabel) -> HexColor {
        match range {
            RangeLabel::Meters0To25 => self.range_0_25,
            RangeLabel::Meters25To50 => self.range_25_50,
            RangeLabel::Meters50To75 => self.range_50_75,
            RangeLabel::Meters75To100 => self.range_75_100,
        }
    }
}

impl Default for RangePalette {
    fn default() -> Self {
        Self {
            range_0_25: HexColor::rgb(0x5A, 0x7E, 0xCF),
            range_25_50: HexColor::rgb(0xE6, 0x8A, 0x5C),
            range_50_75: HexColor::rgb(0xA8, 0xA8, 0xA8),
            range_75_100: HexColor::rgb(0xF0, 0xD0, 0x50),
        }
    }
}

/// Chart and spreadsheet rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Per-range series colours
    pub palette: RangePalette,
    /// Maximum spreadsheet column width (characters)
    pub column_width_cap: f64,
    /// Decimal places for speed values
    pub speed_decimals: u32,
    /// Decimal places for time values
    pub time_decimals: u32,
    /// Spreadsheet font
    pub font_name: String,
    /// Title bar fill
    pub title_fill: HexColor,
    /// Summary header fill
    pub header_fill: HexColor,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            palette: RangePalette::default(),
            column_width_cap: 20.0,
            speed_decimals: 2,
            time_decimals: 3,
            font_name: "Prompt".to_string(),
            title_fill: HexColor::rgb(0x8A, 0x8A, 0xC4),
            header_fill: HexColor::rgb(0xC0, 0xC9, 0xEE),
        }
    }
}

/// Analysis pipeline settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Nominal total time stored with each record
    pub total_time_secs: f64,
    /// Samples per synthetic placeholder series
    pub placeholder_samples: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            total_time_secs: DEFAULT_TOTAL_TIME_SECS,
            placeholder_samples: DEFAULT_PLACEHOLDER_SAMPLES,
        }
    }
}

/// Database location settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// File name inside the data directory
    pub file_name: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            file_name: "running_analysis.db".to_string(),
        }
    }
}

/// Seed administrator account created on first start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapSettings {
    pub admin_username: String,
    pub admin_password: String,
}

impl Default for BootstrapSettings {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub database: DatabaseSettings,
    pub analysis: AnalysisSettings,
    pub report: ReportSettings,
    pub bootstrap: BootstrapSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            database: DatabaseSettings::default(),
            analysis: AnalysisSettings::default(),
            report: ReportSettings::default(),
            bootstrap: BootstrapSettings::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database.file_name)
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "runsuite", "RunSuite")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let mut config = load_config_from(&get_config_path())?;
    config.data_dir = get_data_dir();
    Ok(config)
}

/// Load configuration from a specific file. A missing file yields defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to a specific file.
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),

    #[error("Invalid colour (expected #RRGGBB): {0}")]
    InvalidColor(String),
}
