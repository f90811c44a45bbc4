//! Configuration handling for a comparison run

use std::path::PathBuf;

/// Default comparison name used in reports and export file names
pub const DEFAULT_COMPARISON_NAME: &str = "COMPARISON";

/// Output format for comparison results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(OutputFormat::Terminal),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Logging verbosity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the primary dataset
    pub primary_file: PathBuf,
    /// Path to the secondary dataset
    pub secondary_file: PathBuf,
    /// Column whose values uniquely identify each row
    pub line_id: String,
    /// Name used in reports and export file names
    pub comparison_name: String,
    /// Print the report tables
    pub show_details: bool,
    /// Directory to export the difference report to
    pub export_dir: Option<PathBuf>,
    /// Output format
    pub output_format: OutputFormat,
    /// Logging verbosity
    pub log_level: LogLevel,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary_file: PathBuf::new(),
            secondary_file: PathBuf::new(),
            line_id: String::new(),
            comparison_name: DEFAULT_COMPARISON_NAME.to_string(),
            show_details: false,
            export_dir: None,
            output_format: OutputFormat::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Create a new Config with file paths
    pub fn new(primary_file: PathBuf, secondary_file: PathBuf) -> Self {
        Self {
            primary_file,
            secondary_file,
            ..Default::default()
        }
    }

    /// Set the line identifier column
    pub fn with_line_id(mut self, line_id: impl Into<String>) -> Self {
        self.line_id = line_id.into();
        self
    }

    /// Set the comparison name
    pub fn with_comparison_name(mut self, name: impl Into<String>) -> Self {
        self.comparison_name = name.into();
        self
    }

    /// Print report tables
    pub fn with_show_details(mut self, show: bool) -> Self {
        self.show_details = show;
        self
    }

    /// Export the difference report into `dir`
    pub fn with_export_dir(mut self, dir: PathBuf) -> Self {
        self.export_dir = Some(dir);
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set logging verbosity
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }
}
