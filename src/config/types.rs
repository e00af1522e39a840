use serde::Deserialize;

/// Main configuration structure for Windward
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Input source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the CSV file holding the URL list (must have a `url` column)
    #[serde(rename = "url-list-path")]
    pub url_list_path: String,
}

/// Output table configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the append-only CSV output table
    #[serde(rename = "table-path")]
    pub table_path: String,
}

/// Fetch subsystem tuning
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Maximum attempts per URL before the URL is skipped
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Number of identities kept in the rotation pool
    #[serde(rename = "pool-size", default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_max_attempts() -> u32 {
    8
}

fn default_pool_size() -> usize {
    10
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            pool_size: default_pool_size(),
        }
    }
}
