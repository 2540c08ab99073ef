use serde::Deserialize;

/// Main configuration structure for Maxi-Market
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub credentials: CredentialsConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub transfers: TransfersConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Base URL of the game site, e.g. "https://www.maxithlon.com"
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Game instance identifier sent with the login form
    #[serde(rename = "game-id", default = "default_game_id")]
    pub game_id: String,
}

/// Login credentials
///
/// Values from the config file are overridden by the `MAXI_USER` and
/// `MAXI_PASS` environment variables when those are set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CredentialsConfig {
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub password: String,
}

/// HTTP client and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Number of attempts per fetch before giving up
    #[serde(rename = "retry-attempts", default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Fixed delay between attempts, in milliseconds
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

/// Dataset location and backup schedule
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the CSV databases and dated snapshots
    #[serde(rename = "data-dir")]
    pub data_dir: String,

    /// Weekday on which the weekly backup copy is written ("thursday", "thu", ...)
    #[serde(rename = "backup-weekday", default = "default_backup_weekday")]
    pub backup_weekday: String,
}

/// Transfer-merge tuning
#[derive(Debug, Clone, Deserialize)]
pub struct TransfersConfig {
    /// A negotiation within this many days of the deadline counts as the sale
    #[serde(rename = "deadline-window-days", default = "default_window_days")]
    pub deadline_window_days: i64,

    /// Remove every copy of a duplicated transfer row instead of keeping one
    #[serde(rename = "drop-all-duplicate-rows", default)]
    pub drop_all_duplicate_rows: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for TransfersConfig {
    fn default() -> Self {
        Self {
            deadline_window_days: default_window_days(),
            drop_all_duplicate_rows: false,
        }
    }
}

fn default_game_id() -> String {
    "1".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_backup_weekday() -> String {
    "thursday".to_string()
}

fn default_window_days() -> i64 {
    2
}
