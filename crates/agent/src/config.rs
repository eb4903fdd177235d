use std::{env, fmt, time::Duration};

use runtime::journal::JournalMode;
use strategy::RiskMode;

const DEFAULT_SYMBOL: &str = "NASDAQ";
const DEFAULT_SHORT_WINDOW: usize = 5;
const DEFAULT_LONG_WINDOW: usize = 20;
const DEFAULT_MAX_NOTIONAL: f64 = 100_000.0;
const DEFAULT_BASE_QUANTITY: f64 = 10.0;
const DEFAULT_RISK_MODE: RiskMode = RiskMode::Advisory;
const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;
const DEFAULT_JOURNAL_PATH: &str = "tradinglog.txt";
const DEFAULT_JOURNAL_MODE: JournalMode = JournalMode::Truncate;

#[derive(Debug, Clone)]
pub struct Config {
    pub symbol: String,
    pub short_window: usize,
    pub long_window: usize,
    pub max_notional: f64,
    pub base_quantity: f64,
    pub risk_mode: RiskMode,
    pub tick_interval: Duration,
    pub journal_path: String,
    pub journal_mode: JournalMode,
    pub feed_seed: Option<u64>,
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidSymbol,
    InvalidShortWindow,
    InvalidLongWindow,
    InvalidWindowOrder { short_window: usize, long_window: usize },
    InvalidMaxNotional,
    InvalidBaseQuantity,
    InvalidRiskMode,
    InvalidTickInterval,
    InvalidJournalPath,
    InvalidJournalMode,
    InvalidFeedSeed,
    NonUnicodeSymbol,
    NonUnicodeShortWindow,
    NonUnicodeLongWindow,
    NonUnicodeMaxNotional,
    NonUnicodeBaseQuantity,
    NonUnicodeRiskMode,
    NonUnicodeTickInterval,
    NonUnicodeJournalPath,
    NonUnicodeJournalMode,
    NonUnicodeFeedSeed,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSymbol => {
                write!(f, "AGENT_SYMBOL must not be empty or whitespace")
            }
            Self::InvalidShortWindow => {
                write!(f, "AGENT_SHORT_WINDOW must be a positive integer")
            }
            Self::InvalidLongWindow => {
                write!(f, "AGENT_LONG_WINDOW must be a positive integer")
            }
            Self::InvalidWindowOrder {
                short_window,
                long_window,
            } => {
                write!(
                    f,
                    "AGENT_SHORT_WINDOW ({short_window}) must be strictly smaller than AGENT_LONG_WINDOW ({long_window})"
                )
            }
            Self::InvalidMaxNotional => {
                write!(f, "AGENT_MAX_NOTIONAL must be a finite positive amount")
            }
            Self::InvalidBaseQuantity => {
                write!(f, "AGENT_BASE_QUANTITY must be a finite positive amount")
            }
            Self::InvalidRiskMode => {
                write!(f, "AGENT_RISK_MODE must be one of: advisory, strict")
            }
            Self::InvalidTickInterval => {
                write!(f, "AGENT_TICK_INTERVAL_MS must be a positive integer")
            }
            Self::InvalidJournalPath => {
                write!(f, "AGENT_JOURNAL_PATH must not be empty or whitespace")
            }
            Self::InvalidJournalMode => {
                write!(f, "AGENT_JOURNAL_MODE must be one of: truncate, append")
            }
            Self::InvalidFeedSeed => {
                write!(f, "AGENT_FEED_SEED must be an unsigned integer")
            }
            Self::NonUnicodeSymbol => write!(f, "AGENT_SYMBOL contains non-unicode data"),
            Self::NonUnicodeShortWindow => {
                write!(f, "AGENT_SHORT_WINDOW contains non-unicode data")
            }
            Self::NonUnicodeLongWindow => {
                write!(f, "AGENT_LONG_WINDOW contains non-unicode data")
            }
            Self::NonUnicodeMaxNotional => {
                write!(f, "AGENT_MAX_NOTIONAL contains non-unicode data")
            }
            Self::NonUnicodeBaseQuantity => {
                write!(f, "AGENT_BASE_QUANTITY contains non-unicode data")
            }
            Self::NonUnicodeRiskMode => write!(f, "AGENT_RISK_MODE contains non-unicode data"),
            Self::NonUnicodeTickInterval => {
                write!(f, "AGENT_TICK_INTERVAL_MS contains non-unicode data")
            }
            Self::NonUnicodeJournalPath => {
                write!(f, "AGENT_JOURNAL_PATH contains non-unicode data")
            }
            Self::NonUnicodeJournalMode => {
                write!(f, "AGENT_JOURNAL_MODE contains non-unicode data")
            }
            Self::NonUnicodeFeedSeed => write!(f, "AGENT_FEED_SEED contains non-unicode data"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let symbol = match env::var("AGENT_SYMBOL") {
            Ok(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidSymbol);
                }
                value
            }
            Err(env::VarError::NotPresent) => DEFAULT_SYMBOL.to_owned(),
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeSymbol),
        };

        let short_window = parse_positive_usize_env(
            "AGENT_SHORT_WINDOW",
            DEFAULT_SHORT_WINDOW,
            ConfigError::InvalidShortWindow,
            ConfigError::NonUnicodeShortWindow,
        )?;

        let long_window = parse_positive_usize_env(
            "AGENT_LONG_WINDOW",
            DEFAULT_LONG_WINDOW,
            ConfigError::InvalidLongWindow,
            ConfigError::NonUnicodeLongWindow,
        )?;

        if short_window >= long_window {
            return Err(ConfigError::InvalidWindowOrder {
                short_window,
                long_window,
            });
        }

        let max_notional = parse_positive_f64_env(
            "AGENT_MAX_NOTIONAL",
            DEFAULT_MAX_NOTIONAL,
            ConfigError::InvalidMaxNotional,
            ConfigError::NonUnicodeMaxNotional,
        )?;

        let base_quantity = parse_positive_f64_env(
            "AGENT_BASE_QUANTITY",
            DEFAULT_BASE_QUANTITY,
            ConfigError::InvalidBaseQuantity,
            ConfigError::NonUnicodeBaseQuantity,
        )?;

        let risk_mode = match env::var("AGENT_RISK_MODE") {
            Ok(value) => parse_risk_mode(value.as_str()).ok_or(ConfigError::InvalidRiskMode)?,
            Err(env::VarError::NotPresent) => DEFAULT_RISK_MODE,
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeRiskMode),
        };

        let tick_interval_ms = parse_positive_u64_env(
            "AGENT_TICK_INTERVAL_MS",
            DEFAULT_TICK_INTERVAL_MS,
            ConfigError::InvalidTickInterval,
            ConfigError::NonUnicodeTickInterval,
        )?;

        let journal_path = match env::var("AGENT_JOURNAL_PATH") {
            Ok(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidJournalPath);
                }
                value
            }
            Err(env::VarError::NotPresent) => DEFAULT_JOURNAL_PATH.to_owned(),
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeJournalPath),
        };

        let journal_mode = match env::var("AGENT_JOURNAL_MODE") {
            Ok(value) => {
                parse_journal_mode(value.as_str()).ok_or(ConfigError::InvalidJournalMode)?
            }
            Err(env::VarError::NotPresent) => DEFAULT_JOURNAL_MODE,
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeJournalMode),
        };

        let feed_seed = match env::var("AGENT_FEED_SEED") {
            Ok(value) => Some(
                value
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidFeedSeed)?,
            ),
            Err(env::VarError::NotPresent) => None,
            Err(env::VarError::NotUnicode(_)) => return Err(ConfigError::NonUnicodeFeedSeed),
        };

        Ok(Self {
            symbol,
            short_window,
            long_window,
            max_notional,
            base_quantity,
            risk_mode,
            tick_interval: Duration::from_millis(tick_interval_ms),
            journal_path,
            journal_mode,
            feed_seed,
        })
    }
}

fn parse_risk_mode(value: &str) -> Option<RiskMode> {
    match value {
        "advisory" => Some(RiskMode::Advisory),
        "strict" => Some(RiskMode::Strict),
        _ => None,
    }
}

fn parse_journal_mode(value: &str) -> Option<JournalMode> {
    match value {
        "truncate" => Some(JournalMode::Truncate),
        "append" => Some(JournalMode::Append),
        _ => None,
    }
}

fn parse_positive_usize_env(
    key: &str,
    default_value: usize,
    invalid_error: ConfigError,
    non_unicode_error: ConfigError,
) -> Result<usize, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.parse::<usize>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(invalid_error),
        },
        Err(env::VarError::NotPresent) => Ok(default_value),
        Err(env::VarError::NotUnicode(_)) => Err(non_unicode_error),
    }
}

fn parse_positive_u64_env(
    key: &str,
    default_value: u64,
    invalid_error: ConfigError,
    non_unicode_error: ConfigError,
) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.parse::<u64>() {
            Ok(parsed) if parsed > 0 => Ok(parsed),
            _ => Err(invalid_error),
        },
        Err(env::VarError::NotPresent) => Ok(default_value),
        Err(env::VarError::NotUnicode(_)) => Err(non_unicode_error),
    }
}

fn parse_positive_f64_env(
    key: &str,
    default_value: f64,
    invalid_error: ConfigError,
    non_unicode_error: ConfigError,
) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(value) => match value.parse::<f64>() {
            Ok(parsed) if parsed.is_finite() && parsed > 0.0 => Ok(parsed),
            _ => Err(invalid_error),
        },
        Err(env::VarError::NotPresent) => Ok(default_value),
        Err(env::VarError::NotUnicode(_)) => Err(non_unicode_error),
    }
}
