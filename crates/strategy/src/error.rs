use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    EmptySymbol,
    NonPositiveWindow,
    WindowOrder {
        short_window: usize,
        long_window: usize,
    },
    InvalidMaxNotional,
    InvalidBaseQuantity,
    HistoryAlreadySeeded {
        len: usize,
    },
    SeedLengthMismatch {
        expected: usize,
        actual: usize,
    },
    InsufficientHistory {
        window: usize,
        available: usize,
    },
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySymbol => {
                write!(f, "instrument symbol must not be empty or whitespace")
            }
            Self::NonPositiveWindow => {
                write!(f, "moving-average windows must both be greater than zero")
            }
            Self::WindowOrder {
                short_window,
                long_window,
            } => {
                write!(
                    f,
                    "short window ({short_window}) must be strictly smaller than long window ({long_window})"
                )
            }
            Self::InvalidMaxNotional => {
                write!(f, "max notional must be a finite positive amount")
            }
            Self::InvalidBaseQuantity => {
                write!(f, "base quantity must be a finite positive amount")
            }
            Self::HistoryAlreadySeeded { len } => {
                write!(f, "price history already holds {len} samples; seed requires an empty history")
            }
            Self::SeedLengthMismatch { expected, actual } => {
                write!(
                    f,
                    "seed must supply exactly {expected} prices, got {actual}"
                )
            }
            Self::InsufficientHistory { window, available } => {
                write!(
                    f,
                    "window of {window} exceeds the {available} available price samples"
                )
            }
        }
    }
}

impl std::error::Error for StrategyError {}
