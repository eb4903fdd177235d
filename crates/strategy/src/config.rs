use crate::error::StrategyError;
use crate::risk::RiskMode;

pub const DEFAULT_SYMBOL: &str = "NASDAQ";
pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 20;
pub const DEFAULT_MAX_NOTIONAL: f64 = 100_000.0;
pub const DEFAULT_BASE_QUANTITY: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub symbol: String,
    pub short_window: usize,
    pub long_window: usize,
    pub max_notional: f64,
    pub base_quantity: f64,
    pub risk_mode: RiskMode,
}

impl StrategyConfig {
    pub fn new(
        symbol: impl Into<String>,
        short_window: usize,
        long_window: usize,
        max_notional: f64,
    ) -> Result<Self, StrategyError> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(StrategyError::EmptySymbol);
        }
        if short_window == 0 || long_window == 0 {
            return Err(StrategyError::NonPositiveWindow);
        }
        if short_window >= long_window {
            return Err(StrategyError::WindowOrder {
                short_window,
                long_window,
            });
        }
        if !max_notional.is_finite() || max_notional <= 0.0 {
            return Err(StrategyError::InvalidMaxNotional);
        }

        Ok(Self {
            symbol,
            short_window,
            long_window,
            max_notional,
            base_quantity: DEFAULT_BASE_QUANTITY,
            risk_mode: RiskMode::Advisory,
        })
    }

    pub fn with_base_quantity(mut self, base_quantity: f64) -> Result<Self, StrategyError> {
        if !base_quantity.is_finite() || base_quantity <= 0.0 {
            return Err(StrategyError::InvalidBaseQuantity);
        }
        self.base_quantity = base_quantity;
        Ok(self)
    }

    pub fn with_risk_mode(mut self, risk_mode: RiskMode) -> Self {
        self.risk_mode = risk_mode;
        self
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_SYMBOL.to_owned(),
            short_window: DEFAULT_SHORT_WINDOW,
            long_window: DEFAULT_LONG_WINDOW,
            max_notional: DEFAULT_MAX_NOTIONAL,
            base_quantity: DEFAULT_BASE_QUANTITY,
            risk_mode: RiskMode::Advisory,
        }
    }
}
