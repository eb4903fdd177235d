#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskMode {
    /// The verdict is computed and surfaced but never blocks a trade.
    Advisory,
    /// Orders whose notional exceeds the cap are rejected.
    Strict,
}

impl Default for RiskMode {
    fn default() -> Self {
        Self::Advisory
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskVerdict {
    WithinCap { notional: f64, cap: f64 },
    CapExceeded { notional: f64, cap: f64 },
}

impl RiskVerdict {
    pub fn is_within_cap(&self) -> bool {
        matches!(self, Self::WithinCap { .. })
    }

    pub fn notional(&self) -> f64 {
        match self {
            Self::WithinCap { notional, .. } | Self::CapExceeded { notional, .. } => *notional,
        }
    }

    pub fn cap(&self) -> f64 {
        match self {
            Self::WithinCap { cap, .. } | Self::CapExceeded { cap, .. } => *cap,
        }
    }
}

/// Checks the notional of the quantity about to be traded, never a stale
/// quantity from a previous order.
pub fn check_notional(price: f64, quantity: f64, cap: f64) -> RiskVerdict {
    let notional = price * quantity;

    if notional <= cap {
        RiskVerdict::WithinCap { notional, cap }
    } else {
        RiskVerdict::CapExceeded { notional, cap }
    }
}

#[cfg(test)]
mod tests {
    use super::{check_notional, RiskMode, RiskVerdict};

    #[test]
    fn notional_at_or_below_cap_is_within_cap() {
        let verdict = check_notional(100.0, 10.0, 1_000.0);

        assert!(verdict.is_within_cap());
        assert_eq!(verdict.notional(), 1_000.0);
    }

    #[test]
    fn notional_above_cap_is_flagged() {
        let verdict = check_notional(100.0, 11.0, 1_000.0);

        assert_eq!(
            verdict,
            RiskVerdict::CapExceeded {
                notional: 1_100.0,
                cap: 1_000.0
            }
        );
    }

    #[test]
    fn zero_quantity_is_always_within_cap() {
        let verdict = check_notional(1_000_000.0, 0.0, 1.0);

        assert!(verdict.is_within_cap());
    }

    #[test]
    fn risk_mode_defaults_to_advisory() {
        assert_eq!(RiskMode::default(), RiskMode::Advisory);
    }
}
