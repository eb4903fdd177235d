use crate::config::StrategyConfig;
use crate::crossover::{crossover_action, Position, Side};
use crate::error::StrategyError;
use crate::risk::{check_notional, RiskMode, RiskVerdict};
use crate::sizing::{buy_quantity, sell_quantity};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Order {
    pub day: u64,
    pub side: Side,
    pub quantity: f64,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Hold,
    Trade { order: Order, risk: RiskVerdict },
    RiskRejected {
        side: Side,
        quantity: f64,
        risk: RiskVerdict,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    pub short_avg: f64,
    pub long_avg: f64,
    pub outcome: TickOutcome,
}

/// Single-instrument decision engine. Owns the price history and position
/// state exclusively; one instance per instrument, never shared across
/// threads.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: StrategyConfig,
    history: Vec<f64>,
    position: Position,
    last_quantity: f64,
}

impl DecisionEngine {
    pub fn new(config: StrategyConfig) -> Self {
        let last_quantity = config.base_quantity;
        Self {
            config,
            history: Vec::new(),
            position: Position::Flat,
            last_quantity,
        }
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Days are counted as the number of samples seen so far, seed samples
    /// included.
    pub fn day(&self) -> u64 {
        self.history.len() as u64
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn last_quantity(&self) -> f64 {
        self.last_quantity
    }

    /// Establishes the initial `long_window` samples before trading starts.
    /// The history must be empty and the iterator must supply exactly
    /// `long_window` prices.
    pub fn seed<I>(&mut self, prices: I) -> Result<(), StrategyError>
    where
        I: IntoIterator<Item = f64>,
    {
        if !self.history.is_empty() {
            return Err(StrategyError::HistoryAlreadySeeded {
                len: self.history.len(),
            });
        }

        self.history.extend(prices);
        if self.history.len() != self.config.long_window {
            let actual = self.history.len();
            self.history.clear();
            return Err(StrategyError::SeedLengthMismatch {
                expected: self.config.long_window,
                actual,
            });
        }

        Ok(())
    }

    /// Appends the next observed price. Non-positive prices are accepted and
    /// simply skew the averages; the history grows without bound.
    pub fn ingest(&mut self, price: f64) {
        self.history.push(price);
    }

    pub fn moving_average(&self, window: usize) -> Result<f64, StrategyError> {
        if window == 0 || window > self.history.len() {
            return Err(StrategyError::InsufficientHistory {
                window,
                available: self.history.len(),
            });
        }

        let tail = &self.history[self.history.len() - window..];
        Ok(tail.iter().sum::<f64>() / window as f64)
    }

    /// One trading decision, invoked once per tick after `ingest`.
    pub fn evaluate(&mut self, current_price: f64) -> Result<Evaluation, StrategyError> {
        let short_avg = self.moving_average(self.config.short_window)?;
        let long_avg = self.moving_average(self.config.long_window)?;

        let outcome = match crossover_action(self.position, short_avg, long_avg) {
            None => TickOutcome::Hold,
            Some(side) => self.place(side, current_price),
        };

        Ok(Evaluation {
            short_avg,
            long_avg,
            outcome,
        })
    }

    fn place(&mut self, side: Side, current_price: f64) -> TickOutcome {
        // Buys are sized by the sell heuristic and sells by the buy
        // heuristic; the inverted pairing is deliberate. Sizing counts
        // against the history before this tick's sample, so the current
        // price never matches itself.
        let prior = &self.history[..self.history.len() - 1];
        let quantity = match side {
            Side::Buy => sell_quantity(prior, current_price, self.config.base_quantity),
            Side::Sell => buy_quantity(prior, current_price, self.config.base_quantity),
        };

        let risk = check_notional(current_price, quantity, self.config.max_notional);
        if self.config.risk_mode == RiskMode::Strict && !risk.is_within_cap() {
            // A rejected order leaves the position untouched, so the same
            // crossover can retry on a later tick.
            return TickOutcome::RiskRejected {
                side,
                quantity,
                risk,
            };
        }

        self.position = side.entered_position();
        self.last_quantity = quantity;
        TickOutcome::Trade {
            order: Order {
                day: self.day(),
                side,
                quantity,
                price: current_price,
            },
            risk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DecisionEngine, TickOutcome};
    use crate::config::StrategyConfig;
    use crate::crossover::{Position, Side};
    use crate::error::StrategyError;
    use crate::risk::RiskMode;

    fn engine_with_windows(short: usize, long: usize) -> DecisionEngine {
        DecisionEngine::new(StrategyConfig::new("NASDAQ", short, long, 100_000.0).unwrap())
    }

    fn seeded_engine(short: usize, long: usize, seed_price: f64) -> DecisionEngine {
        let mut engine = engine_with_windows(short, long);
        engine
            .seed(std::iter::repeat(seed_price).take(long))
            .unwrap();
        engine
    }

    #[test]
    fn seed_requires_an_empty_history() {
        let mut engine = seeded_engine(5, 20, 150.0);

        let err = engine.seed(std::iter::repeat(150.0).take(20)).unwrap_err();

        assert_eq!(err, StrategyError::HistoryAlreadySeeded { len: 20 });
    }

    #[test]
    fn seed_rejects_wrong_sample_count_and_leaves_history_empty() {
        let mut engine = engine_with_windows(5, 20);

        let err = engine.seed(std::iter::repeat(150.0).take(7)).unwrap_err();

        assert_eq!(
            err,
            StrategyError::SeedLengthMismatch {
                expected: 20,
                actual: 7
            }
        );
        assert_eq!(engine.history_len(), 0);
    }

    #[test]
    fn moving_average_over_full_seed_equals_mean_of_seeded_set() {
        let mut engine = engine_with_windows(2, 4);
        engine.seed([100.0, 110.0, 120.0, 130.0]).unwrap();

        assert_eq!(engine.moving_average(4).unwrap(), 115.0);
    }

    #[test]
    fn moving_average_uses_only_the_last_window_samples() {
        let mut engine = engine_with_windows(2, 4);
        engine.seed([1_000.0, 110.0, 120.0, 130.0]).unwrap();

        assert_eq!(engine.moving_average(2).unwrap(), 125.0);
        assert_eq!(engine.moving_average(3).unwrap(), 120.0);
    }

    #[test]
    fn moving_average_fails_when_window_exceeds_history() {
        let mut engine = engine_with_windows(2, 4);
        engine.seed([100.0, 110.0, 120.0, 130.0]).unwrap();

        let err = engine.moving_average(5).unwrap_err();

        assert_eq!(
            err,
            StrategyError::InsufficientHistory {
                window: 5,
                available: 4
            }
        );
    }

    #[test]
    fn evaluate_before_seeding_fails_with_insufficient_history() {
        let mut engine = engine_with_windows(5, 20);

        let err = engine.evaluate(150.0).unwrap_err();

        assert_eq!(
            err,
            StrategyError::InsufficientHistory {
                window: 5,
                available: 0
            }
        );
    }

    #[test]
    fn equal_averages_produce_no_transition_and_no_order() {
        let mut engine = seeded_engine(5, 20, 150.0);
        engine.ingest(150.0);

        let evaluation = engine.evaluate(150.0).unwrap();

        assert_eq!(evaluation.short_avg, 150.0);
        assert_eq!(evaluation.long_avg, 150.0);
        assert_eq!(evaluation.outcome, TickOutcome::Hold);
        assert_eq!(engine.position(), Position::Flat);
    }

    #[test]
    fn price_spike_from_flat_triggers_a_buy() {
        let mut engine = seeded_engine(1, 20, 100.0);
        engine.ingest(200.0);

        let evaluation = engine.evaluate(200.0).unwrap();

        assert_eq!(evaluation.short_avg, 200.0);
        assert!((evaluation.long_avg - 2_200.0 / 21.0).abs() < 1e-9);
        match evaluation.outcome {
            TickOutcome::Trade { order, .. } => {
                assert_eq!(order.side, Side::Buy);
                assert_eq!(order.price, 200.0);
                assert_eq!(order.day, 21);
            }
            other => panic!("expected a trade, got {other:?}"),
        }
        assert_eq!(engine.position(), Position::Long);
    }

    #[test]
    fn buy_after_spike_above_all_history_is_sized_to_zero() {
        // The buy is sized by the sell heuristic: no historical sample is at
        // or above 200, so the quantity is zero.
        let mut engine = seeded_engine(1, 20, 100.0);
        engine.ingest(200.0);

        let evaluation = engine.evaluate(200.0).unwrap();

        match evaluation.outcome {
            TickOutcome::Trade { order, .. } => assert_eq!(order.quantity, 0.0),
            other => panic!("expected a trade, got {other:?}"),
        }
    }

    #[test]
    fn buy_fires_exactly_once_while_short_average_stays_above_long() {
        let mut engine = seeded_engine(1, 20, 100.0);
        let mut buys = 0;

        for _ in 0..5 {
            engine.ingest(200.0);
            let evaluation = engine.evaluate(200.0).unwrap();
            if let TickOutcome::Trade { order, .. } = evaluation.outcome {
                assert_eq!(order.side, Side::Buy);
                buys += 1;
            }
        }

        assert_eq!(buys, 1);
        assert_eq!(engine.position(), Position::Long);
    }

    #[test]
    fn sell_fires_exactly_once_after_the_averages_cross_back() {
        let mut engine = seeded_engine(1, 20, 100.0);
        engine.ingest(200.0);
        engine.evaluate(200.0).unwrap();
        assert_eq!(engine.position(), Position::Long);

        let mut sells = 0;
        for _ in 0..5 {
            engine.ingest(50.0);
            let evaluation = engine.evaluate(50.0).unwrap();
            if let TickOutcome::Trade { order, .. } = evaluation.outcome {
                assert_eq!(order.side, Side::Sell);
                sells += 1;
            }
        }

        assert_eq!(sells, 1);
        assert_eq!(engine.position(), Position::Flat);
    }

    #[test]
    fn sell_is_sized_by_the_buy_heuristic() {
        let mut engine = seeded_engine(1, 4, 100.0);
        engine.ingest(200.0);
        engine.evaluate(200.0).unwrap();

        engine.ingest(120.0);
        let evaluation = engine.evaluate(120.0).unwrap();

        // Prior history is [100 x4, 200]: four samples at or below 120 out
        // of five.
        match evaluation.outcome {
            TickOutcome::Trade { order, .. } => {
                assert_eq!(order.side, Side::Sell);
                assert_eq!(order.quantity, 8.0);
            }
            other => panic!("expected a trade, got {other:?}"),
        }
    }

    #[test]
    fn advisory_mode_surfaces_a_breached_cap_but_still_trades() {
        let config = StrategyConfig::new("NASDAQ", 1, 4, 1.0).unwrap();
        let mut engine = DecisionEngine::new(config);
        engine.seed([200.0, 100.0, 100.0, 100.0]).unwrap();
        engine.ingest(150.0);

        let evaluation = engine.evaluate(150.0).unwrap();

        match evaluation.outcome {
            TickOutcome::Trade { order, risk } => {
                assert_eq!(order.side, Side::Buy);
                assert!(!risk.is_within_cap());
            }
            other => panic!("expected an advisory trade, got {other:?}"),
        }
        assert_eq!(engine.position(), Position::Long);
    }

    #[test]
    fn strict_mode_rejects_the_order_and_keeps_the_position_flat() {
        let config = StrategyConfig::new("NASDAQ", 1, 4, 1.0)
            .unwrap()
            .with_risk_mode(RiskMode::Strict);
        let mut engine = DecisionEngine::new(config);
        engine.seed([200.0, 100.0, 100.0, 100.0]).unwrap();
        engine.ingest(150.0);

        let evaluation = engine.evaluate(150.0).unwrap();

        match evaluation.outcome {
            TickOutcome::RiskRejected { side, risk, .. } => {
                assert_eq!(side, Side::Buy);
                assert!(!risk.is_within_cap());
            }
            other => panic!("expected a rejection, got {other:?}"),
        }
        assert_eq!(engine.position(), Position::Flat);
        assert_eq!(engine.last_quantity(), 10.0);
    }

    #[test]
    fn last_quantity_tracks_the_most_recent_trade() {
        let mut engine = seeded_engine(1, 20, 100.0);
        assert_eq!(engine.last_quantity(), 10.0);

        engine.ingest(200.0);
        engine.evaluate(200.0).unwrap();

        assert_eq!(engine.last_quantity(), 0.0);
    }

    #[test]
    fn non_positive_prices_are_ingested_without_validation() {
        let mut engine = seeded_engine(1, 4, 100.0);
        engine.ingest(-50.0);

        let evaluation = engine.evaluate(-50.0).unwrap();

        assert_eq!(evaluation.short_avg, -50.0);
        assert_eq!(evaluation.outcome, TickOutcome::Hold);
    }
}
