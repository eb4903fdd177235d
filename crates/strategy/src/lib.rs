pub mod config;
pub mod crossover;
pub mod engine;
pub mod error;
pub mod risk;
pub mod sizing;

pub use config::StrategyConfig;
pub use crossover::{crossover_action, Position, Side};
pub use engine::{DecisionEngine, Evaluation, Order, TickOutcome};
pub use error::StrategyError;
pub use risk::{check_notional, RiskMode, RiskVerdict};
pub use sizing::{buy_quantity, sell_quantity};

pub fn module_ready() -> bool {
    true
}
