use std::time::{SystemTime, UNIX_EPOCH};

use feed_sim::{FeedConfig, PriceGenerator};
use runtime::journal::{ConsoleSink, FileJournal};
use runtime::ticker::TickRunner;
use strategy::{DecisionEngine, StrategyConfig, StrategyError};

use crate::config::Config;

pub fn build_runner(config: &Config) -> Result<TickRunner<PriceGenerator>, StrategyError> {
    debug_assert!(feed_sim::module_ready());
    debug_assert!(strategy::module_ready());
    debug_assert!(runtime::module_ready());

    let feed_config = FeedConfig {
        seed: config.feed_seed.unwrap_or_else(seed_from_clock),
        ..FeedConfig::default()
    };
    let feed = PriceGenerator::new(
        feed_config.seed,
        feed_config.price_floor,
        feed_config.price_span,
    );

    let strategy_config = StrategyConfig::new(
        config.symbol.clone(),
        config.short_window,
        config.long_window,
        config.max_notional,
    )?
    .with_base_quantity(config.base_quantity)?
    .with_risk_mode(config.risk_mode);

    let mut runner = TickRunner::new(feed, DecisionEngine::new(strategy_config));
    runner.add_sink(Box::new(ConsoleSink::new()));
    runner.add_sink(Box::new(FileJournal::new(
        &config.journal_path,
        config.journal_mode,
    )));
    Ok(runner)
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.subsec_nanos() as u64 ^ elapsed.as_secs())
        .unwrap_or(1)
}
