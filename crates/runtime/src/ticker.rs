use std::time::Duration;

use feed_sim::PriceFeed;
use strategy::{DecisionEngine, StrategyError, TickOutcome};

use crate::events::{RuntimeEvent, RuntimeStage};
use crate::journal::{TradeRecord, TradeSink};
use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter};
use crate::stop::StopSignal;

/// Drives one instrument: pulls prices from the feed, feeds the decision
/// engine, and fans emitted orders out to the registered sinks. Strictly
/// sequential; one tick completes before the next begins.
pub struct TickRunner<F: PriceFeed> {
    feed: F,
    engine: DecisionEngine,
    sinks: Vec<Box<dyn TradeSink>>,
    tick: u64,
    trades: u64,
}

impl<F: PriceFeed> TickRunner<F> {
    pub fn new(feed: F, engine: DecisionEngine) -> Self {
        Self {
            feed,
            engine,
            sinks: Vec::new(),
            tick: 0,
            trades: 0,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn TradeSink>) {
        self.sinks.push(sink);
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn trade_count(&self) -> u64 {
        self.trades
    }

    /// Pulls `long_window` prices from the feed to establish the initial
    /// history. Must run once before the first tick.
    pub fn seed_engine(&mut self, run_log: &mut dyn RunLogWriter) -> Result<(), StrategyError> {
        let samples = self.engine.config().long_window;
        let prices: Vec<f64> = (0..samples).map(|_| self.feed.next_price()).collect();
        self.engine.seed(prices)?;
        run_log.write(RunLogEvent::new(
            0,
            RunLogEventKind::EngineSeeded,
            Some(format!("samples={samples}")),
        ));
        Ok(())
    }

    pub async fn step_once(
        &mut self,
        run_log: &mut dyn RunLogWriter,
    ) -> Result<Vec<RuntimeEvent>, StrategyError> {
        self.tick += 1;
        let tick = self.tick;
        let mut events = vec![RuntimeEvent::new(tick, RuntimeStage::TickStarted)];
        run_log.write(RunLogEvent::new(tick, RunLogEventKind::TickStarted, None));

        let price = self.feed.next_price();
        self.engine.ingest(price);
        events.push(RuntimeEvent::new(tick, RuntimeStage::PriceApplied));
        run_log.write(RunLogEvent::new(
            tick,
            RunLogEventKind::PriceApplied,
            Some(format!("price={price:.2}")),
        ));

        let evaluation = self.engine.evaluate(price)?;
        events.push(RuntimeEvent::new(tick, RuntimeStage::SignalEvaluated));
        run_log.write(RunLogEvent::new(
            tick,
            RunLogEventKind::SignalEvaluated,
            Some(format!(
                "short_avg={:.4} long_avg={:.4}",
                evaluation.short_avg, evaluation.long_avg
            )),
        ));

        match evaluation.outcome {
            TickOutcome::Hold => {}
            TickOutcome::Trade { order, risk } => {
                if !risk.is_within_cap() {
                    run_log.write(RunLogEvent::new(
                        tick,
                        RunLogEventKind::RiskBreachAdvisory,
                        Some(format!(
                            "notional={:.2} cap={:.2}",
                            risk.notional(),
                            risk.cap()
                        )),
                    ));
                }

                let record = TradeRecord::from_order(&order, &self.engine.config().symbol);
                for sink in &mut self.sinks {
                    if let Err(err) = sink.record(&record) {
                        run_log.write(RunLogEvent::new(
                            tick,
                            RunLogEventKind::JournalWriteFailed,
                            Some(err.to_string()),
                        ));
                    }
                }

                self.trades += 1;
                events.push(RuntimeEvent::new(tick, RuntimeStage::OrderEmitted));
                run_log.write(RunLogEvent::new(
                    tick,
                    RunLogEventKind::OrderEmitted,
                    Some(format!(
                        "day={} action={} quantity={:.4} price={:.2}",
                        order.day,
                        record.action.as_str(),
                        order.quantity,
                        order.price
                    )),
                ));
            }
            TickOutcome::RiskRejected {
                side,
                quantity,
                risk,
            } => {
                run_log.write(RunLogEvent::new(
                    tick,
                    RunLogEventKind::RiskRejected,
                    Some(format!(
                        "side={side:?} quantity={quantity:.4} notional={:.2} cap={:.2}",
                        risk.notional(),
                        risk.cap()
                    )),
                ));
            }
        }

        events.push(RuntimeEvent::new(tick, RuntimeStage::TickCompleted));
        tokio::task::yield_now().await;
        Ok(events)
    }

    /// Runs ticks at the given pacing interval until the stop signal flips.
    /// The interval is pure pacing, not a correctness mechanism.
    pub async fn run_until_stopped(
        &mut self,
        stop: &mut StopSignal,
        interval: Duration,
        run_log: &mut dyn RunLogWriter,
    ) -> Result<u64, StrategyError> {
        while !stop.is_stopped() {
            self.step_once(run_log).await?;

            tokio::select! {
                _ = stop.stopped() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        run_log.write(RunLogEvent::new(
            self.tick,
            RunLogEventKind::RunStopped,
            Some(format!("ticks={} trades={}", self.tick, self.trades)),
        ));
        Ok(self.tick)
    }
}
