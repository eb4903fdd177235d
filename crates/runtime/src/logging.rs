#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogEventKind {
    EngineSeeded,
    TickStarted,
    PriceApplied,
    SignalEvaluated,
    OrderEmitted,
    RiskBreachAdvisory,
    RiskRejected,
    JournalWriteFailed,
    RunStopped,
}

impl RunLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EngineSeeded => "engine_seeded",
            Self::TickStarted => "tick_started",
            Self::PriceApplied => "price_applied",
            Self::SignalEvaluated => "signal_evaluated",
            Self::OrderEmitted => "order_emitted",
            Self::RiskBreachAdvisory => "risk_breach_advisory",
            Self::RiskRejected => "risk_rejected",
            Self::JournalWriteFailed => "journal_write_failed",
            Self::RunStopped => "run_stopped",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogEvent {
    pub tick: u64,
    pub kind: RunLogEventKind,
    pub detail: Option<String>,
}

impl RunLogEvent {
    pub fn new(tick: u64, kind: RunLogEventKind, detail: Option<String>) -> Self {
        Self { tick, kind, detail }
    }
}

pub trait RunLogWriter {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }

    pub fn kinds(&self) -> Vec<RunLogEventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

/// Discards every event; used where the run log is not under inspection.
#[derive(Debug, Default)]
pub struct NullRunLogWriter;

impl RunLogWriter for NullRunLogWriter {
    fn write(&mut self, _event: RunLogEvent) {}
}

#[derive(Debug, Default)]
pub struct StderrRunLogWriter;

impl StderrRunLogWriter {
    pub fn new() -> Self {
        Self
    }
}

impl RunLogWriter for StderrRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        match event.detail {
            Some(detail) => {
                eprintln!("tick={} event={} {detail}", event.tick, event.kind.as_str())
            }
            None => eprintln!("tick={} event={}", event.tick, event.kind.as_str()),
        }
    }
}
