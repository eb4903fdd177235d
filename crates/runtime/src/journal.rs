use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use strategy::{Order, Side};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl From<Side> for TradeAction {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => Self::Buy,
            Side::Sell => Self::Sell,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TradeRecord {
    pub day: u64,
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
}

impl TradeRecord {
    pub fn from_order(order: &Order, symbol: &str) -> Self {
        Self {
            day: order.day,
            action: order.side.into(),
            symbol: symbol.to_owned(),
            quantity: order.quantity,
            price: order.price,
        }
    }
}

pub fn format_trade_line(record: &TradeRecord) -> String {
    format!(
        "day {}: {} {} {:.4} x {:.2}",
        record.day,
        record.action.as_str(),
        record.symbol,
        record.quantity,
        record.price
    )
}

pub trait TradeSink {
    fn record(&mut self, record: &TradeRecord) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl TradeSink for ConsoleSink {
    fn record(&mut self, record: &TradeRecord) -> io::Result<()> {
        println!("{}", format_trade_line(record));
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemorySink {
    records: Vec<TradeRecord>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[TradeRecord] {
        &self.records
    }
}

impl TradeSink for InMemorySink {
    fn record(&mut self, record: &TradeRecord) -> io::Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

pub struct JsonLinesJournal<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesJournal<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> TradeSink for JsonLinesJournal<W> {
    fn record(&mut self, record: &TradeRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
    /// Re-creates the file on every write, so only the most recent trade
    /// line survives.
    Truncate,
    Append,
}

#[derive(Debug)]
pub struct FileJournal {
    path: PathBuf,
    mode: JournalMode,
}

impl FileJournal {
    pub fn new(path: impl Into<PathBuf>, mode: JournalMode) -> Self {
        Self {
            path: path.into(),
            mode,
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        match self.mode {
            JournalMode::Truncate => File::create(&self.path),
            JournalMode::Append => OpenOptions::new()
                .append(true)
                .create(true)
                .open(&self.path),
        }
    }
}

impl TradeSink for FileJournal {
    fn record(&mut self, record: &TradeRecord) -> io::Result<()> {
        let mut file = self.open()?;
        writeln!(file, "{}", format_trade_line(record))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::{SystemTime, UNIX_EPOCH};

    use strategy::{Order, Side};

    use super::{
        format_trade_line, FileJournal, InMemorySink, JournalMode, JsonLinesJournal, TradeAction,
        TradeRecord, TradeSink,
    };

    fn sample_record() -> TradeRecord {
        TradeRecord {
            day: 21,
            action: TradeAction::Buy,
            symbol: "NASDAQ".to_owned(),
            quantity: 2.5,
            price: 152.3,
        }
    }

    fn unique_temp_path(name: &str) -> std::path::PathBuf {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("ma-cross-agent-{name}-{unique}.txt"))
    }

    #[test]
    fn trade_record_is_built_from_an_order() {
        let order = Order {
            day: 21,
            side: Side::Buy,
            quantity: 2.5,
            price: 152.3,
        };

        let record = TradeRecord::from_order(&order, "NASDAQ");

        assert_eq!(record, sample_record());
    }

    #[test]
    fn trade_line_is_human_readable() {
        let line = format_trade_line(&sample_record());

        assert_eq!(line, "day 21: BUY NASDAQ 2.5000 x 152.30");
    }

    #[test]
    fn json_lines_journal_writes_one_object_per_line() {
        let mut output = Vec::new();
        let mut journal = JsonLinesJournal::new(&mut output);

        journal.record(&sample_record()).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "{\"day\":21,\"action\":\"buy\",\"symbol\":\"NASDAQ\",\"quantity\":2.5,\"price\":152.3}\n"
        );
    }

    #[test]
    fn truncating_journal_keeps_only_the_latest_trade() {
        let path = unique_temp_path("truncate");
        let mut journal = FileJournal::new(&path, JournalMode::Truncate);

        journal.record(&sample_record()).unwrap();
        let mut second = sample_record();
        second.day = 22;
        second.action = TradeAction::Sell;
        journal.record(&second).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, format!("{}\n", format_trade_line(&second)));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn appending_journal_keeps_every_trade() {
        let path = unique_temp_path("append");
        let mut journal = FileJournal::new(&path, JournalMode::Append);

        journal.record(&sample_record()).unwrap();
        let mut second = sample_record();
        second.day = 22;
        journal.record(&second).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn file_open_failure_is_reported_to_the_caller() {
        let missing_dir = unique_temp_path("no-such-dir").join("journal.txt");
        let mut journal = FileJournal::new(&missing_dir, JournalMode::Truncate);

        let err = journal.record(&sample_record()).unwrap_err();

        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn in_memory_sink_collects_records() {
        let mut sink = InMemorySink::new();

        sink.record(&sample_record()).unwrap();

        assert_eq!(sink.records(), &[sample_record()]);
    }
}
