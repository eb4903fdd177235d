mod config;
mod wiring;

use std::error::Error;

use runtime::logging::StderrRunLogWriter;
use runtime::stop::spawn_stdin_quit_listener;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = config::Config::from_env()?;
    let mut runner = wiring::build_runner(&config)?;
    let mut run_log = StderrRunLogWriter::new();

    runner.seed_engine(&mut run_log)?;

    println!(
        "trading {} (short={}, long={}, cap={:.0}); press q then Enter to quit",
        config.symbol, config.short_window, config.long_window, config.max_notional
    );

    let mut stop = spawn_stdin_quit_listener();
    let ticks = runner
        .run_until_stopped(&mut stop, config.tick_interval, &mut run_log)
        .await?;

    println!(
        "stopped after {ticks} ticks with {} trades",
        runner.trade_count()
    );
    Ok(())
}
