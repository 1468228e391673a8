use std::path::PathBuf;
use std::time::Duration;

use anyhow::{ensure, Result};
use clap::{Arg, ArgMatches, Command};
use trade_plot::config::PlotConfig;
use trade_plot::refresher::Refresher;
use trade_plot::sink::HtmlFileSink;
use trade_plot::source::JsonFileSource;

fn command() -> Command {
    Command::new("plot_trades")
        .version("0.1.0")
        .about("Periodically plots the trading bot's trades with their stop-loss and take-profit levels")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_parser(clap::value_parser!(PathBuf))
                .help("JSON file with the recorded trades [default: trades.json]"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(clap::value_parser!(PathBuf))
                .help("HTML page the chart is written to [default: trades.html]"),
        )
        .arg(
            Arg::new("refresh-secs")
                .long("refresh-secs")
                .value_parser(clap::value_parser!(u64))
                .help("Seconds between successful refreshes [default: 60]"),
        )
        .arg(
            Arg::new("retry-secs")
                .long("retry-secs")
                .value_parser(clap::value_parser!(u64))
                .help("Seconds to wait after a failed refresh [default: 10]"),
        )
        .arg(
            Arg::new("title")
                .long("title")
                .value_parser(clap::value_parser!(String))
                .help("Chart title"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_parser(clap::value_parser!(u32))
                .help("Chart width in pixels"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_parser(clap::value_parser!(u32))
                .help("Chart height in pixels"),
        )
}

fn config_from(matches: &ArgMatches) -> Result<PlotConfig> {
    let mut config = PlotConfig::default();
    if let Some(path) = matches.get_one::<PathBuf>("file") {
        config.trades_path = path.clone();
    }
    if let Some(path) = matches.get_one::<PathBuf>("output") {
        config.output_path = path.clone();
    }
    if let Some(secs) = matches.get_one::<u64>("refresh-secs") {
        config.refresh_interval = Duration::from_secs(*secs);
    }
    if let Some(secs) = matches.get_one::<u64>("retry-secs") {
        config.retry_interval = Duration::from_secs(*secs);
    }
    if let Some(title) = matches.get_one::<String>("title") {
        config.style.title = title.clone();
    }
    if let Some(width) = matches.get_one::<u32>("width") {
        config.style.width = *width;
    }
    if let Some(height) = matches.get_one::<u32>("height") {
        config.style.height = *height;
    }

    ensure!(!config.refresh_interval.is_zero(), "--refresh-secs must be positive");
    ensure!(!config.retry_interval.is_zero(), "--retry-secs must be positive");
    ensure!(
        config.style.width > 0 && config.style.height > 0,
        "chart dimensions must be positive"
    );
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config_from(&command().get_matches())?;
    log::info!(
        "reading {} and writing {}",
        config.trades_path.display(),
        config.output_path.display()
    );

    let source = JsonFileSource::new(&config.trades_path);
    let sink = HtmlFileSink::new(&config.output_path, config.refresh_interval);
    Refresher::new(source, sink, config).run().await;

    Ok(())
}
