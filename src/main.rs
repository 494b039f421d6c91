use clap::Parser;
use stamplog::config::{LoggerConfig, OutputTarget, load_config};
use stamplog::{LogLevel, Logger};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stamplog")]
#[command(about = "Write one timestamped, leveled log record", long_about = None)]
struct Cli {
    /// JSON config file ({"level": ..., "output": ...})
    #[arg(long)]
    config: Option<PathBuf>,

    /// Most verbose level still written (overrides the config)
    #[arg(long)]
    threshold: Option<LogLevel>,

    /// File to append to, or "stdout"/"stderr" (overrides the config)
    #[arg(long)]
    output: Option<String>,

    /// Level of the record: trace, debug, verbose, info, warn, error or fatal
    level: LogLevel,

    /// Message parts, one continuation line group each. Read from stdin when omitted
    parts: Vec<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoggerConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.level = Some(threshold);
    }
    if let Some(output) = &cli.output {
        config.output = Some(OutputTarget::parse(output));
    }

    let logger = Logger::with_options(config.into_options()?);

    let parts = if cli.parts.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        vec![input]
    } else {
        cli.parts
    };

    match cli.level {
        LogLevel::Fatal => logger.fatal(&parts),
        level => logger.log(level, &parts)?,
    }

    Ok(())
}
