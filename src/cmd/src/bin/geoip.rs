use std::io;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use cmd::command::lookup;
use cmd::command::lookup::Lookup;
use cmd::command::properties;
use cmd::command::query;
use cmd::command::query::Query;
use cmd::config::Config;
use cmd::config::LogLevel;
use cmd::error::Error;
use cmd::error::Result;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

#[derive(Subcommand, Clone)]
enum Commands {
    /// Look up a property of one or more addresses
    Lookup(Lookup),
    /// Run sql with the geoip function over a file of addresses
    Query(Query),
    /// List supported properties
    Properties,
}

#[derive(Parser)]
#[command(propagate_version = true)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let cfg = Config::load(args.config.as_deref())?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level.unwrap_or(cfg.log.level))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(Error::SetGlobalDefaultError)?;

    let version = env!("CARGO_PKG_VERSION");
    debug!("geoip v{version}");

    let mut out = io::stdout().lock();
    match &args.command {
        Commands::Lookup(cmd) => lookup::run(cmd, &cfg, &mut out)?,
        Commands::Query(cmd) => query::run(cmd, &mut out).await?,
        Commands::Properties => properties::run(&mut out)?,
    }

    Ok(())
}
