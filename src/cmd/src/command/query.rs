use std::io::Write;
use std::path::PathBuf;

use arrow::util::display::FormatOptions;
use arrow::util::pretty::pretty_format_batches_with_options;
use clap::Parser;
use datafusion::prelude::SessionContext;
use ::query::execute;
use ::query::register_table;
use ::query::session_context;
use ::query::table::read_ip_file;
use ::query::GeoIpUdf;
use ::query::DEFAULT_TABLE;
use tracing::info;

use crate::command::NULL_DISPLAY;
use crate::error::Result;

#[derive(Parser, Clone, Debug)]
pub struct Query {
    /// File with one address per line
    #[arg(long)]
    pub input: PathBuf,
    /// Query to run, e.g. select geoip(ip, 'COUNTRY_NAME', './GeoIP.mmdb') from ips
    #[arg(long)]
    pub sql: String,
    /// Name the input is registered under
    #[arg(long, default_value = DEFAULT_TABLE)]
    pub table: String,
}

pub async fn run<W: Write>(args: &Query, out: &mut W) -> Result<()> {
    let ctx = session_context(GeoIpUdf::maxmind());

    run_with(&ctx, args, out).await
}

pub async fn run_with<W: Write>(ctx: &SessionContext, args: &Query, out: &mut W) -> Result<()> {
    info!("loading {:?} as {}", args.input, args.table);
    register_table(ctx, &args.table, read_ip_file(&args.input)?)?;

    let batches = execute(ctx, &args.sql).await?;
    let opts = FormatOptions::default().with_null(NULL_DISPLAY);
    writeln!(out, "{}", pretty_format_batches_with_options(&batches, &opts)?)?;

    Ok(())
}
