use std::sync::Arc;

use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;
use datafusion::prelude::SessionContext;
use tracing::debug;

pub use error::Result;
pub use udf::GeoIpUdf;

pub mod error;
pub mod table;
pub mod udf;

pub const DEFAULT_TABLE: &str = "ips";

/// Session with the `geoip` function registered.
pub fn session_context(udf: GeoIpUdf) -> SessionContext {
    let ctx = SessionContext::new();
    udf::register(&ctx, udf);

    ctx
}

pub fn register_table(ctx: &SessionContext, name: &str, table: MemTable) -> Result<()> {
    ctx.register_table(name, Arc::new(table))?;

    Ok(())
}

pub async fn execute(ctx: &SessionContext, sql: &str) -> Result<Vec<RecordBatch>> {
    debug!("executing {sql}");
    let df = ctx.sql(sql).await?;

    Ok(df.collect().await?)
}
