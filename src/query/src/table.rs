use std::fs;
use std::path::Path;
use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::array::StringArray;
use arrow::datatypes::DataType;
use arrow::datatypes::Field;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use datafusion::datasource::MemTable;

use crate::error::Result;

pub const IP_COLUMN: &str = "ip";

/// Single column `ip` table.
pub fn ip_table(ips: Vec<Option<String>>) -> Result<MemTable> {
    let schema = Arc::new(Schema::new(vec![Field::new(
        IP_COLUMN,
        DataType::Utf8,
        true,
    )]));
    let col = Arc::new(StringArray::from(ips)) as ArrayRef;
    let batch = RecordBatch::try_new(schema.clone(), vec![col])?;

    Ok(MemTable::try_new(schema, vec![vec![batch]])?)
}

/// Reads one address per line. Empty lines become nulls.
pub fn read_ip_file(path: &Path) -> Result<MemTable> {
    let data = fs::read_to_string(path)?;
    let ips = data
        .lines()
        .map(|line| line.trim())
        .map(|line| (!line.is_empty()).then(|| line.to_string()))
        .collect::<Vec<_>>();

    ip_table(ips)
}
