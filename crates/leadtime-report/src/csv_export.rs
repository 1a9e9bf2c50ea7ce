use std::path::Path;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;

use leadtime_ingest::any_to_string;

/// Write every column of `df` as a comma-separated file with a header row.
pub fn write_frame_csv(path: &Path, df: &DataFrame) -> Result<()> {
    let mut writer =
        csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
    let names: Vec<String> = df
        .get_column_names_owned()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    writer
        .write_record(&names)
        .with_context(|| format!("write header to {}", path.display()))?;
    let columns = df.get_columns();
    for row in 0..df.height() {
        let mut record = Vec::with_capacity(columns.len());
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer
            .write_record(&record)
            .with_context(|| format!("write row {} to {}", row + 1, path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
