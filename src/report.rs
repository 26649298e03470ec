use std::{fs::File, io::Write, path::Path};

use crate::{core::calculator::CostRow, prelude::*};

pub const HEADER: [&str; 10] = [
    "SessionId",
    "Timestamp",
    "Energy",
    "EnergyUsageFee",
    "NetUsageFee",
    "EnergyCost",
    "NetUsageCost",
    "TotalCostNoVat",
    "TotalCostWithVAT",
    "CostCurrency",
];

/// Write the rows to the CSV file, replacing it.
#[instrument(skip_all, fields(path = %path.display(), n_rows = rows.len()))]
pub fn write_csv(rows: &[CostRow], path: &Path) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    write_to(rows, file).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!("Written");
    Ok(())
}

/// The header is written even when there are no rows.
pub fn write_to(rows: &[CostRow], writer: impl Write) -> Result {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
