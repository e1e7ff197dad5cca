use crate::harvester::harvester::HarvestOutput;
use crate::harvester::HarvestError;
use crate::spreadsheets::export_harvest_xlsx;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LATEST_COMPLEXES: &str = "complexes_latest.csv";

#[derive(Debug)]
pub struct HarvestFiles {
    pub complexes_csv: PathBuf,
    pub latest_csv: PathBuf,
    pub listings_csv: PathBuf,
    pub workbook: PathBuf,
}

/// UTF-8 byte order mark, so spreadsheet apps detect the encoding of Korean text.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), HarvestError> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM)?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the run's files into `dir`, stamping each name with `stamp`.
/// `complexes_latest.csv` is overwritten so the classifier can find the newest run.
pub fn write_outputs(out: &HarvestOutput, dir: &Path, stamp: &str) -> Result<HarvestFiles, HarvestError> {
    fs::create_dir_all(dir)?;

    let files = HarvestFiles {
        complexes_csv: dir.join(format!("complexes_{stamp}.csv")),
        latest_csv: dir.join(LATEST_COMPLEXES),
        listings_csv: dir.join(format!("listings_{stamp}.csv")),
        workbook: dir.join(format!("harvest_{stamp}.xlsx")),
    };

    write_csv(&files.complexes_csv, &out.complexes)?;
    fs::copy(&files.complexes_csv, &files.latest_csv)?;
    write_csv(&files.listings_csv, &out.listings)?;

    let buffer = export_harvest_xlsx(&out.complexes, &out.listings)?;
    fs::write(&files.workbook, buffer)?;

    Ok(files)
}
