mod aggregate;
mod fetch;
mod harvest_error;
mod harvester;
pub mod models;
mod output;
mod policy;
mod report;

pub use harvest_error::HarvestError;
pub use harvester::Harvester;
pub use output::{write_outputs, HarvestFiles};
use report::HarvestReport;

use crate::config::HarvestConfig;
use chrono::Local;

/// One full harvest against the live portal, written to `cfg.output_dir`.
pub fn run(cfg: &HarvestConfig) -> Result<HarvestFiles, HarvestError> {
    let harvester = Harvester::from_config(cfg)?;
    let out = harvester.harvest()?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let files = write_outputs(&out, &cfg.output_dir, &stamp)?;

    let s = &out.stats;
    tracing::info!(
        "✅ {} complexes, {} listings from {} region(s); skipped {} page(s), {} complex(es), {} outside bbox",
        s.complexes,
        s.listings,
        s.regions,
        s.skipped_pages,
        s.skipped_complexes,
        s.outside_bbox
    );
    HarvestReport::from_listings(&out.listings).log();
    tracing::info!(
        "Wrote {}, {} and {}",
        files.complexes_csv.display(),
        files.listings_csv.display(),
        files.workbook.display()
    );
    Ok(files)
}
