// src/classifier/mod.rs

mod classify;
mod output;
pub mod summary;

pub use classify::{load_harvested, Classifier};
pub use output::{write_classification, ClassifyFiles};
pub use summary::Summary;

use crate::config::ClassifyConfig;
use crate::domain::logic::format_price;
use crate::domain::SubAreaTable;
use crate::errors::ClassifyError;

/// Reads the configured harvest CSV, classifies it and writes every artifact.
pub fn run(cfg: &ClassifyConfig) -> Result<ClassifyFiles, ClassifyError> {
    let table = match &cfg.sub_areas {
        Some(rules) => SubAreaTable::new(rules.clone(), cfg.other_label.clone()),
        None => SubAreaTable::builtin_with_other(&cfg.other_label),
    };
    let classifier = Classifier::new(table);

    let loaded = load_harvested(&cfg.input)?;
    tracing::info!(
        "Loaded {} row(s) from {} ({} malformed)",
        loaded.records.len(),
        cfg.input.display(),
        loaded.malformed
    );

    let out = classifier.classify(loaded.records, loaded.malformed);
    let files = write_classification(&out, classifier.table(), &cfg.output_dir)?;

    for (rank, area) in out.summary.ranked_sub_areas().iter().enumerate() {
        tracing::info!(
            "{:>2}. {} avg {} ({} of {} priced)",
            rank + 1,
            area.name,
            format_price(area.avg_price.unwrap_or_default().round() as u64),
            area.priced,
            area.count
        );
    }

    tracing::info!(
        "Classified {} complexes into {} sub-areas, wrote {}",
        out.summary.classified,
        out.summary.sub_areas.iter().filter(|s| s.count > 0).count(),
        files.records_json.display()
    );
    Ok(files)
}
