use crate::classifier::summary::Summary;
use crate::domain::bands::{compute_price_bands, AreaBand};
use crate::domain::logic::price_per_area;
use crate::domain::{ClassifiedRecord, ComplexRecord, PriceBandRange, SubAreaTable};
use crate::errors::ClassifyError;
use std::path::Path;

#[derive(Debug)]
pub struct LoadedRows {
    pub records: Vec<ComplexRecord>,
    /// Rows the CSV reader could not turn into a record at all.
    pub malformed: usize,
}

/// Reads the harvester's complexes CSV by header name.
pub fn load_harvested(path: &Path) -> Result<LoadedRows, ClassifyError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ClassifyError::Io(format!("{}: {e}", path.display())))?;

    let mut records = Vec::new();
    let mut malformed = 0;

    for (i, row) in reader.deserialize::<ComplexRecord>().enumerate() {
        match row {
            Ok(r) => records.push(r),
            Err(e) => {
                tracing::warn!("Skipping row {} of {}: {e}", i + 2, path.display());
                malformed += 1;
            }
        }
    }

    if records.is_empty() && malformed == 0 {
        return Err(ClassifyError::EmptyInput(path.display().to_string()));
    }

    Ok(LoadedRows { records, malformed })
}

#[derive(Debug)]
pub struct Classification {
    pub records: Vec<ClassifiedRecord>,
    pub price_bands: Vec<PriceBandRange>,
    pub summary: Summary,
}

pub struct Classifier {
    table: SubAreaTable,
}

impl Classifier {
    pub fn new(table: SubAreaTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &SubAreaTable {
        &self.table
    }

    /// Enriches one record with everything that does not depend on the rest
    /// of the dataset. `None` when the record has no name to classify by.
    pub fn enrich(&self, rec: ComplexRecord) -> Option<ClassifiedRecord> {
        let name = rec.display_name()?.to_string();
        let sub_area = self.table.classify(&name).to_string();

        Some(ClassifiedRecord {
            sub_area,
            price_per_area: price_per_area(rec.price_median, rec.area_rep),
            price_band: None,
            area_band: AreaBand::for_area(rec.area_rep),
            complex_no: rec.complex_no,
            name,
            year: rec.year,
            units: rec.units,
            price_min: rec.price_min,
            price_max: rec.price_max,
            price_median: rec.price_median,
            area_min: rec.area_min,
            area_max: rec.area_max,
            area_rep: rec.area_rep,
            listing_type: rec.listing_type,
            floor: rec.floor,
            orientation: rec.orientation,
            listing_count: rec.listing_count,
            road_address: rec.road_address,
        })
    }

    /// Single pass over the harvested rows; `already_dropped` counts rows lost before this point.
    pub fn classify(&self, rows: Vec<ComplexRecord>, already_dropped: usize) -> Classification {
        let loaded = rows.len();
        let total_input = loaded + already_dropped;

        let mut records: Vec<ClassifiedRecord> =
            rows.into_iter().filter_map(|r| self.enrich(r)).collect();
        let nameless = loaded - records.len();
        if nameless > 0 {
            tracing::warn!("Dropped {nameless} row(s) without a usable name");
        }
        if already_dropped > 0 {
            tracing::warn!("Dropped {already_dropped} malformed row(s) before classification");
        }
        let dropped = nameless + already_dropped;

        let entries: Vec<(&str, Option<u64>)> = records
            .iter()
            .map(|r| (r.complex_no.as_str(), r.valid_price()))
            .collect();
        let banding = compute_price_bands(&entries);

        for (rec, band) in records.iter_mut().zip(banding.assignments) {
            rec.price_band = band;
        }

        let summary = Summary::build(
            &records,
            &self.table.names(),
            banding.table.clone(),
            total_input,
            dropped,
        );

        Classification {
            records,
            price_bands: banding.table,
            summary,
        }
    }
}
