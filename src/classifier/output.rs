use crate::classifier::classify::Classification;
use crate::domain::bands::{AreaBand, PriceBandRange};
use crate::domain::{SubAreaRule, SubAreaTable};
use crate::errors::ClassifyError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CLASSIFIED_JSON: &str = "classified.json";
pub const CLASSIFIED_CSV: &str = "classified.csv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const SCHEMA_JSON: &str = "schema.json";

#[derive(Debug)]
pub struct ClassifyFiles {
    pub records_json: PathBuf,
    pub records_csv: PathBuf,
    pub summary: PathBuf,
    pub schema: PathBuf,
}

#[derive(Serialize)]
struct AreaBandSchema {
    band: AreaBand,
    label: &'static str,
    min_exclusive: f64,
    max_inclusive: Option<f64>,
}

/// Describes the category sets the dashboard filters over.
#[derive(Serialize)]
struct Schema<'a> {
    sub_areas: Vec<String>,
    other_label: &'a str,
    rules: &'a [SubAreaRule],
    price_bands: &'a [PriceBandRange],
    area_bands: Vec<AreaBandSchema>,
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ClassifyError> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text)?;
    Ok(())
}

pub fn write_classification(
    out: &Classification,
    table: &SubAreaTable,
    dir: &Path,
) -> Result<ClassifyFiles, ClassifyError> {
    fs::create_dir_all(dir)?;

    let files = ClassifyFiles {
        records_json: dir.join(CLASSIFIED_JSON),
        records_csv: dir.join(CLASSIFIED_CSV),
        summary: dir.join(SUMMARY_JSON),
        schema: dir.join(SCHEMA_JSON),
    };

    write_json(&files.records_json, &out.records)?;

    let mut writer = csv::Writer::from_path(&files.records_csv)?;
    for rec in &out.records {
        writer.serialize(rec)?;
    }
    writer.flush()?;

    write_json(&files.summary, &out.summary)?;

    let schema = Schema {
        sub_areas: table.names(),
        other_label: table.other(),
        rules: table.rules(),
        price_bands: &out.price_bands,
        area_bands: AreaBand::ALL
            .iter()
            .map(|band| {
                let (min_exclusive, max_inclusive) = band.bounds();
                AreaBandSchema {
                    band: *band,
                    label: band.label(),
                    min_exclusive,
                    max_inclusive,
                }
            })
            .collect(),
    };
    write_json(&files.schema, &schema)?;

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify::{load_harvested, Classifier};
    use crate::classifier::summary::Summary;
    use crate::domain::ClassifiedRecord;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "classify_{tag}_{}",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    const INPUT: &str = "\
complex_no,name,year,units,price_min,price_max,price_median,area_min,area_max,area_rep,listing_type,floor,orientation,listing_count,road_address,latitude,longitude,extracted_at
1,가락마을 1단지,2012,900,40000,52000,45000,59,84,84,매매,10,남향,4,,36.5,127.2,
2,,2015,500,30000,30000,30000,59,59,59,매매,3,,1,,,,
3,세종 스마트 오피스텔,2019,n/a,12000,14000,13000,24,33,29.5,매매,,,2,,,,
";

    #[test]
    fn csv_in_json_and_csv_out() {
        let dir = temp_dir("e2e");
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("complexes_latest.csv");
        fs::write(&input, INPUT).unwrap();

        let loaded = load_harvested(&input).unwrap();
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.records[2].units, None);

        let classifier = Classifier::new(SubAreaTable::builtin());
        let out = classifier.classify(loaded.records, loaded.malformed);
        let files = write_classification(&out, classifier.table(), &dir).unwrap();

        let text = fs::read_to_string(&files.records_json).unwrap();
        let back: Vec<ClassifiedRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(back.len(), 2);
        assert_eq!(back[0].sub_area, "가락마을");
        assert_eq!(back[1].sub_area, crate::domain::rules::OTHER_LABEL);

        let summary: Summary =
            serde_json::from_str(&fs::read_to_string(&files.summary).unwrap()).unwrap();
        assert_eq!(summary.dropped, 1);
        assert_eq!(summary.sub_areas.len(), 17);

        let schema: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files.schema).unwrap()).unwrap();
        assert_eq!(schema["area_bands"].as_array().unwrap().len(), 4);
        assert_eq!(schema["price_bands"].as_array().unwrap().len(), 10);

        let rows = csv::Reader::from_path(&files.records_csv)
            .unwrap()
            .records()
            .count();
        assert_eq!(rows, 2);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn empty_input_is_an_error() {
        let dir = temp_dir("empty");
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("empty.csv");
        fs::write(&input, "complex_no,name\n").unwrap();

        assert!(matches!(
            load_harvested(&input),
            Err(ClassifyError::EmptyInput(_))
        ));
        let _ = fs::remove_dir_all(dir);
    }
}
