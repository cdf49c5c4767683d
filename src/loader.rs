use crate::coords;
use crate::types::{Priority, RawRow, WasteRecord};
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::ReaderBuilder;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Columns the clustering dataset must carry. A file that is present but
/// lacks one of these is a broken artifact, not user input, so the load
/// fails outright instead of degrading row by row.
const REQUIRED_COLUMNS: [&str; 5] = [
    "Kabupaten/Kota",
    "Tahun",
    "Timbulan Sampah Tahunan (ton/tahun)(A)",
    "%Sampah Terkelola(B+C)/A",
    "Cluster",
];

#[derive(Debug, Error)]
pub enum DataError {
    /// The file is absent. Callers treat this as non-fatal: warn and skip
    /// the dependent view instead of crashing.
    #[error("dataset file not found: {0}")]
    Missing(PathBuf),
    #[error("dataset is missing expected column `{0}`")]
    MissingColumn(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    /// Trimmed region names with no entry in the coordinate table, deduped
    /// in first-seen order. These rows still load; they just carry no
    /// coordinates and are excluded from map points.
    pub unmatched_regions: Vec<String>,
}

/// Load the clustering-result dataset and clean it into typed records.
///
/// Per row: trims the region name, parses year / generation / percentage,
/// maps the cluster id to its priority label, derives the managed ratio and
/// attaches coordinates. Rows that fail validation are counted and skipped.
pub fn load_dataset(path: &Path) -> Result<(Vec<WasteRecord>, LoadReport), DataError> {
    if !path.exists() {
        return Err(DataError::Missing(path.to_path_buf()));
    }
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(DataError::MissingColumn(col.to_string()));
        }
    }

    let mut report = LoadReport::default();
    let mut records: Vec<WasteRecord> = Vec::new();

    for result in rdr.deserialize::<RawRow>() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                report.parse_errors += 1;
                continue;
            }
        };

        let region = match row.region.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => r.to_string(),
            _ => {
                report.parse_errors += 1;
                continue;
            }
        };
        let year = match parse_i32_safe(row.year.as_deref()) {
            Some(y) => y,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        let generation_tons = match parse_f64_safe(row.generation_tons.as_deref()) {
            Some(v) if v >= 0.0 => v,
            _ => {
                report.parse_errors += 1;
                continue;
            }
        };
        let managed_pct = match parse_f64_safe(row.managed_pct.as_deref()) {
            Some(v) => v,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };
        // Anything outside the two known cluster ids is a bad cell.
        let (cluster, priority) = match parse_i32_safe(row.cluster.as_deref())
            .and_then(|c| u8::try_from(c).ok())
            .and_then(|c| Priority::from_cluster(c).map(|p| (c, p)))
        {
            Some(pair) => pair,
            None => {
                report.parse_errors += 1;
                continue;
            }
        };

        let coord = coords::lookup(&region);
        if coord.is_none() && !report.unmatched_regions.contains(&region) {
            report.unmatched_regions.push(region.clone());
        }

        records.push(WasteRecord {
            managed_ratio: managed_pct / 100.0,
            region,
            year,
            generation_tons,
            managed_pct,
            cluster,
            priority,
            lat: coord.map(|(lat, _)| lat),
            lon: coord.map(|(_, lon)| lon),
        });
    }

    report.loaded_rows = records.len();
    Ok((records, report))
}

/// Read any of the source CSVs as untyped text for the dataset-overview
/// view: a header row plus every data row as strings.
pub fn load_table(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), DataError> {
    if !path.exists() {
        return Err(DataError::Missing(path.to_path_buf()));
    }
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|f| f.to_string()).collect());
    }
    Ok((headers, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "Kabupaten/Kota,Tahun,Timbulan Sampah Tahunan (ton/tahun)(A),%Sampah Terkelola(B+C)/A,Cluster\n";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn loads_and_derives_clean_rows() {
        let f = write_csv(&format!(
            "{HEADER}Kota Samarinda,2020,\"150,000\",75.5,1\n Kab. Berau ,2020,42000,40.25,0\n"
        ));
        let (records, report) = load_dataset(f.path()).unwrap();
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 0);
        assert!(report.unmatched_regions.is_empty());

        let r = &records[0];
        assert_eq!(r.region, "Kota Samarinda");
        assert_eq!(r.year, 2020);
        assert_eq!(r.generation_tons, 150_000.0);
        assert_eq!(r.managed_pct, 75.5);
        assert_eq!(r.managed_ratio, 0.755);
        assert_eq!(r.priority, Priority::Tinggi);
        assert_eq!(r.lat, Some(-0.5022));

        // Region name trimmed before coordinate lookup.
        let b = &records[1];
        assert_eq!(b.region, "Kab. Berau");
        assert_eq!(b.priority, Priority::Rendah);
        assert!(b.lat.is_some() && b.lon.is_some());
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let err = load_dataset(Path::new("/nonexistent/sampah.csv")).unwrap_err();
        assert!(matches!(err, DataError::Missing(_)));
    }

    #[test]
    fn missing_column_fails_fast() {
        let f = write_csv("Kabupaten/Kota,Tahun\nKota Bontang,2020\n");
        let err = load_dataset(f.path()).unwrap_err();
        match err {
            DataError::MissingColumn(col) => {
                assert_eq!(col, "Timbulan Sampah Tahunan (ton/tahun)(A)")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_rows_are_counted_and_skipped() {
        let f = write_csv(&format!(
            "{HEADER}Kota Bontang,2020,9000,88.0,1\nKota Balikpapan,not-a-year,100,50.0,0\nKab. Paser,2020,-5,50.0,0\nKota Samarinda,2020,100,50.0,7\n"
        ));
        let (records, report) = load_dataset(f.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.parse_errors, 3);
    }

    #[test]
    fn unmatched_region_is_reported_not_dropped() {
        let f = write_csv(&format!(
            "{HEADER}Kota Antah Berantah,2021,5000,30.0,0\nKota Antah Berantah,2022,6000,35.0,0\n"
        ));
        let (records, report) = load_dataset(f.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].lat.is_none());
        assert_eq!(report.unmatched_regions, vec!["Kota Antah Berantah"]);
    }

    #[test]
    fn load_table_returns_headers_and_rows() {
        let f = write_csv(&format!("{HEADER}Kota Bontang,2020,9000,88.0,1\n"));
        let (headers, rows) = load_table(f.path()).unwrap();
        assert_eq!(headers.len(), 5);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "Kota Bontang");
    }
}
