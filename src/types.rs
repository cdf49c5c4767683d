use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Two-valued priority classification pre-assigned by the upstream
/// clustering step. Canonical mapping: cluster 0 is "Prioritas Rendah",
/// cluster 1 is "Prioritas Tinggi". The source files disagree with each
/// other on this encoding, so the label is always derived from the numeric
/// cluster id here and never read back from a text column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Tinggi,
    Rendah,
}

impl Priority {
    pub fn from_cluster(cluster: u8) -> Option<Priority> {
        match cluster {
            0 => Some(Priority::Rendah),
            1 => Some(Priority::Tinggi),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Tinggi => "Prioritas Tinggi",
            Priority::Rendah => "Prioritas Rendah",
        }
    }

    /// Marker color used by the dashboard's map view.
    pub fn color(&self) -> &'static str {
        match self {
            Priority::Tinggi => "green",
            Priority::Rendah => "red",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One CSV row exactly as it appears in the spreadsheet exports, with the
/// original Indonesian column headers. Every field is an optional string so
/// malformed cells become per-row validation failures in the loader instead
/// of aborting the whole read.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "Kabupaten/Kota")]
    pub region: Option<String>,
    #[serde(rename = "Tahun")]
    pub year: Option<String>,
    #[serde(rename = "Timbulan Sampah Tahunan (ton/tahun)(A)")]
    pub generation_tons: Option<String>,
    #[serde(rename = "%Sampah Terkelola(B+C)/A")]
    pub managed_pct: Option<String>,
    #[serde(rename = "Cluster")]
    pub cluster: Option<String>,
}

/// Clean, typed record for one (region, year) pair.
#[derive(Debug, Clone)]
pub struct WasteRecord {
    pub region: String,
    pub year: i32,
    /// Timbulan sampah tahunan, ton/tahun (column A).
    pub generation_tons: f64,
    /// Sampah terkelola as a percentage of generation, (B+C)/A.
    pub managed_pct: f64,
    /// managed_pct / 100.
    pub managed_ratio: f64,
    pub cluster: u8,
    pub priority: Priority,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// Scalar metrics for one year's subset. `avg_managed_pct` is NaN when the
/// subset is empty; `total_generation_tons` is 0.0.
#[derive(Debug, Clone, Serialize)]
pub struct YearMetrics {
    pub year: i32,
    pub regions: usize,
    pub avg_managed_pct: f64,
    pub total_generation_tons: f64,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct GenerationRankRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Kabupaten/Kota")]
    #[tabled(rename = "Kabupaten/Kota")]
    pub region: String,
    #[serde(rename = "TimbulanTon")]
    #[tabled(rename = "TimbulanTon")]
    pub generation_tons: String,
    #[serde(rename = "SampahTerkelolaPct")]
    #[tabled(rename = "SampahTerkelolaPct")]
    pub managed_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct EfficiencyRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Kabupaten/Kota")]
    #[tabled(rename = "Kabupaten/Kota")]
    pub region: String,
    #[serde(rename = "RasioTerkelola")]
    #[tabled(rename = "RasioTerkelola")]
    pub managed_ratio: String,
    #[serde(rename = "SampahTerkelolaPct")]
    #[tabled(rename = "SampahTerkelolaPct")]
    pub managed_pct: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct ClusterSummaryRow {
    #[serde(rename = "Prioritas")]
    #[tabled(rename = "Prioritas")]
    pub priority: String,
    #[serde(rename = "Jumlah")]
    #[tabled(rename = "Jumlah")]
    pub count: usize,
    #[serde(rename = "DaftarKabupaten")]
    #[tabled(rename = "DaftarKabupaten")]
    pub regions: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct MapPointRow {
    #[serde(rename = "Kabupaten/Kota")]
    #[tabled(rename = "Kabupaten/Kota")]
    pub region: String,
    #[serde(rename = "Prioritas")]
    #[tabled(rename = "Prioritas")]
    pub priority: String,
    #[serde(rename = "Warna")]
    #[tabled(rename = "Warna")]
    pub color: String,
    #[serde(rename = "Latitude")]
    #[tabled(rename = "Latitude")]
    pub lat: String,
    #[serde(rename = "Longitude")]
    #[tabled(rename = "Longitude")]
    pub lon: String,
}

/// Whole-dataset statistics exported as `summary.json`.
#[derive(Debug, Serialize)]
pub struct SummaryStats {
    pub total_records: usize,
    pub total_regions: usize,
    pub years: Vec<i32>,
    pub avg_managed_pct: f64,
    pub total_generation_tons: f64,
    pub high_priority_records: usize,
    pub low_priority_records: usize,
}
