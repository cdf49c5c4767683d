use crate::types::{
    ClusterSummaryRow, EfficiencyRow, GenerationRankRow, MapPointRow, Priority, SummaryStats,
    WasteRecord, YearMetrics,
};
use crate::util::{format_number, mean};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Records sorted descending by `key`. The sort is stable, so rows with
/// equal keys keep their original order and extremes are deterministic.
fn sorted_desc_by<F>(records: &[WasteRecord], key: F) -> Vec<WasteRecord>
where
    F: Fn(&WasteRecord) -> f64,
{
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    sorted
}

/// Highest and lowest record by `key`, or `None` on an empty subset.
pub fn extremes_by<F>(records: &[WasteRecord], key: F) -> Option<(WasteRecord, WasteRecord)>
where
    F: Fn(&WasteRecord) -> f64,
{
    let sorted = sorted_desc_by(records, key);
    let first = sorted.first()?.clone();
    let last = sorted.last()?.clone();
    Some((first, last))
}

/// Headline metrics for one year's subset: average managed percentage and
/// total waste generation. The average is NaN on an empty subset; the total
/// is 0.0.
pub fn year_metrics(records: &[WasteRecord], year: i32) -> YearMetrics {
    let pcts: Vec<f64> = records.iter().map(|r| r.managed_pct).collect();
    YearMetrics {
        year,
        regions: records.len(),
        avg_managed_pct: mean(&pcts),
        total_generation_tons: records.iter().map(|r| r.generation_tons).sum(),
    }
}

/// Regions ranked by annual waste generation, highest first. Feeds the
/// "Timbulan Sampah Tahunan per Kabupaten/Kota" bar chart.
pub fn generation_ranking(records: &[WasteRecord]) -> Vec<GenerationRankRow> {
    sorted_desc_by(records, |r| r.generation_tons)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| GenerationRankRow {
            rank: idx + 1,
            region: r.region,
            generation_tons: format_number(r.generation_tons, 0),
            managed_pct: format_number(r.managed_pct, 2),
        })
        .collect()
}

/// Regions ranked by managed ratio, highest first. Feeds the horizontal
/// "Efisiensi Pengelolaan Sampah per Wilayah" bar chart.
pub fn efficiency_ranking(records: &[WasteRecord]) -> Vec<EfficiencyRow> {
    sorted_desc_by(records, |r| r.managed_ratio)
        .into_iter()
        .enumerate()
        .map(|(idx, r)| EfficiencyRow {
            rank: idx + 1,
            region: r.region,
            managed_ratio: format_number(r.managed_ratio, 2),
            managed_pct: format_number(r.managed_pct, 2),
        })
        .collect()
}

/// Group the subset by priority label; per group a count and the region
/// names joined with ", " in row order. Feeds the cluster pie chart and its
/// interpretation text. Groups come out sorted by label.
pub fn cluster_distribution(records: &[WasteRecord]) -> Vec<ClusterSummaryRow> {
    let mut groups: Vec<(Priority, usize, Vec<String>)> = Vec::new();
    for r in records {
        match groups.iter_mut().find(|(p, _, _)| *p == r.priority) {
            Some((_, count, names)) => {
                *count += 1;
                names.push(r.region.clone());
            }
            None => groups.push((r.priority, 1, vec![r.region.clone()])),
        }
    }
    groups.sort_by_key(|(p, _, _)| p.label());
    groups
        .into_iter()
        .map(|(priority, count, names)| ClusterSummaryRow {
            priority: priority.label().to_string(),
            count,
            regions: names.join(", "),
        })
        .collect()
}

/// Marker rows for the map view: one per record that resolved to a
/// coordinate, colored by priority. Records without coordinates are left
/// out here; the loader already reported their region names.
pub fn map_points(records: &[WasteRecord]) -> Vec<MapPointRow> {
    records
        .iter()
        .filter_map(|r| {
            let (lat, lon) = (r.lat?, r.lon?);
            Some(MapPointRow {
                region: r.region.clone(),
                priority: r.priority.label().to_string(),
                color: r.priority.color().to_string(),
                lat: format!("{lat:.4}"),
                lon: format!("{lon:.4}"),
            })
        })
        .collect()
}

/// Whole-dataset statistics for the JSON summary export.
pub fn dataset_summary(records: &[WasteRecord]) -> SummaryStats {
    let regions: HashSet<&str> = records.iter().map(|r| r.region.as_str()).collect();
    let pcts: Vec<f64> = records.iter().map(|r| r.managed_pct).collect();
    let mut years: Vec<i32> = records.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();
    SummaryStats {
        total_records: records.len(),
        total_regions: regions.len(),
        years,
        avg_managed_pct: mean(&pcts),
        total_generation_tons: records.iter().map(|r| r.generation_tons).sum(),
        high_priority_records: records.iter().filter(|r| r.cluster == 1).count(),
        low_priority_records: records.iter().filter(|r| r.cluster == 0).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(region: &str, pct: f64, tons: f64, cluster: u8) -> WasteRecord {
        let coord = crate::coords::lookup(region);
        WasteRecord {
            region: region.to_string(),
            year: 2020,
            generation_tons: tons,
            managed_pct: pct,
            managed_ratio: pct / 100.0,
            cluster,
            priority: Priority::from_cluster(cluster).unwrap(),
            lat: coord.map(|(lat, _)| lat),
            lon: coord.map(|(_, lon)| lon),
        }
    }

    fn sample() -> Vec<WasteRecord> {
        vec![
            rec("Kota Samarinda", 10.0, 150_000.0, 0),
            rec("Kota Balikpapan", 50.0, 90_000.0, 1),
            rec("Kota Bontang", 90.0, 20_000.0, 1),
        ]
    }

    #[test]
    fn metrics_mean_and_sum() {
        let m = year_metrics(&sample(), 2020);
        assert_eq!(m.avg_managed_pct, 50.0);
        assert_eq!(m.total_generation_tons, 260_000.0);
        assert_eq!(m.regions, 3);
    }

    #[test]
    fn metrics_on_empty_subset() {
        let m = year_metrics(&[], 2020);
        assert!(m.avg_managed_pct.is_nan());
        assert_eq!(m.total_generation_tons, 0.0);
    }

    #[test]
    fn generation_ranking_is_descending() {
        let rows = generation_ranking(&sample());
        let names: Vec<&str> = rows.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(names, ["Kota Samarinda", "Kota Balikpapan", "Kota Bontang"]);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].generation_tons, "150,000");
    }

    #[test]
    fn efficiency_ranking_orders_by_ratio() {
        let rows = efficiency_ranking(&sample());
        assert_eq!(rows[0].region, "Kota Bontang");
        assert_eq!(rows[0].managed_ratio, "0.90");
        assert_eq!(rows[2].region, "Kota Samarinda");
    }

    #[test]
    fn extremes_match_sorted_ends() {
        let (max, min) = extremes_by(&sample(), |r| r.managed_pct).unwrap();
        assert_eq!(max.region, "Kota Bontang");
        assert_eq!(min.region, "Kota Samarinda");
    }

    #[test]
    fn extremes_of_empty_subset_is_none() {
        assert!(extremes_by(&[], |r| r.managed_pct).is_none());
    }

    #[test]
    fn ties_keep_original_row_order() {
        let data = vec![
            rec("Kota Samarinda", 40.0, 5000.0, 0),
            rec("Kota Balikpapan", 40.0, 5000.0, 0),
        ];
        let rows = generation_ranking(&data);
        assert_eq!(rows[0].region, "Kota Samarinda");
        assert_eq!(rows[1].region, "Kota Balikpapan");
    }

    #[test]
    fn cluster_distribution_counts_and_lists() {
        let rows = cluster_distribution(&sample());
        // Sorted by label: Rendah before Tinggi.
        assert_eq!(rows[0].priority, "Prioritas Rendah");
        assert_eq!(rows[0].count, 1);
        assert_eq!(rows[0].regions, "Kota Samarinda");
        assert_eq!(rows[1].priority, "Prioritas Tinggi");
        assert_eq!(rows[1].count, 2);
        assert_eq!(rows[1].regions, "Kota Balikpapan, Kota Bontang");
    }

    #[test]
    fn cluster_counts_sum_to_subset_size() {
        let data = sample();
        let total: usize = cluster_distribution(&data).iter().map(|r| r.count).sum();
        assert_eq!(total, data.len());
    }

    #[test]
    fn ratio_round_trips_to_percentage() {
        for r in sample() {
            assert!((r.managed_ratio * 100.0 - r.managed_pct).abs() < 1e-9);
        }
    }

    #[test]
    fn map_points_colored_by_priority() {
        let points = map_points(&sample());
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].color, "red");
        assert_eq!(points[1].color, "green");
        assert_eq!(points[0].lat, "-0.5022");
    }

    #[test]
    fn map_points_skip_rows_without_coordinates() {
        let mut data = sample();
        data.push(rec("Kota Antah Berantah", 20.0, 100.0, 0));
        assert_eq!(map_points(&data).len(), 3);
    }

    #[test]
    fn summary_covers_whole_dataset() {
        let s = dataset_summary(&sample());
        assert_eq!(s.total_records, 3);
        assert_eq!(s.total_regions, 3);
        assert_eq!(s.years, vec![2020]);
        assert_eq!(s.high_priority_records, 2);
        assert_eq!(s.low_priority_records, 1);
    }
}
