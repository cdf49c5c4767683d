// Entry point and high-level CLI flow.
//
// The binary reproduces the views of the waste-management dashboard as
// console reports:
// - Option [1] loads and cleans the clustering dataset, printing diagnostics.
// - Option [2] generates the per-year analysis reports and the JSON summary.
// - Option [3] generates the map/cluster report for a year and an optional
//   priority filter.
// - Option [4] previews the six-year historical dataset.
//
// Dataset paths are taken from the command line (clustering file first,
// historical file second) and fall back to the defaults below; nothing is
// resolved relative to the executable's location.
mod coords;
mod filters;
mod loader;
mod output;
mod reports;
mod types;
mod util;

use loader::DataError;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use types::{Priority, WasteRecord};

const DEFAULT_CLUSTERING_FILE: &str = "data/klasterisasi_capaian_kinerja.csv";
const DEFAULT_HISTORY_FILE: &str = "data/capaian_kinerja_6_tahun.csv";

// Simple in-memory app state so we only load/clean the CSV once per session
// but can generate reports multiple times in a single run. Every explicit
// load still re-reads the file from disk.
static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| Mutex::new(AppState { data: None }));

struct AppState {
    data: Option<Vec<WasteRecord>>,
}

/// Read a single line of input after printing the common "Enter choice:"
/// prompt. Reused for the main menu and for simple numeric inputs.
fn read_choice() -> String {
    print!("Enter choice: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

/// Ask the user whether to go back to the menu after generating reports.
///
/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        print!("Back to menu (Y/N): ");
        let _ = io::stdout().flush();
        let mut buf = String::new();
        io::stdin().read_line(&mut buf).ok();
        match buf.trim().to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Prompt for the year to analyze, offering the distinct years present in
/// the loaded dataset.
fn prompt_year(data: &[WasteRecord]) -> Option<i32> {
    let years = filters::years(data);
    let year_list: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    println!("Available years: {}", year_list.join(", "));
    print!("Select year: ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    match buf.trim().parse::<i32>() {
        Ok(y) => Some(y),
        Err(_) => {
            println!("Invalid year.\n");
            None
        }
    }
}

/// Prompt for the priority categories to keep on the map. Blank input means
/// no filter, which shows every marker.
fn prompt_priorities() -> HashSet<Priority> {
    println!("Filter priority categories: [1] Prioritas Tinggi  [2] Prioritas Rendah");
    print!("Enter numbers separated by spaces (blank for all): ");
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    let mut allowed = HashSet::new();
    for token in buf.split_whitespace() {
        match token {
            "1" => {
                allowed.insert(Priority::Tinggi);
            }
            "2" => {
                allowed.insert(Priority::Rendah);
            }
            other => println!("Ignoring unknown category `{}`.", other),
        }
    }
    allowed
}

/// Handle option [1]: load and clean the clustering dataset.
///
/// On success, we store the records in `APP_STATE` and print a short
/// textual summary of what happened. A missing file is non-fatal: we warn
/// and leave the previous state untouched.
fn handle_load(path: &Path) {
    match loader::load_dataset(path) {
        Ok((data, report)) => {
            println!(
                "Processing dataset... ({} rows read, {} loaded)",
                util::format_int(report.total_rows as i64),
                util::format_int(report.loaded_rows as i64)
            );
            if report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped due to parse/validation errors.",
                    util::format_int(report.parse_errors as i64)
                );
            }
            if !report.unmatched_regions.is_empty() {
                log::warn!(
                    "regions without coordinates: {}",
                    report.unmatched_regions.join(", ")
                );
                println!(
                    "Warning: no coordinates for: {} (excluded from map points).",
                    report.unmatched_regions.join(", ")
                );
            }
            println!();
            let mut state = APP_STATE.lock().unwrap();
            state.data = Some(data);
        }
        Err(DataError::Missing(p)) => {
            log::warn!("dataset file not found: {}", p.display());
            println!("Warning: dataset file `{}` not found. Skipping.\n", p.display());
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

/// Pull a clone of the loaded records out of `APP_STATE`, or complain the
/// way the menu expects.
fn loaded_data() -> Option<Vec<WasteRecord>> {
    let state = APP_STATE.lock().unwrap();
    if state.data.is_none() {
        println!("Error: No data loaded. Please load the dataset first (option 1).\n");
    }
    state.data.clone()
}

/// Handle option [2]: the per-year analysis reports (waste generation
/// ranking, managed-percentage extremes, efficiency ranking, cluster
/// distribution) plus the dataset-wide JSON summary.
fn handle_analysis() {
    let Some(data) = loaded_data() else {
        return;
    };
    let Some(year) = prompt_year(&data) else {
        return;
    };
    let subset = filters::filter_by_year(&data, year);

    println!("\nGenerating analysis reports for {}...\n", year);

    let metrics = reports::year_metrics(&subset, year);
    if metrics.avg_managed_pct.is_nan() {
        println!("Average managed waste: n/a (no rows for {})", year);
    } else {
        println!(
            "Average managed waste: {}%",
            util::format_number(metrics.avg_managed_pct, 2)
        );
    }
    println!(
        "Total waste generation: {} ton\n",
        util::format_number(metrics.total_generation_tons, 0)
    );

    let ranking = reports::generation_ranking(&subset);
    let file1 = format!("report_timbulan_{}.csv", year);
    if let Err(e) = output::write_csv(&file1, &ranking) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 1: Annual Waste Generation per Kabupaten/Kota ({})\n", year);
    output::preview_table_rows(&ranking, 10);
    if let Some((most, least)) = reports::extremes_by(&subset, |r| r.generation_tons) {
        println!(
            "In {}, waste generation was highest in {} ({} ton) and lowest in {} ({} ton).\n",
            year,
            most.region,
            util::format_number(most.generation_tons, 0),
            least.region,
            util::format_number(least.generation_tons, 0)
        );
    }
    println!("(Full table exported to {})\n", file1);

    let efficiency = reports::efficiency_ranking(&subset);
    let file2 = format!("report_efisiensi_{}.csv", year);
    if let Err(e) = output::write_csv(&file2, &efficiency) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 2: Waste Management Efficiency per Region ({})\n", year);
    output::preview_table_rows(&efficiency, 10);
    if let Some((best, worst)) = reports::extremes_by(&subset, |r| r.managed_pct) {
        println!(
            "The highest managed percentage is {} at {}%, the lowest is {} at {}%.\n",
            best.region,
            util::format_number(best.managed_pct, 2),
            worst.region,
            util::format_number(worst.managed_pct, 2)
        );
    }
    println!("(Full table exported to {})\n", file2);

    let distribution = reports::cluster_distribution(&subset);
    let file3 = format!("report_klaster_{}.csv", year);
    if let Err(e) = output::write_csv(&file3, &distribution) {
        eprintln!("Write error: {}", e);
    }
    println!("Report 3: Priority Cluster Distribution ({})\n", year);
    output::preview_table_rows(&distribution, 5);
    for row in &distribution {
        println!("- {} region(s) in {}: {}", row.count, row.priority, row.regions);
    }
    println!("\n(Full table exported to {})\n", file3);

    let summary = reports::dataset_summary(&data);
    if let Err(e) = output::write_json("summary.json", &summary) {
        eprintln!("Write error: {}", e);
    }
    println!(
        "Summary Stats (summary.json): {} records, {} regions, avg managed {}%\n",
        util::format_int(summary.total_records as i64),
        util::format_int(summary.total_regions as i64),
        util::format_number(summary.avg_managed_pct, 2)
    );
}

/// Handle option [3]: the map/cluster report. Filters by year, then by an
/// optional set of priority categories, and lists the colored marker rows.
fn handle_map() {
    let Some(data) = loaded_data() else {
        return;
    };
    let Some(year) = prompt_year(&data) else {
        return;
    };
    let allowed = prompt_priorities();

    let subset = filters::filter_by_year(&data, year);
    let filtered = filters::filter_by_priority(&subset, &allowed);

    println!("\nMap Report: Priority Clusters ({})\n", year);
    let points = reports::map_points(&filtered);
    let file = format!("report_peta_{}.csv", year);
    if let Err(e) = output::write_csv(&file, &points) {
        eprintln!("Write error: {}", e);
    }
    output::preview_table_rows(&points, 10);

    let distribution = reports::cluster_distribution(&filtered);
    println!("Of {} region(s) shown:", filtered.len());
    for row in &distribution {
        println!("- {} in {}: {}", row.count, row.priority, row.regions);
    }
    println!("\n(Full table exported to {})\n", file);
}

/// Handle option [4]: preview the six-year historical dataset as-is.
fn handle_overview(path: &Path) {
    match loader::load_table(path) {
        Ok((headers, rows)) => {
            println!("\nDataset: Capaian Kinerja Pengelolaan Sampah (6 years)\n");
            output::preview_raw_table(&headers, &rows, 15);
            println!(
                "({} rows total; source: SIPSN, Sistem Informasi Pengelolaan Sampah Nasional)\n",
                util::format_int(rows.len() as i64)
            );
        }
        Err(DataError::Missing(p)) => {
            log::warn!("dataset file not found: {}", p.display());
            println!("Warning: dataset file `{}` not found. Skipping.\n", p.display());
        }
        Err(e) => {
            eprintln!("Failed to load file: {}\n", e);
        }
    }
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let clustering: PathBuf = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLUSTERING_FILE));
    let history: PathBuf = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_FILE));

    println!("Capaian Kinerja Pengelolaan Sampah - Provinsi Kalimantan Timur\n");
    loop {
        println!("Select an option:");
        println!("[1] Load the clustering dataset");
        println!("[2] Analysis reports (per year)");
        println!("[3] Map report (year + priority filter)");
        println!("[4] Dataset overview (6-year history)");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => {
                handle_load(&clustering);
            }
            "2" => {
                println!();
                handle_analysis();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "3" => {
                println!();
                handle_map();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            "4" => {
                handle_overview(&history);
            }
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => {
                println!("Invalid choice. Please enter 0-4.\n");
            }
        }
    }
}
