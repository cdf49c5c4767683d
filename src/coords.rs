// Static coordinates for the ten regencies/cities of East Kalimantan.
//
// Lookup keys are the exact region names used by the dataset; callers must
// trim before lookup, which `lookup` does for them.
use once_cell::sync::Lazy;
use std::collections::HashMap;

static REGION_COORDS: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("Kab. Paser", (-1.9981, 116.4378));
    m.insert("Kab. Kutai Kartanegara", (-0.4043, 116.9858));
    m.insert("Kab. Berau", (2.1617, 117.4006));
    m.insert("Kab. Kutai Barat", (0.1467, 115.6789));
    m.insert("Kab. Kutai Timur", (0.4461, 117.5898));
    m.insert("Kab. Penajam Paser Utara", (-1.2913, 116.5693));
    m.insert("Kab. Mahakam Ulu", (0.9023, 114.8));
    m.insert("Kota Balikpapan", (-1.2692, 116.8253));
    m.insert("Kota Samarinda", (-0.5022, 117.1537));
    m.insert("Kota Bontang", (0.1333, 117.5));
    m
});

/// Look up the (latitude, longitude) of a region by its trimmed name.
/// Unknown names yield `None`; the loader records them so unmatched regions
/// show up in diagnostics instead of silently disappearing from the map.
pub fn lookup(region: &str) -> Option<(f64, f64)> {
    REGION_COORDS.get(region.trim()).copied()
}
