use std::collections::HashMap;

use crate::dataset::RawRow;
use crate::roster::PlayerRecord;

pub const PLACEHOLDER_IMAGE: &str = "placeholder.png";

/// Build the lookup from the headshot dataset: trimmed-lowercased name ->
/// trimmed image URL. Rows missing either side are dropped.
pub fn build_headshot_map(rows: &[RawRow]) -> HashMap<String, String> {
    let mut map = HashMap::with_capacity(rows.len());
    for row in rows {
        let name = row
            .get("name")
            .map(|raw| raw.trim().to_lowercase())
            .unwrap_or_default();
        let url = row
            .get("image_url")
            .map(|raw| raw.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() || url.is_empty() {
            continue;
        }
        map.insert(name, url);
    }
    map
}

/// Left-outer join on case-insensitive exact name. Every output record ends
/// up with a non-empty image: the mapped URL or the placeholder.
pub fn join_headshots(
    records: &[PlayerRecord],
    map: &HashMap<String, String>,
) -> Vec<PlayerRecord> {
    records
        .iter()
        .map(|record| {
            let key = record.name.trim().to_lowercase();
            let mut out = record.clone();
            out.image = map
                .get(&key)
                .cloned()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
            out
        })
        .collect()
}
