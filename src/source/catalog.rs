use crate::record::Record;
use std::collections::HashSet;
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const ADJECTIVES: [&str; 8] = [
    "Classic", "Compact", "Deluxe", "Ergonomic", "Portable", "Rustic", "Sleek", "Vintage",
];

const NOUNS: [&str; 10] = [
    "Backpack", "Chair", "Desk Lamp", "Headphones", "Kettle", "Keyboard", "Mug", "Notebook",
    "Speaker", "Watch",
];

/// Build a deterministic catalog of `count` products
///
/// Ids are `P00001`, `P00002`, ... in collection order.
pub fn generate(count: usize) -> Vec<Record> {
    (0..count).map(product_at).collect()
}

fn product_at(index: usize) -> Record {
    let name = format!(
        "{} {}",
        ADJECTIVES[index % ADJECTIVES.len()],
        NOUNS[(index / ADJECTIVES.len()) % NOUNS.len()]
    );
    // Whole dollars plus one of four cent values
    let price = 5.0 + ((index * 37) % 200) as f64 + [0.0, 0.25, 0.5, 0.99][index % 4];
    let date = format!("2024-{:02}-{:02}", index % 12 + 1, (index * 7) % 28 + 1);

    Record::new(format!("P{:05}", index + 1), name, price, date)
}

/// Load a catalog from a JSON array of records
pub fn from_json(json: &str) -> Result<Vec<Record>, Box<dyn Error>> {
    let records: Vec<Record> = serde_json::from_str(json)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id.as_str()) {
            return Err(format!("duplicate product id in catalog: {}", record.id).into());
        }
    }

    ::log::debug!("Loaded catalog with {} records", records.len());
    Ok(records)
}

/// Load a catalog from a JSON file
pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Vec<Record>, Box<dyn Error>> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    from_json(&contents)
}
