use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the emissions dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "MAKE": ..., "MODEL": ..., "YEAR": ..., ... }, ...]`
/// * `.csv`  – header row with the same column names
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "json" => load_json(path)?,
        "csv" => load_csv(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = Dataset::from_records(records)
        .with_context(|| format!("building dataset from {}", path.display()))?;
    log::debug!(
        "dataset bounds: years {}, engine sizes {}",
        dataset.bounds.years,
        dataset.bounds.engine_sizes
    );
    Ok(dataset)
}

/// Load the class → colour table (`{ "SUV": "#1f77b4", ... }`).
pub fn load_palette(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading palette {}", path.display()))?;
    serde_json::from_str(&text).context("parsing palette JSON")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "YEAR": 2000, "MAKE": "ACURA", "MODEL": "1.6EL", "VEHICLE CLASS": "COMPACT",
///     "ENGINE SIZE": 1.6, "FUEL": "X", "FUEL CONSUMPTION": 9.2,
///     "EMISSIONS": 186, "FUEL COST": 0.7
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    serde_json::from_str(&text).context("parsing JSON records")
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;

    reader
        .deserialize()
        .enumerate()
        .map(|(row_no, result)| result.with_context(|| format!("CSV row {row_no}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    const JSON: &str = r#"[
        {"YEAR": 2015, "MAKE": "Ford", "MODEL": "Escape", "VEHICLE CLASS": "SUV",
         "ENGINE SIZE": 2.0, "FUEL": "X", "FUEL CONSUMPTION": 8.7, "EMISSIONS": 200, "FUEL COST": 1.1},
        {"YEAR": 2020, "MAKE": "Toyota", "MODEL": "Corolla", "VEHICLE CLASS": "Compact",
         "ENGINE SIZE": 1.6, "FUEL": "Z", "FUEL CONSUMPTION": 6.5, "EMISSIONS": 150, "FUEL COST": 1.3}
    ]"#;

    const CSV: &str = "YEAR,MAKE,MODEL,VEHICLE CLASS,ENGINE SIZE,FUEL,FUEL CONSUMPTION,EMISSIONS,FUEL COST\n\
        2015,Ford,Escape,SUV,2.0,X,8.7,200,1.1\n\
        2020,Toyota,Corolla,Compact,1.6,Z,6.5,150,1.3\n";

    #[test]
    fn test_json_and_csv_agree() {
        let dir = tempfile::tempdir().unwrap();
        let from_json = load_dataset(&write_file(&dir, "data.json", JSON)).unwrap();
        let from_csv = load_dataset(&write_file(&dir, "data.csv", CSV)).unwrap();

        assert_eq!(from_json.len(), 2);
        assert_eq!(from_json.records(), from_csv.records());
        assert_eq!(from_json.classes, vec!["SUV", "Compact"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("reading JSON file"));
    }

    #[test]
    fn test_missing_field_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.json", r#"[{"YEAR": 2015, "MAKE": "Ford"}]"#);
        let err = load_dataset(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing field"));
    }

    #[test]
    fn test_empty_array_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.json", "[]");
        let err = load_dataset(&path).unwrap_err();
        assert!(format!("{err:#}").contains("no records"));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "data.parquet", "");
        assert!(load_dataset(&path).is_err());
    }

    #[test]
    fn test_palette_loads_as_map() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "colorPalette.json", r##"{"SUV": "#1f77b4", "Compact": "#ff7f0e"}"##);
        let map = load_palette(&path).unwrap();
        assert_eq!(map.get("SUV").map(String::as_str), Some("#1f77b4"));
        assert_eq!(map.len(), 2);
    }
}
