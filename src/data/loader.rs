use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{PenguinDataset, Record, Species};

/// The palmerpenguins CSV shipped inside the binary.
const BUNDLED_CSV: &str = include_str!("../../assets/penguins.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset compiled into the binary.
pub fn load_bundled() -> Result<PenguinDataset> {
    let records = parse_csv(BUNDLED_CSV.as_bytes()).context("parsing bundled penguins.csv")?;
    Ok(PenguinDataset::new(records, "bundled"))
}

/// Load a penguin dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – palmerpenguins layout, `NA` or empty cell marks a missing value
/// * `.json`    – `[{ "species": "Adelie", "bill_length_mm": 39.1, ... }, ...]`
/// * `.parquet` – same column names, numeric columns as floats or ints
pub fn load_file(path: &Path) -> Result<PenguinDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let records = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            parse_csv(file)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    let dataset = PenguinDataset::new(records, path.display().to_string());
    if dataset.is_empty() {
        bail!("{} contains no records", path.display());
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; `species` is required, every
/// other column may be absent (all values missing) or hold `NA`.
fn parse_csv<R: Read>(input: R) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let position = |name: &str| headers.iter().position(|h| h == name);
    let species_idx = position("species").context("CSV missing 'species' column")?;
    let island_idx = position("island");
    let bill_length_idx = position("bill_length_mm");
    let bill_depth_idx = position("bill_depth_mm");
    let flipper_idx = position("flipper_length_mm");
    let mass_idx = position("body_mass_g");
    let sex_idx = position("sex");
    let year_idx = position("year");

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");

        let species = cell(Some(species_idx))
            .parse::<Species>()
            .with_context(|| format!("CSV row {row_no}"))?;

        records.push(Record {
            species,
            island: cell(island_idx).trim().to_string(),
            bill_length_mm: parse_measurement(cell(bill_length_idx), row_no, "bill_length_mm")?,
            bill_depth_mm: parse_measurement(cell(bill_depth_idx), row_no, "bill_depth_mm")?,
            flipper_length_mm: parse_measurement(cell(flipper_idx), row_no, "flipper_length_mm")?,
            body_mass_g: parse_measurement(cell(mass_idx), row_no, "body_mass_g")?,
            sex: parse_text(cell(sex_idx)),
            year: parse_year(cell(year_idx), row_no)?,
        });
    }

    Ok(records)
}

fn is_missing(s: &str) -> bool {
    let s = s.trim();
    s.is_empty() || s == "NA"
}

fn parse_measurement(s: &str, row: usize, col: &str) -> Result<Option<f64>> {
    if is_missing(s) {
        return Ok(None);
    }
    let value = s
        .trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))?;
    // NaN and infinities read as missing, as in Parquet columns
    Ok(value.is_finite().then_some(value))
}

fn parse_year(s: &str, row: usize) -> Result<Option<i64>> {
    if is_missing(s) {
        return Ok(None);
    }
    s.trim()
        .parse::<i64>()
        .map(Some)
        .with_context(|| format!("Row {row}, year: '{s}' is not an integer"))
}

fn parse_text(s: &str) -> Option<String> {
    if is_missing(s) {
        None
    } else {
        Some(s.trim().to_string())
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One element of a records-oriented JSON export
/// (`df.to_json(orient='records')`). `null` marks a missing value.
#[derive(Debug, Deserialize)]
struct JsonRecord {
    species: String,
    #[serde(default)]
    island: Option<String>,
    #[serde(default)]
    bill_length_mm: Option<f64>,
    #[serde(default)]
    bill_depth_mm: Option<f64>,
    #[serde(default)]
    flipper_length_mm: Option<f64>,
    #[serde(default)]
    body_mass_g: Option<f64>,
    #[serde(default)]
    sex: Option<String>,
    #[serde(default)]
    year: Option<i64>,
}

fn load_json(path: &Path) -> Result<Vec<Record>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<JsonRecord> = serde_json::from_str(&text).context("parsing JSON")?;

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| -> Result<Record> {
            let species = row
                .species
                .parse::<Species>()
                .with_context(|| format!("Row {i}"))?;
            Ok(Record {
                species,
                island: row.island.unwrap_or_default(),
                bill_length_mm: row.bill_length_mm,
                bill_depth_mm: row.bill_depth_mm,
                flipper_length_mm: row.flipper_length_mm,
                body_mass_g: row.body_mass_g,
                sex: row.sex,
                year: row.year,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding penguin records.
///
/// Expected schema: `species` (Utf8, required), `island`/`sex` (Utf8),
/// measurement columns as Float64/Float32/Int64/Int32 and `year` as an
/// integer column. Absent optional columns read as missing.
fn load_parquet(path: &Path) -> Result<Vec<Record>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let column = |name: &str| schema.index_of(name).ok().map(|i| batch.column(i));

        let species_col = column("species").context("Parquet file missing 'species' column")?;
        let island_col = column("island");
        let bill_length_col = column("bill_length_mm");
        let bill_depth_col = column("bill_depth_mm");
        let flipper_col = column("flipper_length_mm");
        let mass_col = column("body_mass_g");
        let sex_col = column("sex");
        let year_col = column("year");

        for row in 0..batch.num_rows() {
            let species = extract_string(species_col, row)
                .with_context(|| format!("Row {row}: failed to read 'species'"))?
                .with_context(|| format!("Row {row}: species is null"))?
                .parse::<Species>()
                .with_context(|| format!("Row {row}"))?;

            let measurement = |col: Option<&Arc<dyn Array>>, name: &str| -> Result<Option<f64>> {
                match col {
                    Some(c) => extract_f64(c, row)
                        .with_context(|| format!("Row {row}: failed to read '{name}'")),
                    None => Ok(None),
                }
            };
            let text = |col: Option<&Arc<dyn Array>>| -> Result<Option<String>> {
                match col {
                    Some(c) => extract_string(c, row),
                    None => Ok(None),
                }
            };

            records.push(Record {
                species,
                island: text(island_col)?.unwrap_or_default(),
                bill_length_mm: measurement(bill_length_col, "bill_length_mm")?,
                bill_depth_mm: measurement(bill_depth_col, "bill_depth_mm")?,
                flipper_length_mm: measurement(flipper_col, "flipper_length_mm")?,
                body_mass_g: measurement(mass_col, "body_mass_g")?,
                sex: text(sex_col)?,
                year: match year_col {
                    Some(c) => extract_i64(c, row)
                        .with_context(|| format!("Row {row}: failed to read 'year'"))?,
                    None => None,
                },
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => bail!("Expected a string column, got {other:?}"),
    }
}

fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    let value = if let Some(arr) = any.downcast_ref::<Float64Array>() {
        arr.value(row)
    } else if let Some(arr) = any.downcast_ref::<Float32Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = any.downcast_ref::<Int64Array>() {
        arr.value(row) as f64
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        arr.value(row) as f64
    } else {
        bail!("Expected a numeric column, got {:?}", col.data_type())
    };
    // pandas writes missing floats as NaN rather than null
    Ok(value.is_finite().then_some(value))
}

fn extract_i64(col: &Arc<dyn Array>, row: usize) -> Result<Option<i64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let any = col.as_any();
    if let Some(arr) = any.downcast_ref::<Int64Array>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = any.downcast_ref::<Int32Array>() {
        Ok(Some(arr.value(row) as i64))
    } else {
        bail!("Expected an integer column, got {:?}", col.data_type())
    }
}
