use std::collections::BTreeMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{FigureError, Result};

// ---------------------------------------------------------------------------
// SeriesSource – where named observation sequences come from
// ---------------------------------------------------------------------------

/// Resolves a configuration name to its observation sequence.
pub trait SeriesSource {
    fn load(&self, name: &str) -> Result<Vec<f64>>;
}

/// In-memory runs, keyed by name. Unknown names resolve to nothing.
impl SeriesSource for BTreeMap<String, Vec<f64>> {
    fn load(&self, name: &str) -> Result<Vec<f64>> {
        self.get(name)
            .cloned()
            .ok_or_else(|| FigureError::MissingSource {
                name: name.to_string(),
                path: PathBuf::from(name),
            })
    }
}

// ---------------------------------------------------------------------------
// Record layout and run directory
// ---------------------------------------------------------------------------

/// Which field of each record carries the observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordLayout {
    /// Zero-based field position inside a record.
    pub field: usize,
    /// Field (object key, CSV header or Parquet column) looked up by name.
    /// Takes precedence over `field` when set.
    pub field_name: Option<String>,
    /// Whether CSV files start with a header row.
    pub has_headers: bool,
}

impl Default for RecordLayout {
    fn default() -> Self {
        // Logged records are `[step, time, accuracy, ...]`.
        Self {
            field: 2,
            field_name: None,
            has_headers: false,
        }
    }
}

/// A directory of run logs, one file per configuration name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDirectory {
    pub base_dir: PathBuf,
    /// File extension, without the dot. Selects the parser.
    pub extension: String,
    #[serde(flatten)]
    pub layout: RecordLayout,
}

impl Default for RunDirectory {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("runs"),
            extension: "json".to_string(),
            layout: RecordLayout::default(),
        }
    }
}

impl RunDirectory {
    pub fn new(base_dir: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            base_dir: base_dir.into(),
            extension: extension.to_string(),
            layout: RecordLayout::default(),
        }
    }

    /// `base_dir/<name>.<extension>`
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{name}.{}", self.extension))
    }
}

impl SeriesSource for RunDirectory {
    fn load(&self, name: &str) -> Result<Vec<f64>> {
        let path = self.path_for(name);
        if !path.is_file() {
            return Err(FigureError::MissingSource {
                name: name.to_string(),
                path,
            });
        }
        let values = load_values(&path, &self.layout)?;
        log::info!(
            "Loaded {} records for '{name}' from {}",
            values.len(),
            path.display()
        );
        Ok(values)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Read one scalar per record from a run log.  Dispatch by extension.
///
/// Supported formats:
/// * `.json`    – `[[step, time, acc], ...]` or `[{"acc": ...}, ...]`
/// * `.csv`     – one record per row
/// * `.parquet` – one record per row, numeric columns
pub fn load_values(path: &Path, layout: &RecordLayout) -> Result<Vec<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path, layout),
        "csv" => load_csv(path, layout),
        "parquet" | "pq" => load_parquet(path, layout),
        other => Err(FigureError::InvalidParameter(format!(
            "unsupported record extension: .{other}"
        ))),
    }
}

fn missing(path: &Path) -> FigureError {
    FigureError::MissingSource {
        name: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string(),
        path: path.to_path_buf(),
    }
}

fn malformed(path: &Path, reason: impl Into<String>) -> FigureError {
    FigureError::MalformedRecord {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// NaN or infinite observations would spread through the baseline offset to
/// every point of the series.
fn finite(v: f64) -> std::result::Result<f64, String> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("observation {v} is not finite"))
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema – a top-level array of records:
///
/// ```json
/// [
///   [0, 12.5, 91.2],
///   [1, 25.1, 91.9],
///   ...
/// ]
/// ```
///
/// Object records are looked up by `field_name`, falling back to the decimal
/// field index as key. A bare number is taken as the observation itself.
fn load_json(path: &Path, layout: &RecordLayout) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path).map_err(|_| missing(path))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| malformed(path, format!("parsing JSON: {e}")))?;

    let records = root
        .as_array()
        .ok_or_else(|| malformed(path, "expected top-level JSON array"))?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| {
            json_record_value(rec, layout)
                .map_err(|reason| malformed(path, format!("record {i}: {reason}")))
        })
        .collect()
}

fn json_record_value(rec: &JsonValue, layout: &RecordLayout) -> std::result::Result<f64, String> {
    let cell = match rec {
        JsonValue::Array(fields) => fields.get(layout.field),
        JsonValue::Object(obj) => match &layout.field_name {
            Some(key) => obj.get(key),
            None => obj.get(&layout.field.to_string()),
        },
        JsonValue::Number(_) => Some(rec),
        other => return Err(format!("unsupported record {other}")),
    };

    let v = cell
        .ok_or_else(|| "field not present".to_string())?
        .as_f64()
        .ok_or_else(|| "field is not a number".to_string())?;
    finite(v)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: one record per row, optional header row.
fn load_csv(path: &Path, layout: &RecordLayout) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(|_| missing(path))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(layout.has_headers)
        .flexible(true)
        .from_reader(file);

    let col = match (&layout.field_name, layout.has_headers) {
        (Some(name), true) => reader
            .headers()
            .map_err(|e| malformed(path, format!("reading CSV headers: {e}")))?
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| malformed(path, format!("CSV missing '{name}' column")))?,
        (Some(name), false) => {
            return Err(FigureError::InvalidParameter(format!(
                "CSV column '{name}' can only be looked up with has_headers enabled"
            )));
        }
        (None, _) => layout.field,
    };

    let mut values = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| malformed(path, format!("CSV row {row_no}: {e}")))?;
        let tok = record
            .get(col)
            .ok_or_else(|| malformed(path, format!("CSV row {row_no}: no field {col}")))?;
        let v = tok.trim().parse::<f64>().map_err(|_| {
            malformed(path, format!("CSV row {row_no}: '{tok}' is not a number"))
        })?;
        let v = finite(v).map_err(|reason| malformed(path, format!("CSV row {row_no}: {reason}")))?;
        values.push(v);
    }
    Ok(values)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load one numeric column of a Parquet file, row by row.
///
/// Float64, Float32, Int64 and Int32 columns are accepted. Nulls and
/// non-finite floats are rejected.
fn load_parquet(path: &Path, layout: &RecordLayout) -> Result<Vec<f64>> {
    let file = File::open(path).map_err(|_| missing(path))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| malformed(path, format!("reading parquet metadata: {e}")))?;
    let reader = builder
        .build()
        .map_err(|e| malformed(path, format!("building parquet reader: {e}")))?;

    let mut values = Vec::new();

    for batch_result in reader {
        let batch =
            batch_result.map_err(|e| malformed(path, format!("reading record batch: {e}")))?;
        let schema = batch.schema();

        let col_idx = match &layout.field_name {
            Some(name) => schema
                .index_of(name)
                .map_err(|_| malformed(path, format!("parquet file missing '{name}' column")))?,
            None => layout.field,
        };
        if col_idx >= batch.num_columns() {
            return Err(malformed(
                path,
                format!("field {col_idx} out of range ({} columns)", batch.num_columns()),
            ));
        }

        let start = values.len();
        extend_numeric(batch.column(col_idx), &mut values)
            .map_err(|reason| malformed(path, reason))?;
        for (row, &v) in values.iter().enumerate().skip(start) {
            finite(v).map_err(|reason| malformed(path, format!("row {row}: {reason}")))?;
        }
    }

    Ok(values)
}

// -- Arrow helpers --

fn extend_numeric(col: &Arc<dyn Array>, out: &mut Vec<f64>) -> std::result::Result<(), String> {
    if col.null_count() > 0 {
        return Err("null value in observation column".to_string());
    }

    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .ok_or("expected Float64Array")?;
            out.extend(arr.values().iter().copied());
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .ok_or("expected Float32Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .ok_or("expected Int64Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .ok_or("expected Int32Array")?;
            out.extend(arr.values().iter().map(|&v| v as f64));
        }
        other => return Err(format!("observation column has type {other:?}, expected a number")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, body: &str) -> PathBuf {
        let path = dir.path().join(file);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn json_array_records_use_third_field() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "best.json", "[[0, 1.5, 90.0], [1, 3.0, 91.5], [2, 4.5, 92.25]]");
        let values = load_values(&path, &RecordLayout::default()).unwrap();
        assert_eq!(values, vec![90.0, 91.5, 92.25]);
    }

    #[test]
    fn json_object_records_use_field_name() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "run.json", r#"[{"acc": 1.0}, {"acc": 2.0}]"#);
        let layout = RecordLayout {
            field_name: Some("acc".to_string()),
            ..Default::default()
        };
        assert_eq!(load_values(&path, &layout).unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn json_short_record_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", "[[0, 1.5, 90.0], [1, 3.0]]");
        let err = load_values(&path, &RecordLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            FigureError::MalformedRecord { ref reason, .. } if reason.starts_with("record 1")
        ));
    }

    #[test]
    fn json_empty_array_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "empty.json", "[]");
        assert!(load_values(&path, &RecordLayout::default()).unwrap().is_empty());
    }

    #[test]
    fn csv_with_and_without_headers() {
        let dir = TempDir::new().unwrap();
        let plain = write(&dir, "plain.csv", "0,0.1,80.5\n1,0.2,81.0\n");
        assert_eq!(
            load_values(&plain, &RecordLayout::default()).unwrap(),
            vec![80.5, 81.0]
        );

        let headed = write(&dir, "headed.csv", "step,acc\n0,70.0\n1,71.0\n");
        let layout = RecordLayout {
            field: 0,
            field_name: Some("acc".to_string()),
            has_headers: true,
        };
        assert_eq!(load_values(&headed, &layout).unwrap(), vec![70.0, 71.0]);
    }

    #[test]
    fn csv_non_numeric_cell_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.csv", "0,0.1,oops\n");
        assert!(matches!(
            load_values(&path, &RecordLayout::default()),
            Err(FigureError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn csv_non_finite_cells_are_malformed() {
        let dir = TempDir::new().unwrap();
        for (file, cell) in [("nan.csv", "NaN"), ("inf.csv", "inf"), ("neg.csv", "-inf")] {
            let path = write(&dir, file, &format!("0,0,90.0\n1,0,{cell}\n2,0,91.0\n"));
            let err = load_values(&path, &RecordLayout::default()).unwrap_err();
            let at_row_one = matches!(
                err,
                FigureError::MalformedRecord { ref reason, .. } if reason.starts_with("CSV row 1")
            );
            assert!(at_row_one, "{cell}: {err:?}");
        }
    }

    #[test]
    fn csv_field_name_without_headers_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "plain.csv", "0,0.1,80.5\n");
        let layout = RecordLayout {
            field_name: Some("acc".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            load_values(&path, &layout),
            Err(FigureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn non_finite_run_log_never_reaches_alignment() {
        use crate::data::align::align_from_source;
        use crate::data::model::AlignParams;

        let dir = TempDir::new().unwrap();
        write(&dir, "best.csv", "0,0,90.0\n1,0,NaN\n2,0,91.0\n");
        let runs = RunDirectory::new(dir.path(), "csv");

        let err = align_from_source(&runs, &["best"], &AlignParams::default()).unwrap_err();
        assert!(matches!(err, FigureError::MalformedRecord { .. }));
    }

    fn write_parquet(path: &Path, acc: Vec<f64>) {
        let schema = Arc::new(Schema::new(vec![Field::new("acc", DataType::Float64, false)]));
        let batch =
            RecordBatch::try_new(schema.clone(), vec![Arc::new(Float64Array::from(acc))]).unwrap();
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn parquet_nan_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nan.parquet");
        write_parquet(&path, vec![90.0, f64::NAN, 91.0]);

        let layout = RecordLayout {
            field: 0,
            ..Default::default()
        };
        let err = load_values(&path, &layout).unwrap_err();
        assert!(matches!(
            err,
            FigureError::MalformedRecord { ref reason, .. } if reason.starts_with("row 1")
        ));
    }

    #[test]
    fn parquet_reads_numeric_column() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("freq8.parquet");

        let schema = Arc::new(Schema::new(vec![
            Field::new("step", DataType::Int64, false),
            Field::new("time", DataType::Float64, false),
            Field::new("acc", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(Int64Array::from(vec![0, 1, 2])),
                Arc::new(Float64Array::from(vec![0.5, 1.0, 1.5])),
                Arc::new(Float32Array::from(vec![88.5f32, 89.0, 89.5])),
            ],
        )
        .unwrap();
        let file = File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        assert_eq!(
            load_values(&path, &RecordLayout::default()).unwrap(),
            vec![88.5, 89.0, 89.5]
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "run.txt", "1\n2\n");
        assert!(matches!(
            load_values(&path, &RecordLayout::default()),
            Err(FigureError::InvalidParameter(_))
        ));
    }

    #[test]
    fn run_directory_resolves_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        write(&dir, "alr0.5.json", "[[0, 0, 1.0], [1, 0, 2.0]]");
        let runs = RunDirectory::new(dir.path(), "json");

        assert_eq!(runs.load("alr0.5").unwrap(), vec![1.0, 2.0]);
        assert_eq!(
            runs.load("alr0.05"),
            Err(FigureError::MissingSource {
                name: "alr0.05".to_string(),
                path: dir.path().join("alr0.05.json"),
            })
        );
    }
}
