use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::*;
use rayon::prelude::*;
use serde_json::Value;
use tracing::{debug, info, instrument, trace};

use crate::domain::SVError;
use crate::record::{Cell, Record};
use crate::resource::Resource;

#[derive(Debug, Clone, Copy, PartialEq)]
enum FileType {
    JSON,
    CSV,
    PARQUET,
    ARROW,
}

// Probed in this order when looking for a collection file.
const EXTENSIONS: [&str; 7] = ["json", "csv", "parquet", "pq", "arrow", "ipc", "feather"];

/// Finds the exported file for a collection in `data_dir`.
pub fn locate(data_dir: &Path, resource: Resource) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| data_dir.join(format!("{}.{ext}", resource.collection())))
        .find(|path| path.is_file())
}

#[instrument(skip(data_dir), fields(collection = resource.collection()))]
pub fn load_resource(data_dir: &Path, resource: Resource) -> Result<Vec<Record>, SVError> {
    match locate(data_dir, resource) {
        Some(path) => load_file(&path),
        None => {
            debug!("No file for {} in {:?}", resource.collection(), data_dir);
            Err(SVError::FileNotFound)
        }
    }
}

#[instrument]
pub fn load_file(path: &Path) -> Result<Vec<Record>, SVError> {
    let file_type = check_file(path)?;
    let start_time = Instant::now();

    let records = match file_type {
        FileType::JSON => parse_json(&fs::read_to_string(path)?)?,
        FileType::CSV => load_frame(load_csv(path)?)?,
        FileType::PARQUET => load_frame(load_parquet(path)?)?,
        FileType::ARROW => load_frame(load_arrow(path)?)?,
    };

    info!(
        "Loaded {} records from {:?} in {}ms",
        records.len(),
        path,
        start_time.elapsed().as_millis()
    );
    Ok(records)
}

fn check_file(path: &Path) -> Result<FileType, SVError> {
    let metadata = fs::metadata(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SVError::FileNotFound,
        ErrorKind::PermissionDenied => SVError::PermissionDenied,
        _ => SVError::IoError(e),
    })?;
    if !metadata.is_file() {
        return Err(SVError::LoadingFailed("Not a file!".into()));
    }
    detect_file_type(path)
}

fn detect_file_type(path: &Path) -> Result<FileType, SVError> {
    match path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_uppercase())
        .as_deref()
    {
        Some("JSON") => Ok(FileType::JSON),
        Some("CSV") => Ok(FileType::CSV),
        Some("PARQUET") | Some("PQ") => Ok(FileType::PARQUET),
        Some("ARROW") | Some("IPC") | Some("FEATHER") => Ok(FileType::ARROW),
        _ => Err(SVError::UnknownFileType),
    }
}

/// Accepts a bare array of objects or an object wrapping it under `data`.
pub fn parse_json(content: &str) -> Result<Vec<Record>, SVError> {
    let items = match serde_json::from_str::<Value>(content)? {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(SVError::LoadingFailed(
                    "expected a \"data\" array of records".into(),
                ));
            }
        },
        _ => {
            return Err(SVError::LoadingFailed(
                "expected an array of records".into(),
            ));
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .map(|(name, value)| (name, Cell::from(value)))
                .collect()),
            _ => Err(SVError::LoadingFailed(format!(
                "record {idx} is not an object"
            ))),
        })
        .collect()
}

// Columns are decoded in parallel, then stitched together row by row.
fn load_frame(frame: LazyFrame) -> Result<Vec<Record>, SVError> {
    let df = frame.collect()?;
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let c_: Result<Vec<Vec<Cell>>, PolarsError> = names
        .par_iter()
        .map(|name| load_column(&df, name))
        .collect();
    let columns = c_?;
    trace!("Decoded {} columns of {} rows", columns.len(), df.height());

    let records = (0..df.height())
        .map(|ridx| {
            names
                .iter()
                .zip(columns.iter())
                .map(|(name, column)| (name.clone(), column[ridx].clone()))
                .collect()
        })
        .collect();
    Ok(records)
}

fn load_column(df: &DataFrame, col_name: &str) -> Result<Vec<Cell>, PolarsError> {
    let dtype = df.column(col_name)?.dtype().clone();
    let numeric = is_numeric_type(&dtype);
    let boolean = dtype == DataType::Boolean;

    let col = df.column(col_name)?.cast(&DataType::String)?;
    let series = col.str()?;
    let cells = series
        .into_iter()
        .map(|value| match value {
            None => Cell::Empty,
            Some(s) if numeric => s
                .parse::<f64>()
                .map(Cell::Number)
                .unwrap_or_else(|_| Cell::Text(s.to_string())),
            Some(s) if boolean => Cell::Bool(s == "true"),
            Some(s) => Cell::Text(s.to_string()),
        })
        .collect();
    Ok(cells)
}

fn is_numeric_type(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn load_csv(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyCsvReader::new(PlPath::Local(path.into()))
        .with_has_header(true)
        .finish()
}

fn load_parquet(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_parquet(PlPath::Local(path.into()), ScanArgsParquet::default())
}

fn load_arrow(path: &Path) -> Result<LazyFrame, PolarsError> {
    LazyFrame::scan_ipc(
        PlPath::Local(path.into()),
        polars::io::ipc::IpcScanOptions,
        UnifiedScanArgs::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
    }

    #[test]
    fn locates_collections_by_name() {
        assert_eq!(
            locate(&fixtures(), Resource::Rooms),
            Some(fixtures().join("rooms.csv"))
        );
        assert_eq!(
            locate(&fixtures(), Resource::Professors),
            Some(fixtures().join("professors.json"))
        );
        assert_eq!(locate(&fixtures().join("missing"), Resource::Users), None);
    }

    #[test]
    fn csv_columns_keep_their_types() {
        let rooms = load_resource(&fixtures(), Resource::Rooms).unwrap();
        assert_eq!(rooms.len(), 12);
        let first = &rooms[0];
        assert_eq!(first.get("Room"), Some(&Cell::Text("CCS-101".into())));
        assert_eq!(first.get("Capacity"), Some(&Cell::Number(40.0)));
        assert_eq!(first.get("Accessible"), Some(&Cell::Bool(true)));
    }

    #[test]
    fn json_nested_values_are_kept_apart() {
        let professors = load_resource(&fixtures(), Resource::Professors).unwrap();
        assert!(!professors.is_empty());
        assert!(professors[0].get("original").is_some_and(Cell::is_nested));
        assert!(matches!(professors[0].get("Name"), Some(Cell::Text(_))));
    }

    #[test]
    fn json_accepts_a_data_envelope() {
        let records = parse_json(r#"{"data": [{"Code": "CCS", "Years": 4}]}"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("Years"), Some(&Cell::Number(4.0)));
    }

    #[test]
    fn json_rejects_other_shapes() {
        assert!(matches!(
            parse_json(r#"{"items": []}"#),
            Err(SVError::LoadingFailed(_))
        ));
        assert!(matches!(
            parse_json(r#"[{"Code": "CCS"}, 3]"#),
            Err(SVError::LoadingFailed(_))
        ));
        assert!(matches!(parse_json("[{"), Err(SVError::JsonError(_))));
    }

    #[test]
    fn missing_and_unknown_files_are_reported() {
        assert!(matches!(
            load_resource(&fixtures(), Resource::Users).map(|_| ()),
            Ok(())
        ));
        assert!(matches!(
            load_file(&fixtures().join("nope.csv")),
            Err(SVError::FileNotFound)
        ));
        assert!(matches!(
            load_file(&fixtures().join("README.txt")),
            Err(SVError::UnknownFileType)
        ));
        assert!(matches!(
            load_resource(&fixtures().join("missing"), Resource::Rooms),
            Err(SVError::FileNotFound)
        ));
    }
}
