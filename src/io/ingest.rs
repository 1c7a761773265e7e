//! Table ingest and normalization.
//!
//! This module turns a dataset's raw table into a clean `LoadedSeries` that
//! is safe to fit and plot.
//!
//! Design goals:
//! - **Strict schema** for declared columns (clear errors + exit code 2)
//! - **Deterministic row handling**: rows with missing values are dropped,
//!   rows with non-numeric or non-finite values fail the dataset
//! - **Separation of concerns**: no fitting or rendering logic here
//!
//! Both comma-separated and whitespace-delimited tables are accepted; the
//! delimiter is detected from the header line.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::StringRecord;

use crate::domain::{DatasetDef, LoadedSeries, YDerivation};
use crate::error::AppError;

/// Conventional data file location for a dataset.
pub fn dataset_path(def: &DatasetDef, data_dir: &Path) -> PathBuf {
    data_dir
        .join(def.prefix)
        .join(format!("{}.csv", def.prefix))
}

/// Load a dataset's series from its conventional location.
pub fn load_series(def: &DatasetDef, data_dir: &Path) -> Result<LoadedSeries, AppError> {
    load_series_from_path(def, &dataset_path(def, data_dir))
}

/// Load a dataset's series from an explicit path.
pub fn load_series_from_path(def: &DatasetDef, path: &Path) -> Result<LoadedSeries, AppError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new(
            2,
            format!(
                "Dataset '{}': failed to read '{}': {e}",
                def.prefix,
                path.display()
            ),
        )
    })?;

    let (headers, records) = read_records(&raw, def)?;
    let header_map = build_header_map(&headers);

    let x_idx = require_column(def, &header_map, def.x_column)?;
    let (num_idx, num_name, den) = match def.y_derivation {
        YDerivation::Column => (
            require_column(def, &header_map, def.y_column)?,
            def.y_column,
            None,
        ),
        YDerivation::Ratio {
            numerator,
            denominator,
        } => (
            require_column(def, &header_map, numerator)?,
            numerator,
            Some((require_column(def, &header_map, denominator)?, denominator)),
        ),
    };
    let label_idx = match def.label_column {
        Some(name) => Some(require_column(def, &header_map, name)?),
        None => None,
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut labels = label_idx.map(|_| Vec::new());

    for (idx, record) in records.iter().enumerate() {
        // +2: records start on the line after the header, lines are 1-based.
        let line = idx + 2;

        // A row missing any required value is dropped, matching the source
        // tables where some metrics simply have gaps.
        let (Some(x_raw), Some(num_raw)) = (get_field(record, x_idx), get_field(record, num_idx))
        else {
            continue;
        };
        let den_raw = match den {
            None => None,
            Some((den_idx, den_name)) => match get_field(record, den_idx) {
                Some(raw) => Some((raw, den_name)),
                None => continue,
            },
        };

        let xv = parse_numeric(def, line, def.x_column, x_raw)? / def.x_divisor;
        let num = parse_numeric(def, line, num_name, num_raw)?;
        let yv = match den_raw {
            None => num,
            Some((raw, den_name)) => num / parse_numeric(def, line, den_name, raw)?,
        };
        if !yv.is_finite() {
            return Err(AppError::new(
                3,
                format!(
                    "Dataset '{}': non-finite y value on line {line}.",
                    def.prefix
                ),
            ));
        }

        x.push(xv);
        y.push(yv);
        if let (Some(labels), Some(label_idx)) = (labels.as_mut(), label_idx) {
            labels.push(get_field(record, label_idx).unwrap_or("").to_string());
        }
    }

    if x.is_empty() {
        return Err(AppError::new(
            3,
            format!("Dataset '{}': no usable data rows.", def.prefix),
        ));
    }

    Ok(LoadedSeries { x, y, labels })
}

/// Parse the raw file into header + records, detecting the delimiter.
fn read_records(
    raw: &str,
    def: &DatasetDef,
) -> Result<(StringRecord, Vec<StringRecord>), AppError> {
    let first_line = raw.lines().find(|l| !l.trim().is_empty()).unwrap_or("");

    // Whitespace-delimited tables are normalized to CSV first. Such files
    // never carry quoted fields, so a plain token join is safe.
    let owned;
    let csv_text = if first_line.contains(',') {
        raw
    } else {
        owned = raw
            .lines()
            .map(|l| l.split_whitespace().collect::<Vec<_>>().join(","))
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        &owned
    };

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| {
            AppError::new(
                2,
                format!("Dataset '{}': failed to read headers: {e}", def.prefix),
            )
        })?
        .clone();

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            AppError::new(2, format!("Dataset '{}': CSV parse error: {e}", def.prefix))
        })?;
        records.push(record);
    }

    Ok((headers, records))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. Strip it so schema validation doesn't report a missing
    // column.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn require_column(
    def: &DatasetDef,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<usize, AppError> {
    header_map
        .get(&normalize_header_name(name))
        .copied()
        .ok_or_else(|| {
            AppError::new(
                2,
                format!("Dataset '{}': missing column `{name}`.", def.prefix),
            )
        })
}

fn get_field(record: &StringRecord, idx: usize) -> Option<&str> {
    record.get(idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_numeric(def: &DatasetDef, line: usize, column: &str, s: &str) -> Result<f64, AppError> {
    let v: f64 = s.parse().map_err(|_| {
        AppError::new(
            3,
            format!(
                "Dataset '{}': non-numeric value '{s}' in `{column}` on line {line}.",
                def.prefix
            ),
        )
    })?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(AppError::new(
            3,
            format!(
                "Dataset '{}': non-finite value in `{column}` on line {line}.",
                def.prefix
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeUnit;
    use std::fs::File;
    use std::io::Write;

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "tech-trends-{}-{name}.csv",
            std::process::id()
        ));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    fn basic_def() -> DatasetDef {
        DatasetDef {
            prefix: "test",
            y_column: "flops",
            ..Default::default()
        }
    }

    #[test]
    fn loads_basic_csv() {
        let path = temp_csv("basic", "year,flops\n1993,5.97e10\n1997,1.338e12\n");
        let series = load_series_from_path(&basic_def(), &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.len(), 2);
        assert_eq!(series.x, vec![1993.0, 1997.0]);
        assert!((series.y[0] - 5.97e10).abs() < 1.0);
        assert!(series.labels.is_none());
    }

    #[test]
    fn loads_whitespace_delimited_table() {
        let path = temp_csv("ascii", "year  flops\n1993  10.0\n1997   100.0\n");
        let series = load_series_from_path(&basic_def(), &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.x, vec![1993.0, 1997.0]);
        assert_eq!(series.y, vec![10.0, 100.0]);
    }

    #[test]
    fn normalizes_bom_and_header_case() {
        // Spreadsheet-exported header: BOM prefix plus mixed-case names.
        let path = temp_csv("bom", "\u{feff}Year,FLOPS\n1993,10.0\n1997,100.0\n");
        let series = load_series_from_path(&basic_def(), &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.x, vec![1993.0, 1997.0]);
        assert_eq!(series.y, vec![10.0, 100.0]);
    }

    #[test]
    fn derives_ratio_y_elementwise() {
        let def = DatasetDef {
            prefix: "test",
            y_column: "size_mb",
            y_derivation: YDerivation::Ratio {
                numerator: "size_mb",
                denominator: "cost_usd",
            },
            ..Default::default()
        };
        let path = temp_csv("ratio", "year,size_mb,cost_usd\n2000,100,50\n2005,900,30\n");
        let series = load_series_from_path(&def, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.y, vec![2.0, 30.0]);
    }

    #[test]
    fn ratio_numerator_error_names_its_column() {
        let def = DatasetDef {
            prefix: "test",
            y_column: "rate",
            y_derivation: YDerivation::Ratio {
                numerator: "pixels",
                denominator: "cycle_time",
            },
            ..Default::default()
        };
        let path = temp_csv("ratio-err", "year,pixels,cycle_time\n2000,many,5\n");
        let err = load_series_from_path(&def, &path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("pixels"));
    }

    #[test]
    fn drops_rows_with_missing_values() {
        let path = temp_csv(
            "gaps",
            "year,flops\n1993,10.0\n1994,\n,20.0\n1997,100.0\n",
        );
        let series = load_series_from_path(&basic_def(), &path).unwrap();
        std::fs::remove_file(&path).ok();

        // 4 data rows, 2 dropped for missing values.
        assert_eq!(series.len(), 2);
        assert_eq!(series.x, vec![1993.0, 1997.0]);
    }

    #[test]
    fn applies_x_divisor() {
        let def = DatasetDef {
            prefix: "test",
            y_column: "brain_cc",
            x_divisor: 1.0e6,
            time_unit: TimeUnit::MillionYears,
            ..Default::default()
        };
        let path = temp_csv("divisor", "year,brain_cc\n-3200000,430\n-10000,1450\n");
        let series = load_series_from_path(&def, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!((series.x[0] - -3.2).abs() < 1e-12);
        assert!((series.x[1] - -0.01).abs() < 1e-12);
    }

    #[test]
    fn loads_point_labels() {
        let def = DatasetDef {
            prefix: "test",
            y_column: "bps",
            label_column: Some("name"),
            ..Default::default()
        };
        let path = temp_csv("labels", "year,bps,name\n1986,1.2e7,SCSI-1\n2003,1.2e9,SATA\n");
        let series = load_series_from_path(&def, &path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(
            series.labels,
            Some(vec!["SCSI-1".to_string(), "SATA".to_string()])
        );
    }

    #[test]
    fn missing_column_is_schema_error() {
        let path = temp_csv("schema", "year,bps\n1990,10.0\n");
        let err = load_series_from_path(&basic_def(), &path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("flops"));
    }

    #[test]
    fn non_numeric_value_is_data_error() {
        let path = temp_csv("numeric", "year,flops\n1990,fast\n");
        let err = load_series_from_path(&basic_def(), &path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_schema_error() {
        let err =
            load_series_from_path(&basic_def(), Path::new("/nonexistent/none.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn all_rows_missing_is_data_error() {
        let path = temp_csv("empty", "year,flops\n1990,\n1991,\n");
        let err = load_series_from_path(&basic_def(), &path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 3);
    }
}
