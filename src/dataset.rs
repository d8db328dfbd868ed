use crate::error::DataError;
use crate::parser::parse_row;
use crate::utils::file_utils::map_file;
use ndarray::{Array1, Array2};
use std::path::Path;
use std::str;

/// Number of sensor channels (sensor ids 2..=32 in the file names).
pub const NUM_CHANNELS: usize = 31;
/// First sensor id appearing in the data file names.
pub const FIRST_SENSOR_ID: usize = 2;
/// Number of time-series samples per split.
pub const NUM_SAMPLES: usize = 3500;
/// Number of features per channel.
pub const FEATURE_DIM: usize = 512;
/// Every entry of a failed sensor capture row carries this value.
pub const SENTINEL_VALUE: f64 = -999999.99;

/// In-memory view of the pre-segmented sensor dataset: one feature matrix
/// per channel for each split, plus the shared training label vector.
///
/// Matrices are aligned by sample index across channels within a split.
/// Loaded once and immutable afterwards, except for the optional
/// degenerate-row filter which shrinks the training side in lockstep.
#[derive(Debug)]
pub struct SensorDataset {
    pub train: Vec<Array2<f64>>,
    pub test: Vec<Array2<f64>>,
    pub labels: Array1<i64>,
}

impl SensorDataset {
    /// Load the full dataset from the fixed directory layout:
    /// `<base>/LS/LS_sensor_<f>.txt`, `<base>/TS/TS_sensor_<f>.txt` for
    /// f in 2..=32, plus `<base>/LS/activity_Id.txt`. Every matrix must be
    /// (3500, 512) and the label vector must have 3500 entries.
    pub fn load(data_path: impl AsRef<Path>) -> Result<Self, DataError> {
        Self::load_with_shape(data_path, NUM_SAMPLES, FEATURE_DIM)
    }

    /// Same contract as [`SensorDataset::load`] with configurable matrix
    /// dimensions. Useful for reduced smoke datasets.
    pub fn load_with_shape(
        data_path: impl AsRef<Path>,
        n_samples: usize,
        n_features: usize,
    ) -> Result<Self, DataError> {
        let ls_path = data_path.as_ref().join("LS");
        let ts_path = data_path.as_ref().join("TS");

        let mut train = Vec::with_capacity(NUM_CHANNELS);
        let mut test = Vec::with_capacity(NUM_CHANNELS);

        for sensor in FIRST_SENSOR_ID..FIRST_SENSOR_ID + NUM_CHANNELS {
            let path = ls_path.join(format!("LS_sensor_{sensor}.txt"));
            train.push(load_matrix(&path, n_samples, n_features)?);
            let path = ts_path.join(format!("TS_sensor_{sensor}.txt"));
            test.push(load_matrix(&path, n_samples, n_features)?);
        }

        let labels = load_labels(&ls_path.join("activity_Id.txt"), n_samples)?;

        log::info!(
            "loaded {} train and {} test channel matrices ({n_samples}x{n_features}), {} labels",
            train.len(),
            test.len(),
            labels.len()
        );

        Ok(Self {
            train,
            test,
            labels,
        })
    }
}

/// Read one whitespace-delimited float matrix of the given shape. Blank
/// lines are skipped; anything else that deviates from the shape is an
/// error naming the file and line.
pub fn load_matrix(path: &Path, n_rows: usize, n_cols: usize) -> Result<Array2<f64>, DataError> {
    let mmap = map_file(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = str::from_utf8(&mmap).map_err(|e| DataError::Parse {
        path: path.to_path_buf(),
        line: 0,
        message: format!("not valid UTF-8: {e}"),
    })?;

    let mut values = Vec::with_capacity(n_rows * n_cols);
    let mut rows = 0usize;
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut input = line;
        let row = parse_row(&mut input).map_err(|e| DataError::Parse {
            path: path.to_path_buf(),
            line: idx + 1,
            message: e.to_string(),
        })?;
        if !input.is_empty() {
            return Err(DataError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("trailing content {input:?}"),
            });
        }
        if row.len() != n_cols {
            return Err(DataError::RaggedRow {
                path: path.to_path_buf(),
                line: idx + 1,
                expected: n_cols,
                found: row.len(),
            });
        }
        values.extend(row);
        rows += 1;
    }

    if rows != n_rows {
        return Err(DataError::RowCount {
            path: path.to_path_buf(),
            expected: n_rows,
            found: rows,
        });
    }

    // Shape is consistent by construction at this point
    Ok(Array2::from_shape_vec((n_rows, n_cols), values).expect("row/col counts already checked"))
}

/// Read the activity label vector. Labels are float-formatted on disk
/// (e.g. `1.000000000000000000e+01`) but must be integral.
pub fn load_labels(path: &Path, n_labels: usize) -> Result<Array1<i64>, DataError> {
    let matrix = load_matrix(path, n_labels, 1)?;

    let mut labels = Vec::with_capacity(n_labels);
    for (idx, &value) in matrix.iter().enumerate() {
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(DataError::Parse {
                path: path.to_path_buf(),
                line: idx + 1,
                message: format!("label {value} is not an integer"),
            });
        }
        labels.push(value as i64);
    }

    Ok(Array1::from_vec(labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut f = fs::File::create(dir.join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }

    /// Lay out a complete miniature dataset: `samples` rows, `features`
    /// columns, every sensor file present unless listed in `skip`.
    fn write_fixture(root: &Path, samples: usize, features: usize, skip: &[&str]) {
        let ls = root.join("LS");
        let ts = root.join("TS");
        fs::create_dir_all(&ls).unwrap();
        fs::create_dir_all(&ts).unwrap();

        let row = |offset: usize| {
            (0..features)
                .map(|c| format!("{:.1}", (offset + c) as f64))
                .collect::<Vec<_>>()
                .join(" ")
        };
        let matrix = (0..samples).map(row).collect::<Vec<_>>().join("\n");

        for sensor in FIRST_SENSOR_ID..FIRST_SENSOR_ID + NUM_CHANNELS {
            let ls_name = format!("LS_sensor_{sensor}.txt");
            if !skip.contains(&ls_name.as_str()) {
                write_file(&ls, &ls_name, &matrix);
            }
            let ts_name = format!("TS_sensor_{sensor}.txt");
            if !skip.contains(&ts_name.as_str()) {
                write_file(&ts, &ts_name, &matrix);
            }
        }

        let labels = (0..samples)
            .map(|i| format!("{:.18e}", (i % 14 + 1) as f64))
            .collect::<Vec<_>>()
            .join("\n");
        write_file(&ls, "activity_Id.txt", &labels);
    }

    #[test]
    fn test_load_matrix_small() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "m.txt", "1.0 2.0 3.0\n4.0 5.0 6.0\n");

        let m = load_matrix(&dir.path().join("m.txt"), 2, 3).unwrap();
        assert_eq!(m.shape(), &[2, 3]);
        assert_eq!(m[[1, 2]], 6.0);
    }

    #[test]
    fn test_load_matrix_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "m.txt", "1.0 2.0\n\n3.0 4.0\n");

        let m = load_matrix(&dir.path().join("m.txt"), 2, 2).unwrap();
        assert_eq!(m[[1, 0]], 3.0);
    }

    #[test]
    fn test_load_matrix_ragged_row() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "m.txt", "1.0 2.0\n3.0\n");

        let err = load_matrix(&dir.path().join("m.txt"), 2, 2).unwrap_err();
        assert!(matches!(
            err,
            DataError::RaggedRow {
                line: 2,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_load_matrix_wrong_row_count() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "m.txt", "1.0 2.0\n");

        let err = load_matrix(&dir.path().join("m.txt"), 2, 2).unwrap_err();
        assert!(matches!(err, DataError::RowCount { found: 1, .. }));
    }

    #[test]
    fn test_load_matrix_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_matrix(&dir.path().join("absent.txt"), 1, 1).unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
    }

    #[test]
    fn test_load_labels_rejects_non_integral() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "y.txt", "1.0\n2.5\n");

        let err = load_labels(&dir.path().join("y.txt"), 2).unwrap_err();
        assert!(matches!(err, DataError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_load_with_shape_full_fixture() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), 4, 3, &[]);

        let dataset = SensorDataset::load_with_shape(dir.path(), 4, 3).unwrap();
        assert_eq!(dataset.train.len(), NUM_CHANNELS);
        assert_eq!(dataset.test.len(), NUM_CHANNELS);
        assert_eq!(dataset.labels.len(), 4);
        assert_eq!(dataset.labels[0], 1);
    }

    #[test]
    fn test_load_fails_on_missing_test_sensor() {
        let dir = TempDir::new().unwrap();
        write_fixture(dir.path(), 4, 3, &["TS_sensor_15.txt"]);

        let err = SensorDataset::load_with_shape(dir.path(), 4, 3).unwrap_err();
        match err {
            DataError::Io { path, .. } => {
                assert!(path.ends_with("TS_sensor_15.txt"), "got {}", path.display())
            }
            other => panic!("expected Io error, got {other}"),
        }
    }
}
