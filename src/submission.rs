//! Validated writer for the two-column submission CSV

use crate::dataset::NUM_SAMPLES;
use crate::error::SubmissionError;
use ndarray::ArrayView1;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Smallest valid activity class.
pub const MIN_CLASS: i64 = 1;
/// Largest valid activity class.
pub const MAX_CLASS: i64 = 14;

/// Validate a fused prediction vector and write it as
/// `Id,Prediction` CSV rows, 1-indexed, in original sample order.
///
/// All validation happens before any filesystem effect: on failure no file
/// is created and a pre-existing file is left untouched. On success the
/// output directory is created if absent and any existing file at the
/// target path is overwritten. Returns the final path.
pub fn write_submission(
    predictions: ArrayView1<i64>,
    output_dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<PathBuf, SubmissionError> {
    validate(predictions)?;

    fs::create_dir_all(&output_dir)?;
    let path = output_dir.as_ref().join(file_name);

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    writeln!(writer, "Id,Prediction")?;
    for (idx, &label) in predictions.iter().enumerate() {
        writeln!(writer, "{},{label}", idx + 1)?;
    }
    writer.flush()?;

    log::info!("submission {file_name} saved in {}", path.display());
    Ok(path)
}

fn validate(predictions: ArrayView1<i64>) -> Result<(), SubmissionError> {
    if predictions.len() != NUM_SAMPLES {
        return Err(SubmissionError::Length {
            expected: NUM_SAMPLES,
            found: predictions.len(),
        });
    }
    // Non-empty after the length check, so min/max exist
    let min = *predictions.iter().min().expect("non-empty predictions");
    let max = *predictions.iter().max().expect("non-empty predictions");
    if max > MAX_CLASS {
        return Err(SubmissionError::ClassTooLarge(max));
    }
    if min < MIN_CLASS {
        return Err(SubmissionError::ClassTooSmall(min));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;
    use std::fs;
    use tempfile::TempDir;

    fn valid_predictions() -> Array1<i64> {
        Array1::from_iter((0..NUM_SAMPLES as i64).map(|i| i % 14 + 1))
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let predictions = valid_predictions();

        let path = write_submission(predictions.view(), dir.path(), "sub.csv").unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), NUM_SAMPLES + 1);
        assert_eq!(lines[0], "Id,Prediction");
        for (idx, line) in lines[1..].iter().enumerate() {
            let (id, label) = line.split_once(',').unwrap();
            assert_eq!(id.parse::<usize>().unwrap(), idx + 1);
            assert_eq!(label.parse::<i64>().unwrap(), predictions[idx]);
        }
    }

    #[test]
    fn test_wrong_length_leaves_no_file() {
        let dir = TempDir::new().unwrap();
        let short = Array1::from_elem(NUM_SAMPLES - 1, 1i64);

        let err = write_submission(short.view(), dir.path(), "sub.csv").unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::Length {
                expected: NUM_SAMPLES,
                found
            } if found == NUM_SAMPLES - 1
        ));
        assert!(!dir.path().join("sub.csv").exists());
    }

    #[test]
    fn test_class_below_range() {
        let dir = TempDir::new().unwrap();
        let mut predictions = valid_predictions();
        predictions[0] = 0;

        let err = write_submission(predictions.view(), dir.path(), "sub.csv").unwrap_err();
        assert!(matches!(err, SubmissionError::ClassTooSmall(0)));
        assert!(!dir.path().join("sub.csv").exists());
    }

    #[test]
    fn test_class_above_range() {
        let dir = TempDir::new().unwrap();
        let mut predictions = valid_predictions();
        predictions[17] = 15;

        let err = write_submission(predictions.view(), dir.path(), "sub.csv").unwrap_err();
        assert!(matches!(err, SubmissionError::ClassTooLarge(15)));
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sub.csv"), "stale").unwrap();

        let path = write_submission(valid_predictions().view(), dir.path(), "sub.csv").unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("Id,Prediction"));
    }

    #[test]
    fn test_creates_output_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let path = write_submission(valid_predictions().view(), &nested, "sub.csv").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_validation_failure_keeps_stale_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("sub.csv"), "stale").unwrap();
        let short = Array1::from_elem(10, 1i64);

        write_submission(short.view(), dir.path(), "sub.csv").unwrap_err();
        assert_eq!(fs::read_to_string(dir.path().join("sub.csv")).unwrap(), "stale");
    }
}
