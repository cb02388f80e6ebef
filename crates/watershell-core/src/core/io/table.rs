use crate::core::models::distances::ShellDistances;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Expected {expected} water labels, got {found}")]
    LabelCount { expected: usize, found: usize },
}

/// Writes shell distances as a wide CSV table.
///
/// Each row holds one `(frame, water)` pair followed by its `K` distances:
///
/// ```text
/// frame,water,oxygen_serial,d1,d2,...,dK
/// 0,0,1,2.761034,2.8034125,...
/// ```
///
/// `oxygen_serial` is the file serial of the water's oxygen atom, so rows can be
/// traced back to the input structure. Distances are written in the shortest
/// form that parses back to the same `f64`.
pub struct ShellTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ShellTableWriter<std::fs::File> {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> ShellTableWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(inner),
        }
    }

    /// Writes the header and every row, then flushes.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LabelCount`] if `oxygen_serials` does not provide one
    /// label per water, or a CSV/I/O error if writing fails.
    pub fn write(
        &mut self,
        distances: &ShellDistances,
        oxygen_serials: &[usize],
    ) -> Result<(), TableError> {
        if oxygen_serials.len() != distances.n_waters() {
            return Err(TableError::LabelCount {
                expected: distances.n_waters(),
                found: oxygen_serials.len(),
            });
        }

        let mut header = vec![
            "frame".to_string(),
            "water".to_string(),
            "oxygen_serial".to_string(),
        ];
        header.extend((1..=distances.width()).map(|k| format!("d{}", k)));
        self.writer.write_record(&header)?;

        for (frame, water, row) in distances.rows() {
            let mut record = Vec::with_capacity(row.len() + 3);
            record.push(frame.to_string());
            record.push(water.to_string());
            record.push(oxygen_serials[water].to_string());
            record.extend(row.iter().map(f64::to_string));
            self.writer.write_record(&record)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, TableError> {
        self.writer
            .into_inner()
            .map_err(|e| TableError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_and_rows_in_frame_major_order() {
        let distances = ShellDistances::new(2, 2, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.5]).unwrap();
        let mut writer = ShellTableWriter::new(Vec::new());
        writer.write(&distances, &[10, 13]).unwrap();

        let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "frame,water,oxygen_serial,d1,d2");
        assert_eq!(lines[1], "0,0,10,1,2");
        assert_eq!(lines[2], "0,1,13,3,4");
        assert_eq!(lines[4], "1,1,13,7,8.5");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn distances_read_back_at_full_precision() {
        let values = vec![2.765432109, 2.765449999, 0.1 + 0.2, 1e-7];
        let distances = ShellDistances::new(1, 1, 4, values.clone()).unwrap();
        let mut writer = ShellTableWriter::new(Vec::new());
        writer.write(&distances, &[1]).unwrap();
        let output = writer.into_inner().unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let record = reader.records().next().unwrap().unwrap();
        let parsed: Vec<f64> = record
            .iter()
            .skip(3)
            .map(|field| field.parse().unwrap())
            .collect();

        assert_eq!(parsed, values);
        assert_ne!(parsed[0], parsed[1]);
    }

    #[test]
    fn rejects_wrong_number_of_labels() {
        let distances = ShellDistances::new(1, 2, 1, vec![1.0, 2.0]).unwrap();
        let mut writer = ShellTableWriter::new(Vec::new());
        let result = writer.write(&distances, &[1]);
        assert!(matches!(
            result,
            Err(TableError::LabelCount {
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn create_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shells.csv");
        let distances = ShellDistances::new(1, 1, 1, vec![2.75]).unwrap();

        ShellTableWriter::create(&path)
            .unwrap()
            .write(&distances, &[4])
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("0,0,4,2.75"));
    }
}
