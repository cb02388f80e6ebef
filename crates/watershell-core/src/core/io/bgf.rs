use crate::core::io::traits::TrajectoryFile;
use crate::core::models::atom::Atom;
use crate::core::models::system::MolecularSystem;
use crate::core::models::trajectory::{Trajectory, TrajectoryError};
use nalgebra::Point3;
use std::collections::HashSet;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BgfError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: BgfParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
    #[error(transparent)]
    Trajectory(#[from] TrajectoryError),
}

#[derive(Debug, Error)]
pub enum BgfParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: &'static str, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: &'static str, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: &'static str },
    #[error("Line is too short for ATOM/HETATM record (must be at least 80 chars)")]
    LineTooShort,
}

const MIN_ATOM_LINE_LEN: usize = 80;

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_column<T: FromStr>(
    line: &str,
    line_num: usize,
    (start, end): (usize, usize),
    columns: &'static str,
    invalid: fn(&'static str, String) -> BgfParseErrorKind,
) -> Result<T, BgfError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| BgfError::Parse {
        line: line_num,
        kind: invalid(columns, value.to_string()),
    })
}

fn invalid_int(columns: &'static str, value: String) -> BgfParseErrorKind {
    BgfParseErrorKind::InvalidInt { columns, value }
}

fn invalid_float(columns: &'static str, value: String) -> BgfParseErrorKind {
    BgfParseErrorKind::InvalidFloat { columns, value }
}

fn parse_position(line: &str, line_num: usize) -> Result<Point3<f64>, BgfError> {
    let x = parse_column(line, line_num, (30, 40), "31-40", invalid_float)?;
    let y = parse_column(line, line_num, (40, 50), "41-50", invalid_float)?;
    let z = parse_column(line, line_num, (50, 60), "51-60", invalid_float)?;
    Ok(Point3::new(x, y, z))
}

fn parse_atom(line: &str, line_num: usize, serial: usize) -> Result<Atom, BgfError> {
    let name = slice_and_trim(line, 13, 18);
    if name.is_empty() {
        return Err(BgfError::Parse {
            line: line_num,
            kind: BgfParseErrorKind::MissingRequiredField { columns: "14-18" },
        });
    }
    let residue_name = slice_and_trim(line, 19, 22);
    let chain_id = slice_and_trim(line, 23, 24).chars().next().unwrap_or('A');
    let residue_number: isize = parse_column(line, line_num, (25, 30), "26-30", invalid_int)?;
    let force_field_type = slice_and_trim(line, 61, 66);
    if force_field_type.is_empty() {
        return Err(BgfError::Parse {
            line: line_num,
            kind: BgfParseErrorKind::MissingRequiredField { columns: "62-66" },
        });
    }
    let partial_charge: f64 = parse_column(line, line_num, (72, 80), "73-80", invalid_float)?;

    let mut atom = Atom::new(serial, name, residue_name, residue_number);
    atom.chain_id = chain_id;
    atom.force_field_type = force_field_type.to_string();
    atom.partial_charge = partial_charge;
    Ok(atom)
}

/// Multi-frame BGF reader.
///
/// A trajectory is a sequence of BGF blocks, each terminated by an `END` record.
/// The first block defines the topology. Every later block must list the same
/// atom serials in the same order and only contributes coordinates. A final
/// block without `END` is accepted. Header, `FORMAT`, `CONECT` and other
/// records carry no coordinates and are skipped.
pub struct BgfFile;

#[derive(Default)]
struct ReadState {
    system: MolecularSystem,
    trajectory: Option<Trajectory>,
    positions: Vec<Point3<f64>>,
    seen_serials: HashSet<usize>,
}

impl ReadState {
    fn finish_frame(&mut self) -> Result<(), BgfError> {
        if self.positions.is_empty() {
            return Ok(());
        }
        let positions = std::mem::take(&mut self.positions);
        let trajectory = self
            .trajectory
            .get_or_insert_with(|| Trajectory::new(std::mem::take(&mut self.system)));
        trajectory.push_frame(positions)?;
        debug!(frame = trajectory.n_frames() - 1, "Finished reading BGF frame.");
        Ok(())
    }
}

impl TrajectoryFile for BgfFile {
    type Error = BgfError;

    fn read_from(reader: &mut impl BufRead) -> Result<Trajectory, Self::Error> {
        let mut state = ReadState::default();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if line.len() < MIN_ATOM_LINE_LEN {
                        return Err(BgfError::Parse {
                            line: line_num,
                            kind: BgfParseErrorKind::LineTooShort,
                        });
                    }
                    let serial: usize = parse_column(&line, line_num, (7, 12), "8-12", invalid_int)?;
                    let position = parse_position(&line, line_num)?;

                    if let Some(trajectory) = &state.trajectory {
                        let cursor = state.positions.len();
                        let expected = trajectory.system().atom(cursor).ok_or_else(|| {
                            BgfError::Inconsistency(format!(
                                "Frame {} has more atoms than the topology ({})",
                                trajectory.n_frames(),
                                trajectory.n_atoms()
                            ))
                        })?;
                        if expected.serial != serial {
                            return Err(BgfError::Inconsistency(format!(
                                "Frame {}: expected atom serial {} at position {}, found {}",
                                trajectory.n_frames(),
                                expected.serial,
                                cursor,
                                serial
                            )));
                        }
                    } else {
                        if !state.seen_serials.insert(serial) {
                            return Err(BgfError::Inconsistency(format!(
                                "Duplicate atom serial: {}",
                                serial
                            )));
                        }
                        let atom = parse_atom(&line, line_num, serial)?;
                        state.system.add_atom(atom);
                    }
                    state.positions.push(position);
                }
                "END" => state.finish_frame()?,
                _ => {}
            }
        }
        state.finish_frame()?;

        let trajectory = state
            .trajectory
            .ok_or_else(|| BgfError::MissingRecord("ATOM/HETATM records".into()))?;
        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn atom_line(serial: usize, name: &str, res: &str, resid: isize, pos: [f64; 3]) -> String {
        format!(
            "{:<6} {:>5} {:<5} {:>3} {:1} {:>5}{:>10.5}{:>10.5}{:>10.5} {:<5}{:>3}{:>2} {:>8.5}",
            "HETATM", serial, name, res, "W", resid, pos[0], pos[1], pos[2], "OW", 2, 0, -0.82
        )
    }

    fn two_water_block(shift: f64) -> String {
        [
            atom_line(1, "O", "HOH", 1, [0.0 + shift, 0.0, 0.0]),
            atom_line(2, "H1", "HOH", 1, [0.96 + shift, 0.0, 0.0]),
            atom_line(3, "O", "HOH", 2, [2.8 + shift, 0.0, 0.0]),
            "END".to_string(),
        ]
        .join("\n")
    }

    fn read(content: &str) -> Result<Trajectory, BgfError> {
        BgfFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn atom_line_helper_matches_fixed_columns() {
        assert_eq!(atom_line(1, "O", "HOH", 1, [0.0; 3]).len(), 80);
    }

    #[test]
    fn reads_single_frame_topology_and_skips_other_records() {
        let content = format!(
            "BIOGRF 200\nDESCRP water box\nFORMAT ATOM   (a6,1x,i5)\n{}\nCONECT     1     2\n",
            two_water_block(0.0)
        );
        let trajectory = read(&content).unwrap();

        assert_eq!(trajectory.n_frames(), 1);
        assert_eq!(trajectory.n_atoms(), 3);
        let oxygen = trajectory.system().atom(2).unwrap();
        assert_eq!(oxygen.name, "O");
        assert_eq!(oxygen.residue_name, "HOH");
        assert_eq!(oxygen.residue_number, 2);
        assert_eq!(oxygen.chain_id, 'W');
        assert_eq!(oxygen.force_field_type, "OW");
        assert!((oxygen.partial_charge + 0.82).abs() < 1e-9);
        assert_eq!(trajectory.frame(0).unwrap()[2], Point3::new(2.8, 0.0, 0.0));
    }

    #[test]
    fn reads_multiple_frames_sharing_one_topology() {
        let content = format!(
            "{}\n{}\n{}",
            two_water_block(0.0),
            two_water_block(1.0),
            two_water_block(2.0)
        );
        let trajectory = read(&content).unwrap();

        assert_eq!(trajectory.n_frames(), 3);
        assert_eq!(trajectory.n_atoms(), 3);
        assert_eq!(trajectory.frame(2).unwrap()[0], Point3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn final_block_without_end_is_accepted() {
        let unterminated = two_water_block(5.0).replace("\nEND", "");
        let content = format!("{}\n{}", two_water_block(0.0), unterminated);

        let trajectory = read(&content).unwrap();
        assert_eq!(trajectory.n_frames(), 2);
        assert_eq!(trajectory.frame(1).unwrap()[2], Point3::new(7.8, 0.0, 0.0));
    }

    #[test]
    fn later_frame_with_missing_atom_fails() {
        let truncated = [
            atom_line(1, "O", "HOH", 1, [0.0; 3]),
            atom_line(2, "H1", "HOH", 1, [0.96, 0.0, 0.0]),
            "END".to_string(),
        ]
        .join("\n");
        let content = format!("{}\n{}", two_water_block(0.0), truncated);

        let result = read(&content);
        assert!(matches!(
            result,
            Err(BgfError::Trajectory(TrajectoryError::AtomCountMismatch {
                frame: 1,
                expected: 3,
                found: 2
            }))
        ));
    }

    #[test]
    fn later_frame_with_reordered_serials_fails() {
        let reordered = [
            atom_line(2, "H1", "HOH", 1, [0.96, 0.0, 0.0]),
            atom_line(1, "O", "HOH", 1, [0.0; 3]),
            atom_line(3, "O", "HOH", 2, [2.8, 0.0, 0.0]),
            "END".to_string(),
        ]
        .join("\n");
        let content = format!("{}\n{}", two_water_block(0.0), reordered);

        assert!(matches!(read(&content), Err(BgfError::Inconsistency(_))));
    }

    #[test]
    fn duplicate_serial_in_topology_fails() {
        let content = [
            atom_line(1, "O", "HOH", 1, [0.0; 3]),
            atom_line(1, "O", "HOH", 2, [2.8, 0.0, 0.0]),
        ]
        .join("\n");
        assert!(matches!(read(&content), Err(BgfError::Inconsistency(_))));
    }

    #[test]
    fn short_atom_line_is_a_parse_error() {
        let result = read("HETATM     1 O     HOH W     1   0.00000");
        assert!(matches!(
            result,
            Err(BgfError::Parse {
                line: 1,
                kind: BgfParseErrorKind::LineTooShort
            })
        ));
    }

    #[test]
    fn invalid_coordinate_reports_columns() {
        let mut line = atom_line(1, "O", "HOH", 1, [0.0; 3]);
        line.replace_range(30..40, "   abc    ");
        match read(&line) {
            Err(BgfError::Parse {
                line: 1,
                kind: BgfParseErrorKind::InvalidFloat { columns, value },
            }) => {
                assert_eq!(columns, "31-40");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn file_without_atoms_is_missing_records() {
        let result = read("BIOGRF 200\nEND\n");
        assert!(matches!(result, Err(BgfError::MissingRecord(_))));
    }
}
