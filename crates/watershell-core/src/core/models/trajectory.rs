use super::system::MolecularSystem;
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrajectoryError {
    #[error("Frame {frame} has {found} positions but the topology has {expected} atoms")]
    AtomCountMismatch {
        frame: usize,
        expected: usize,
        found: usize,
    },
}

/// A molecular topology together with one set of atomic coordinates per frame.
///
/// Positions are in Angstroms and indexed by atom index, so `frame(f)[i]` is the
/// position of `system.atom(i)` in frame `f`.
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    system: MolecularSystem,
    frames: Vec<Vec<Point3<f64>>>,
}

impl Trajectory {
    /// Creates a trajectory with no frames.
    pub fn new(system: MolecularSystem) -> Self {
        Self {
            system,
            frames: Vec::new(),
        }
    }

    /// Appends a frame of coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TrajectoryError::AtomCountMismatch`] if the frame does not hold
    /// exactly one position per atom of the topology.
    pub fn push_frame(&mut self, positions: Vec<Point3<f64>>) -> Result<(), TrajectoryError> {
        if positions.len() != self.system.len() {
            return Err(TrajectoryError::AtomCountMismatch {
                frame: self.frames.len(),
                expected: self.system.len(),
                found: positions.len(),
            });
        }
        self.frames.push(positions);
        Ok(())
    }

    pub fn system(&self) -> &MolecularSystem {
        &self.system
    }

    pub fn n_frames(&self) -> usize {
        self.frames.len()
    }

    pub fn n_atoms(&self) -> usize {
        self.system.len()
    }

    pub fn frame(&self, index: usize) -> Option<&[Point3<f64>]> {
        self.frames.get(index).map(|f| f.as_slice())
    }

    pub fn frames(&self) -> impl Iterator<Item = &[Point3<f64>]> {
        self.frames.iter().map(|f| f.as_slice())
    }

    /// All frames in file order.
    pub fn frame_data(&self) -> &[Vec<Point3<f64>>] {
        &self.frames
    }
}
