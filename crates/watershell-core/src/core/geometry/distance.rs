use crate::core::models::distances::{DistanceTensor, TensorError};
use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Atom index {index} is out of range for a frame with {n_atoms} atoms")]
    AtomIndexOutOfRange { index: usize, n_atoms: usize },

    #[error("Pair ({i}, {j}) is out of range for {n_items} items")]
    PairIndexOutOfRange { i: usize, j: usize, n_items: usize },

    #[error("Expected {expected} values for {n_frames} frame(s) of {n_pairs} pair(s), got {found}")]
    PairDataMismatch {
        n_frames: usize,
        n_pairs: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Tensor(#[from] TensorError),
}

/// Returns every unordered pair `(i, j)` with `i < j < n`, ordered by `i` then `j`.
pub fn unique_pairs(n: usize) -> Vec<(usize, usize)> {
    (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect()
}

/// Computes the Euclidean distance of every atom pair within one frame.
///
/// # Errors
///
/// Returns [`GeometryError::AtomIndexOutOfRange`] if a pair refers to an atom
/// that the frame does not contain.
pub fn frame_distances(
    positions: &[Point3<f64>],
    atom_pairs: &[(usize, usize)],
) -> Result<Vec<f64>, GeometryError> {
    let n_atoms = positions.len();
    let position = |index: usize| {
        positions
            .get(index)
            .ok_or(GeometryError::AtomIndexOutOfRange { index, n_atoms })
    };

    atom_pairs
        .iter()
        .map(|&(a, b)| Ok(nalgebra::distance(position(a)?, position(b)?)))
        .collect()
}

/// Flat pair distances with shape `(frames, pairs)`.
///
/// `pairs` indexes the items (e.g. waters) whose distances are stored, so the
/// value at `data[f * pairs.len() + p]` is the distance between `pairs[p].0` and
/// `pairs[p].1` in frame `f`.
#[derive(Debug, Clone, PartialEq)]
pub struct PairDistances {
    n_frames: usize,
    pairs: Vec<(usize, usize)>,
    data: Vec<f64>,
}

impl PairDistances {
    pub fn new(
        n_frames: usize,
        pairs: Vec<(usize, usize)>,
        data: Vec<f64>,
    ) -> Result<Self, GeometryError> {
        let expected = n_frames * pairs.len();
        if data.len() != expected {
            return Err(GeometryError::PairDataMismatch {
                n_frames,
                n_pairs: pairs.len(),
                expected,
                found: data.len(),
            });
        }
        Ok(Self {
            n_frames,
            pairs,
            data,
        })
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Returns the pair distances of one frame.
    pub fn frame(&self, frame: usize) -> &[f64] {
        let n_pairs = self.pairs.len();
        &self.data[frame * n_pairs..(frame + 1) * n_pairs]
    }

    /// Expands the pair list into a dense symmetric `(frames, n_items, n_items)` tensor.
    ///
    /// The diagonal is zero. Each pair fills both `(i, j)` and `(j, i)`, so the
    /// result is exactly symmetric; pairs that are absent from the table stay zero.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::PairIndexOutOfRange`] if a pair refers to an item
    /// index `>= n_items`.
    pub fn square_form(&self, n_items: usize) -> Result<DistanceTensor, GeometryError> {
        if let Some(&(i, j)) = self.pairs.iter().find(|&&(i, j)| i >= n_items || j >= n_items) {
            return Err(GeometryError::PairIndexOutOfRange { i, j, n_items });
        }

        let block = n_items * n_items;
        let mut dense = vec![0.0; self.n_frames * block];
        for frame in 0..self.n_frames {
            let out = &mut dense[frame * block..(frame + 1) * block];
            for (&(i, j), &d) in self.pairs.iter().zip(self.frame(frame)) {
                out[i * n_items + j] = d;
                out[j * n_items + i] = d;
            }
        }
        Ok(DistanceTensor::new(self.n_frames, n_items, dense)?)
    }
}
