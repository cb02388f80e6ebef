use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TensorError {
    #[error("Shape ({frames}, {rows}, {cols}) requires {expected} values, got {found}")]
    ShapeMismatch {
        frames: usize,
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
}

fn check_shape(frames: usize, rows: usize, cols: usize, len: usize) -> Result<(), TensorError> {
    let expected = frames * rows * cols;
    if expected != len {
        return Err(TensorError::ShapeMismatch {
            frames,
            rows,
            cols,
            expected,
            found: len,
        });
    }
    Ok(())
}

/// Dense square-form O-O distances with shape `(frames, waters, waters)`.
///
/// Values are stored row-major, so the row of water `w` in frame `f` is a
/// contiguous slice of `n_waters` distances. The diagonal holds self-distances
/// and every frame is expected to be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTensor {
    n_frames: usize,
    n_waters: usize,
    data: Vec<f64>,
}

impl DistanceTensor {
    /// Wraps row-major data as a `(n_frames, n_waters, n_waters)` tensor.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::ShapeMismatch`] if `data` does not hold exactly
    /// `n_frames * n_waters * n_waters` values.
    pub fn new(n_frames: usize, n_waters: usize, data: Vec<f64>) -> Result<Self, TensorError> {
        check_shape(n_frames, n_waters, n_waters, data.len())?;
        Ok(Self {
            n_frames,
            n_waters,
            data,
        })
    }

    /// Builds a tensor from nested `[frame][water][water]` vectors.
    pub fn from_frames(frames: &[Vec<Vec<f64>>]) -> Result<Self, TensorError> {
        let n_frames = frames.len();
        let n_waters = frames.first().map_or(0, Vec::len);
        let data: Vec<f64> = frames.iter().flatten().flatten().copied().collect();
        Self::new(n_frames, n_waters, data)
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn n_waters(&self) -> usize {
        self.n_waters
    }

    /// Returns the `(frames, waters, waters)` shape.
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_frames, self.n_waters, self.n_waters)
    }

    #[inline]
    pub fn get(&self, frame: usize, i: usize, j: usize) -> f64 {
        self.data[(frame * self.n_waters + i) * self.n_waters + j]
    }

    /// Returns the distances from water `water` to every water in `frame`.
    #[inline]
    pub fn row(&self, frame: usize, water: usize) -> &[f64] {
        let start = (frame * self.n_waters + water) * self.n_waters;
        &self.data[start..start + self.n_waters]
    }

    /// Returns the `(waters, waters)` block of one frame as a flat slice.
    pub fn frame(&self, frame: usize) -> &[f64] {
        let block = self.n_waters * self.n_waters;
        &self.data[frame * block..(frame + 1) * block]
    }

    /// Checks `D[f, i, j] == D[f, j, i]` within `tolerance` for every frame.
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        (0..self.n_frames).all(|f| {
            (0..self.n_waters).all(|i| {
                (i + 1..self.n_waters).all(|j| (self.get(f, i, j) - self.get(f, j, i)).abs() <= tolerance)
            })
        })
    }
}

/// Per-water distance views produced by shell extraction, shape `(frames, waters, width)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellDistances {
    n_frames: usize,
    n_waters: usize,
    width: usize,
    data: Vec<f64>,
}

impl ShellDistances {
    pub fn new(
        n_frames: usize,
        n_waters: usize,
        width: usize,
        data: Vec<f64>,
    ) -> Result<Self, TensorError> {
        check_shape(n_frames, n_waters, width, data.len())?;
        Ok(Self {
            n_frames,
            n_waters,
            width,
            data,
        })
    }

    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn n_waters(&self) -> usize {
        self.n_waters
    }

    /// Number of distances reported per water (the `K` axis).
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.n_frames, self.n_waters, self.width)
    }

    #[inline]
    pub fn get(&self, frame: usize, water: usize, k: usize) -> f64 {
        self.data[(frame * self.n_waters + water) * self.width + k]
    }

    #[inline]
    pub fn row(&self, frame: usize, water: usize) -> &[f64] {
        let start = (frame * self.n_waters + water) * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterates over `(frame, water, row)` in row-major order.
    pub fn rows(&self) -> impl Iterator<Item = (usize, usize, &[f64])> {
        let n_waters = self.n_waters.max(1);
        self.data
            .chunks(self.width.max(1))
            .take(self.n_frames * self.n_waters)
            .enumerate()
            .map(move |(i, row)| (i / n_waters, i % n_waters, row))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
