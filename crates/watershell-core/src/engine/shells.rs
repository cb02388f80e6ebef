use super::config::{MIN_WATERS_FOR_SHELLS, ShellMode, ShellSizePolicy};
use super::error::EngineError;
use crate::core::models::distances::{DistanceTensor, ShellDistances};
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// First-shell neighbour indices for every `(frame, water)`, shape `(frames, waters, shell_size)`.
///
/// Each list is ordered by ascending distance from the water, ties broken by the
/// lower water index. The water itself never appears in its own first shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellIndices {
    n_frames: usize,
    n_waters: usize,
    shell_size: usize,
    data: Vec<usize>,
}

impl ShellIndices {
    pub fn n_frames(&self) -> usize {
        self.n_frames
    }

    pub fn n_waters(&self) -> usize {
        self.n_waters
    }

    pub fn shell_size(&self) -> usize {
        self.shell_size
    }

    /// The first shell of `water` in `frame`, nearest first.
    pub fn first_shell(&self, frame: usize, water: usize) -> &[usize] {
        let start = (frame * self.n_waters + water) * self.shell_size;
        &self.data[start..start + self.shell_size]
    }

    /// The second shell of `water` in `frame`: the first shells of its first-shell
    /// neighbours, concatenated in neighbour order.
    ///
    /// Entries are neither deduplicated nor filtered, so `water` itself and
    /// members of its own first shell may appear.
    pub fn second_shell(&self, frame: usize, water: usize) -> Vec<usize> {
        self.first_shell(frame, water)
            .iter()
            .flat_map(|&neighbor| self.first_shell(frame, neighbor).iter().copied())
            .collect()
    }
}

/// Classifies water neighbours into solvation shells over a dense distance tensor.
///
/// The extractor holds no state besides its [`ShellSizePolicy`]; every call is a
/// pure function of its inputs and frames are processed independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShellExtractor {
    policy: ShellSizePolicy,
}

impl ShellExtractor {
    pub fn new(policy: ShellSizePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ShellSizePolicy {
        self.policy
    }

    /// Validates the water count for `mode` and returns the first-shell size to use.
    ///
    /// The size is `0` for [`ShellMode::All`], which does not build shells.
    ///
    /// # Errors
    ///
    /// * [`EngineError::InsufficientData`] for fewer than 2 waters.
    /// * [`EngineError::InsufficientShellSize`] for a shell mode with fewer than 5
    ///   waters when the policy is [`ShellSizePolicy::Reject`].
    pub fn check_preconditions(&self, mode: ShellMode, n_waters: usize) -> Result<usize, EngineError> {
        if n_waters < 2 {
            return Err(EngineError::InsufficientData { waters: n_waters });
        }
        if !mode.uses_shells() {
            return Ok(0);
        }
        self.policy
            .shell_size(n_waters)
            .ok_or(EngineError::InsufficientShellSize {
                mode,
                waters: n_waters,
                required: MIN_WATERS_FOR_SHELLS,
            })
    }

    /// Computes the first-shell neighbour lists of every water in every frame.
    pub fn first_shell_indices(&self, distances: &DistanceTensor) -> Result<ShellIndices, EngineError> {
        let n_waters = distances.n_waters();
        let shell_size = self.check_preconditions(ShellMode::FirstShell, n_waters)?;

        #[cfg(not(feature = "parallel"))]
        let iterator = 0..distances.n_frames();

        #[cfg(feature = "parallel")]
        let iterator = (0..distances.n_frames()).into_par_iter();

        let per_frame: Vec<Vec<usize>> = iterator
            .map(|frame| frame_first_shells(distances, frame, shell_size))
            .collect();

        Ok(ShellIndices {
            n_frames: distances.n_frames(),
            n_waters,
            shell_size,
            data: per_frame.into_iter().flatten().collect(),
        })
    }

    /// Returns the distance view selected by `mode`, shape `(frames, waters, K)`.
    ///
    /// | mode          | K                      |
    /// |---------------|------------------------|
    /// | `All`         | `waters - 1`           |
    /// | `FirstShell`  | `s` (4)                |
    /// | `SecondShell` | `s * s` (16)           |
    /// | `BothShells`  | `s + s * s` (20)       |
    ///
    /// where `s` is the first-shell size (4, or `waters - 1` for truncated shells).
    /// Shell distances are always measured from the original water, including
    /// the second shell, whose indices come from the neighbours' shells.
    #[instrument(skip_all, name = "shell_extraction", fields(mode = %mode))]
    pub fn extract(&self, distances: &DistanceTensor, mode: ShellMode) -> Result<ShellDistances, EngineError> {
        let (n_frames, n_waters, _) = distances.shape();
        let shell_size = self.check_preconditions(mode, n_waters)?;
        let width = mode.width(n_waters, shell_size);
        debug!(n_frames, n_waters, shell_size, width, "Extracting shell distances.");

        #[cfg(not(feature = "parallel"))]
        let iterator = 0..n_frames;

        #[cfg(feature = "parallel")]
        let iterator = (0..n_frames).into_par_iter();

        let per_frame: Vec<Vec<f64>> = iterator
            .map(|frame| extract_frame(distances, frame, mode, shell_size))
            .collect();

        let data: Vec<f64> = per_frame.into_iter().flatten().collect();
        Ok(ShellDistances::new(n_frames, n_waters, width, data)?)
    }
}

/// Parses `mode` and extracts with the default (rejecting) shell-size policy.
///
/// The mode is validated before the tensor is inspected.
pub fn extract(distances: &DistanceTensor, mode: &str) -> Result<ShellDistances, EngineError> {
    let mode: ShellMode = mode.parse()?;
    ShellExtractor::default().extract(distances, mode)
}

/// Indices of all other waters ordered by distance from `water`.
///
/// The sort is stable, so equal distances keep ascending index order. NaN values
/// follow the IEEE total order.
fn ranked_neighbors(row: &[f64], water: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row.len()).filter(|&j| j != water).collect();
    order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
    order
}

fn frame_first_shells(distances: &DistanceTensor, frame: usize, shell_size: usize) -> Vec<usize> {
    let n_waters = distances.n_waters();
    let mut shells = Vec::with_capacity(n_waters * shell_size);
    for water in 0..n_waters {
        let ranked = ranked_neighbors(distances.row(frame, water), water);
        shells.extend_from_slice(&ranked[..shell_size]);
    }
    shells
}

fn extract_frame(distances: &DistanceTensor, frame: usize, mode: ShellMode, shell_size: usize) -> Vec<f64> {
    let n_waters = distances.n_waters();
    let mut out = Vec::with_capacity(n_waters * mode.width(n_waters, shell_size));

    if mode == ShellMode::All {
        for water in 0..n_waters {
            let row = distances.row(frame, water);
            let start = out.len();
            out.extend(row.iter().enumerate().filter(|&(j, _)| j != water).map(|(_, &d)| d));
            out[start..].sort_by(f64::total_cmp);
        }
        return out;
    }

    let first = frame_first_shells(distances, frame, shell_size);
    let shell_of = |water: usize| &first[water * shell_size..(water + 1) * shell_size];

    for water in 0..n_waters {
        let row = distances.row(frame, water);
        if matches!(mode, ShellMode::FirstShell | ShellMode::BothShells) {
            out.extend(shell_of(water).iter().map(|&n| row[n]));
        }
        if matches!(mode, ShellMode::SecondShell | ShellMode::BothShells) {
            for &neighbor in shell_of(water) {
                out.extend(shell_of(neighbor).iter().map(|&m| row[m]));
            }
        }
    }
    out
}
