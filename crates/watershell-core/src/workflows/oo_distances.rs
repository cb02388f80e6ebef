use crate::core::geometry::distance::{GeometryError, PairDistances, frame_distances, unique_pairs};
use crate::core::models::distances::{DistanceTensor, ShellDistances};
use crate::core::models::trajectory::Trajectory;
use crate::core::topology::water::select_water_oxygens;
use crate::engine::config::{ExtractionConfig, FIRST_SHELL_SIZE};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::shells::ShellExtractor;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Shell distances of every water oxygen in a trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct OxygenDistances {
    /// Atom index of each water's oxygen; position `w` here is water `w` in `distances`.
    pub oxygen_indices: Vec<usize>,
    /// File serial of each water's oxygen, parallel to `oxygen_indices`.
    pub oxygen_serials: Vec<usize>,
    pub distances: ShellDistances,
}

/// Computes oxygen-oxygen shell distances for all waters of `trajectory`.
///
/// Water oxygens are selected with `config.selection`, their pairwise distances
/// computed frame by frame, and the dense tensor reduced to the view chosen by
/// `config.mode`. Water-count checks run before any distance is computed.
#[instrument(skip_all, name = "oo_distance_workflow")]
pub fn run(
    trajectory: &Trajectory,
    config: &ExtractionConfig,
    reporter: &ProgressReporter,
) -> Result<OxygenDistances, EngineError> {
    info!(
        frames = trajectory.n_frames(),
        atoms = trajectory.n_atoms(),
        mode = %config.mode,
        "Starting oxygen-oxygen distance workflow."
    );

    let oxygen_indices = reporter.phase("Water Selection", || {
        let oxygens = select_water_oxygens(trajectory.system(), &config.selection);
        info!("Selected {} water oxygen(s).", oxygens.len());
        Ok::<_, EngineError>(oxygens)
    })?;

    let extractor = ShellExtractor::new(config.shell_policy);
    let shell_size = extractor.check_preconditions(config.mode, oxygen_indices.len())?;
    if config.mode.uses_shells() && shell_size < FIRST_SHELL_SIZE {
        let message = format!(
            "Only {} water(s) present; first shells are truncated to {} neighbour(s).",
            oxygen_indices.len(),
            shell_size
        );
        warn!("{}", message);
        reporter.report(Progress::Message(message));
    }

    let tensor = reporter.phase("Distance Calculation", || {
        compute_distance_tensor(trajectory, &oxygen_indices, reporter)
    })?;

    let distances = reporter.phase("Shell Extraction", || extractor.extract(&tensor, config.mode))?;

    let oxygen_serials = oxygen_indices
        .iter()
        .map(|&index| trajectory.system().atom(index).map_or(0, |atom| atom.serial))
        .collect();

    let (n_frames, n_waters, width) = distances.shape();
    info!(n_frames, n_waters, width, "Workflow complete.");

    Ok(OxygenDistances {
        oxygen_indices,
        oxygen_serials,
        distances,
    })
}

/// Builds the dense `(frames, waters, waters)` distance tensor for the given atoms.
///
/// Reports one `TaskIncrement` per frame.
pub fn compute_distance_tensor(
    trajectory: &Trajectory,
    atom_indices: &[usize],
    reporter: &ProgressReporter,
) -> Result<DistanceTensor, EngineError> {
    let n_items = atom_indices.len();
    let item_pairs = unique_pairs(n_items);
    let atom_pairs: Vec<(usize, usize)> = item_pairs
        .iter()
        .map(|&(i, j)| (atom_indices[i], atom_indices[j]))
        .collect();

    reporter.report(Progress::TaskStart {
        total_steps: trajectory.n_frames() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = trajectory.frame_data().iter();

    #[cfg(feature = "parallel")]
    let iterator = trajectory.frame_data().par_iter();

    let per_frame = iterator
        .map(|positions| {
            let distances = frame_distances(positions, &atom_pairs);
            reporter.report(Progress::TaskIncrement);
            distances
        })
        .collect::<Result<Vec<Vec<f64>>, GeometryError>>()?;

    reporter.report(Progress::TaskFinish);

    let pair_distances = PairDistances::new(
        trajectory.n_frames(),
        item_pairs,
        per_frame.into_iter().flatten().collect(),
    )?;
    Ok(pair_distances.square_form(n_items)?)
}
