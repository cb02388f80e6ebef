use crate::cli::ExtractArgs;
use crate::config::build_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use watershell::{
    core::io::{bgf::BgfFile, table::ShellTableWriter, traits::TrajectoryFile},
    engine::progress::ProgressReporter,
    workflows,
};

pub fn run(args: ExtractArgs, show_progress: bool) -> Result<()> {
    let app_config = build_config(&args)?;
    let config = &app_config.core_config;
    info!(
        "Resolved configuration: mode={}, short shells={:?}, oxygen name='{}', water residues={:?}",
        config.mode, config.shell_policy, config.selection.oxygen_name, config.selection.water_residues
    );

    info!("Loading trajectory from {:?}", &app_config.input_path);
    let trajectory =
        BgfFile::read_from_path(&app_config.input_path).map_err(|e| CliError::FileParsing {
            path: app_config.input_path.clone(),
            source: e.into(),
        })?;
    info!(
        "Loaded {} frame(s) of {} atom(s).",
        trajectory.n_frames(),
        trajectory.n_atoms()
    );
    if trajectory.n_frames() == 0 {
        warn!("The trajectory has no frames; the output table will only contain a header.");
    }

    let progress_handler = if show_progress {
        CliProgressHandler::new()
    } else {
        CliProgressHandler::hidden()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Extracting '{}' O-O distances...", config.mode);
    let result = workflows::oo_distances::run(&trajectory, config, &reporter)?;

    let (n_frames, n_waters, width) = result.distances.shape();
    info!("Writing {} row(s) of {} distance(s) to {:?}", n_frames * n_waters, width, &app_config.output_path);

    ShellTableWriter::create(&app_config.output_path)
        .and_then(|mut writer| writer.write(&result.distances, &result.oxygen_serials))
        .map_err(|source| CliError::TableWrite {
            path: app_config.output_path.clone(),
            source,
        })?;

    println!(
        "✓ {} water(s) x {} frame(s), {} distance(s) per water, written to: {}",
        n_waters,
        n_frames,
        width,
        app_config.output_path.display()
    );
    Ok(())
}
