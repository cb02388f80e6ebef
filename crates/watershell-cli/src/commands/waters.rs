use crate::cli::WatersArgs;
use crate::config::build_selection;
use crate::error::{CliError, Result};
use std::io::Write;
use tracing::info;
use watershell::core::io::{bgf::BgfFile, traits::TrajectoryFile};
use watershell::core::models::system::MolecularSystem;
use watershell::core::topology::water::{WaterSelection, select_water_oxygens};

pub fn run(args: WatersArgs) -> Result<()> {
    let selection = build_selection(args.config.as_deref(), &args.set_values)?;

    info!("Loading trajectory from {:?}", &args.input);
    let trajectory = BgfFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
        path: args.input.clone(),
        source: e.into(),
    })?;

    let stdout = std::io::stdout();
    write_water_listing(trajectory.system(), &selection, &mut stdout.lock())
}

/// Writes one line per selected oxygen: water index, atom serial, residue name and number.
fn write_water_listing(
    system: &MolecularSystem,
    selection: &WaterSelection,
    out: &mut impl Write,
) -> Result<()> {
    let oxygens = select_water_oxygens(system, selection);
    info!("Selected {} water oxygen(s).", oxygens.len());

    writeln!(out, "{:>6} {:>7} {:<5} {:>6}", "water", "serial", "res", "resid")?;
    for (water, atom) in oxygens.iter().filter_map(|&i| system.atom(i)).enumerate() {
        writeln!(
            out,
            "{:>6} {:>7} {:<5} {:>6}",
            water, atom.serial, atom.residue_name, atom.residue_number
        )?;
    }
    writeln!(out, "{} water oxygen(s) selected.", oxygens.len())?;
    Ok(())
}
