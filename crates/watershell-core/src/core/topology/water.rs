use crate::core::models::system::MolecularSystem;
use serde::Deserialize;

/// Atom name of the water oxygen in the common water models.
pub const DEFAULT_OXYGEN_NAME: &str = "O";

/// Residue names used for water by the common simulation packages
/// (`HOH` in PDB-style files, `SOL` in GROMACS topologies).
pub const DEFAULT_WATER_RESIDUES: [&str; 2] = ["HOH", "SOL"];

/// Describes which atoms count as water oxygens.
///
/// An atom is selected when its name equals `oxygen_name` and its residue name
/// is one of `water_residues`. Both comparisons are case-sensitive and ignore
/// surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct WaterSelection {
    pub oxygen_name: String,
    pub water_residues: Vec<String>,
}

impl Default for WaterSelection {
    fn default() -> Self {
        Self {
            oxygen_name: DEFAULT_OXYGEN_NAME.to_string(),
            water_residues: DEFAULT_WATER_RESIDUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl WaterSelection {
    pub fn new(oxygen_name: &str, water_residues: &[&str]) -> Self {
        Self {
            oxygen_name: oxygen_name.to_string(),
            water_residues: water_residues.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Returns the atom indices of all water oxygens, in topology order.
///
/// The order of the returned indices defines the water axis of every distance
/// array derived from them.
pub fn select_water_oxygens(system: &MolecularSystem, selection: &WaterSelection) -> Vec<usize> {
    let oxygen_name = selection.oxygen_name.trim();
    system
        .atoms_in_residues(&selection.water_residues)
        .filter(|(_, atom)| atom.name.trim() == oxygen_name)
        .map(|(index, _)| index)
        .collect()
}
