/// Represents a single atom record of a molecular topology.
///
/// Coordinates are not stored here; they live in the frames of a
/// [`Trajectory`](super::trajectory::Trajectory) so that one topology can be shared
/// by every frame. The residue information is kept flat because water selection
/// only needs the residue name of each atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The serial number of the atom as given in the source file.
    pub serial: usize,
    /// The name of the atom (e.g., "O", "H1", "H2").
    pub name: String,
    /// The name of the parent residue (e.g., "HOH", "SOL").
    pub residue_name: String,
    /// The residue sequence number from the source file.
    pub residue_number: isize,
    /// The single-character chain identifier.
    pub chain_id: char,
    /// The force field atom type (e.g., "OW", "HW").
    pub force_field_type: String,
    /// The partial atomic charge in elementary charge units.
    pub partial_charge: f64,
}

impl Atom {
    /// Creates a new `Atom` with an empty force field type and zero charge.
    ///
    /// # Arguments
    ///
    /// * `serial` - The serial number of the atom.
    /// * `name` - The name of the atom.
    /// * `residue_name` - The name of the residue this atom belongs to.
    /// * `residue_number` - The sequence number of the residue.
    pub fn new(serial: usize, name: &str, residue_name: &str, residue_number: isize) -> Self {
        Self {
            serial,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            residue_number,
            chain_id: 'A',
            force_field_type: String::new(),
            partial_charge: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new(7, "O", "HOH", 3);

        assert_eq!(atom.serial, 7);
        assert_eq!(atom.name, "O");
        assert_eq!(atom.residue_name, "HOH");
        assert_eq!(atom.residue_number, 3);
        assert_eq!(atom.chain_id, 'A');
        assert_eq!(atom.force_field_type, "");
        assert_eq!(atom.partial_charge, 0.0);
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new(1, "H1", "SOL", 1);
        atom1.partial_charge = 0.41;
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
