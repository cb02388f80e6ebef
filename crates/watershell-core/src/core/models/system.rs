use super::atom::Atom;

/// Represents the topology of a molecular system as an ordered list of atoms.
///
/// The position of an atom in this list is its atom index; trajectory frames store
/// coordinates in the same order, and water selection reports atoms by this index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularSystem {
    atoms: Vec<Atom>,
}

impl MolecularSystem {
    /// Creates a new, empty molecular system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an atom and returns its index.
    pub fn add_atom(&mut self, atom: Atom) -> usize {
        self.atoms.push(atom);
        self.atoms.len() - 1
    }

    /// Retrieves an atom by its index.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the index is in range, otherwise `None`.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms.get(index)
    }

    /// Returns all atoms in index order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Returns an iterator over the indices of atoms belonging to the named residues.
    pub fn atoms_in_residues<'a>(
        &'a self,
        residue_names: &'a [String],
    ) -> impl Iterator<Item = (usize, &'a Atom)> + 'a {
        self.atoms
            .iter()
            .enumerate()
            .filter(move |(_, atom)| {
                residue_names
                    .iter()
                    .any(|r| r.trim() == atom.residue_name.trim())
            })
    }
}
