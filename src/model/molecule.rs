use super::atom::Atom;
use super::types::{BondOrder, Element};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }

    #[inline]
    pub fn involves(&self, idx: usize) -> bool {
        self.i == idx || self.j == idx
    }
}

/// Molecular graph as read from a line notation: heavy atoms (and any
/// hydrogens written as atoms) plus bonds. Implicit hydrogens are derived,
/// never stored.
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    fn bond_valence(&self, idx: usize) -> u8 {
        self.bonds
            .iter()
            .filter(|bond| bond.involves(idx))
            .map(|bond| bond.order.valence())
            .sum()
    }

    /// Hydrogens implied by valence for an organic-subset atom; zero for
    /// bracket atoms.
    pub fn implicit_hydrogens(&self, idx: usize) -> u8 {
        let atom = &self.atoms[idx];
        if atom.is_bracket() {
            return 0;
        }

        let valences = atom.element.standard_valences();
        let used = self.bond_valence(idx);

        if atom.aromatic {
            // One valence unit belongs to the aromatic system.
            return valences
                .first()
                .map(|&v| v.saturating_sub(used).saturating_sub(1))
                .unwrap_or(0);
        }

        valences
            .iter()
            .find(|&&v| v >= used)
            .map(|&v| v - used)
            .unwrap_or(0)
    }

    pub fn total_hydrogens(&self, idx: usize) -> u8 {
        let explicit = self.atoms[idx].explicit_hydrogens.unwrap_or(0);
        explicit + self.implicit_hydrogens(idx)
    }

    /// Average molecular weight in g/mol.
    pub fn molecular_weight(&self) -> f64 {
        let hydrogen = Element::H.atomic_mass();
        (0..self.atoms.len())
            .map(|idx| self.atoms[idx].mass() + f64::from(self.total_hydrogens(idx)) * hydrogen)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ethanol() -> Molecule {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::organic(Element::C, false));
        mol.atoms.push(Atom::organic(Element::C, false));
        mol.atoms.push(Atom::organic(Element::O, false));
        mol.bonds.push(Bond::new(0, 1, BondOrder::Single));
        mol.bonds.push(Bond::new(2, 1, BondOrder::Single));
        mol
    }

    #[test]
    fn bond_indices_are_normalized() {
        let bond = Bond::new(5, 2, BondOrder::Double);
        assert_eq!((bond.i, bond.j), (2, 5));
        assert!(bond.involves(5));
        assert!(!bond.involves(3));
    }

    #[test]
    fn implicit_hydrogens_fill_lowest_valence() {
        let mol = ethanol();
        assert_eq!(mol.implicit_hydrogens(0), 3);
        assert_eq!(mol.implicit_hydrogens(1), 2);
        assert_eq!(mol.implicit_hydrogens(2), 1);
    }

    #[test]
    fn hypervalent_sulfur_uses_next_valence() {
        // CS(=O)(=O)C: sulfur carries four bond units, so no hydrogens.
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::organic(Element::C, false));
        mol.atoms.push(Atom::organic(Element::S, false));
        mol.atoms.push(Atom::organic(Element::O, false));
        mol.atoms.push(Atom::organic(Element::O, false));
        mol.atoms.push(Atom::organic(Element::C, false));
        mol.bonds.push(Bond::new(0, 1, BondOrder::Single));
        mol.bonds.push(Bond::new(1, 2, BondOrder::Double));
        mol.bonds.push(Bond::new(1, 3, BondOrder::Double));
        mol.bonds.push(Bond::new(1, 4, BondOrder::Single));
        assert_eq!(mol.implicit_hydrogens(1), 0);
        assert_eq!(mol.implicit_hydrogens(0), 3);
    }

    #[test]
    fn bracket_atoms_have_no_implicit_hydrogens() {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::bracket(Element::N, false, None, 4, 1));
        assert_eq!(mol.implicit_hydrogens(0), 0);
        assert_eq!(mol.total_hydrogens(0), 4);
    }

    #[test]
    fn ethanol_molecular_weight() {
        let mw = ethanol().molecular_weight();
        assert!((mw - 46.069).abs() < 1e-3, "got {mw}");
    }
}
