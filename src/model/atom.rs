use super::types::Element;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub aromatic: bool,
    pub isotope: Option<u16>,
    pub charge: i8,
    /// Hydrogen count written in a bracket atom. `None` for organic-subset
    /// atoms, whose hydrogens are implied by valence.
    pub explicit_hydrogens: Option<u8>,
}

impl Atom {
    /// An organic-subset atom (`C`, `n`, `Cl`, ...).
    pub fn organic(element: Element, aromatic: bool) -> Self {
        Self {
            element,
            aromatic,
            isotope: None,
            charge: 0,
            explicit_hydrogens: None,
        }
    }

    /// A bracket atom (`[13CH3+]`) with everything spelled out.
    pub fn bracket(
        element: Element,
        aromatic: bool,
        isotope: Option<u16>,
        hydrogens: u8,
        charge: i8,
    ) -> Self {
        Self {
            element,
            aromatic,
            isotope,
            charge,
            explicit_hydrogens: Some(hydrogens),
        }
    }

    #[inline]
    pub fn is_bracket(&self) -> bool {
        self.explicit_hydrogens.is_some()
    }

    /// Mass of the atom itself, excluding attached hydrogens. A labelled
    /// atom uses its isotope's exact mass when known, else its mass number.
    pub fn mass(&self) -> f64 {
        match self.isotope {
            Some(mass_number) => isotope_mass(self.element, mass_number)
                .unwrap_or_else(|| f64::from(mass_number)),
            None => self.element.atomic_mass(),
        }
    }
}

/// Exact masses (g/mol) of the isotopes commonly used as labels.
fn isotope_mass(element: Element, mass_number: u16) -> Option<f64> {
    let mass = match (element, mass_number) {
        (Element::H, 1) => 1.007_825_032,
        (Element::H, 2) => 2.014_101_778,
        (Element::H, 3) => 3.016_049_278,
        (Element::C, 11) => 11.011_433_6,
        (Element::C, 12) => 12.0,
        (Element::C, 13) => 13.003_354_838,
        (Element::C, 14) => 14.003_241_989,
        (Element::N, 13) => 13.005_738_61,
        (Element::N, 14) => 14.003_074_005,
        (Element::N, 15) => 15.000_108_898,
        (Element::O, 15) => 15.003_065_6,
        (Element::O, 16) => 15.994_914_620,
        (Element::O, 17) => 16.999_131_70,
        (Element::O, 18) => 17.999_161_0,
        (Element::F, 18) => 18.000_938_0,
        (Element::S, 32) => 31.972_071_00,
        (Element::S, 33) => 32.971_458_76,
        (Element::S, 34) => 33.967_866_90,
        (Element::S, 35) => 34.969_032_16,
        (Element::I, 123) => 122.905_589,
        (Element::I, 125) => 124.904_630_2,
        (Element::I, 131) => 130.906_124_6,
        _ => return None,
    };
    Some(mass)
}
