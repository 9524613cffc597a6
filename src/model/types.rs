use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

macro_rules! periodic_table {
    ($($element:ident = $number:literal => $mass:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Element {
            $($element = $number,)+
        }

        impl Element {
            /// Every element in atomic-number order.
            pub const ALL: &'static [Element] = &[$(Element::$element,)+];

            /// Standard atomic weight in g/mol (mass number of the most
            /// stable isotope for elements without a standard weight).
            pub fn atomic_mass(&self) -> f64 {
                match self {
                    $(Element::$element => $mass,)+
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(Element::$element => stringify!($element),)+
                }
            }
        }
    };
}

periodic_table! {
    H = 1 => 1.008,
    He = 2 => 4.0026,
    Li = 3 => 6.94,
    Be = 4 => 9.0122,
    B = 5 => 10.81,
    C = 6 => 12.011,
    N = 7 => 14.007,
    O = 8 => 15.999,
    F = 9 => 18.998,
    Ne = 10 => 20.18,
    Na = 11 => 22.99,
    Mg = 12 => 24.305,
    Al = 13 => 26.982,
    Si = 14 => 28.085,
    P = 15 => 30.974,
    S = 16 => 32.06,
    Cl = 17 => 35.45,
    Ar = 18 => 39.948,
    K = 19 => 39.098,
    Ca = 20 => 40.078,
    Sc = 21 => 44.956,
    Ti = 22 => 47.867,
    V = 23 => 50.942,
    Cr = 24 => 51.996,
    Mn = 25 => 54.938,
    Fe = 26 => 55.845,
    Co = 27 => 58.933,
    Ni = 28 => 58.693,
    Cu = 29 => 63.546,
    Zn = 30 => 65.38,
    Ga = 31 => 69.723,
    Ge = 32 => 72.63,
    As = 33 => 74.922,
    Se = 34 => 78.971,
    Br = 35 => 79.904,
    Kr = 36 => 83.798,
    Rb = 37 => 85.468,
    Sr = 38 => 87.62,
    Y = 39 => 88.906,
    Zr = 40 => 91.224,
    Nb = 41 => 92.906,
    Mo = 42 => 95.96,
    Tc = 43 => 98.0,
    Ru = 44 => 101.07,
    Rh = 45 => 102.91,
    Pd = 46 => 106.42,
    Ag = 47 => 107.87,
    Cd = 48 => 112.41,
    In = 49 => 114.82,
    Sn = 50 => 118.71,
    Sb = 51 => 121.76,
    Te = 52 => 127.6,
    I = 53 => 126.9,
    Xe = 54 => 131.29,
    Cs = 55 => 132.91,
    Ba = 56 => 137.33,
    La = 57 => 138.91,
    Ce = 58 => 140.12,
    Pr = 59 => 140.91,
    Nd = 60 => 144.24,
    Pm = 61 => 145.0,
    Sm = 62 => 150.36,
    Eu = 63 => 151.96,
    Gd = 64 => 157.25,
    Tb = 65 => 158.93,
    Dy = 66 => 162.5,
    Ho = 67 => 164.93,
    Er = 68 => 167.26,
    Tm = 69 => 168.93,
    Yb = 70 => 173.05,
    Lu = 71 => 174.97,
    Hf = 72 => 178.49,
    Ta = 73 => 180.95,
    W = 74 => 183.84,
    Re = 75 => 186.21,
    Os = 76 => 190.23,
    Ir = 77 => 192.22,
    Pt = 78 => 195.08,
    Au = 79 => 196.97,
    Hg = 80 => 200.59,
    Tl = 81 => 204.38,
    Pb = 82 => 207.2,
    Bi = 83 => 208.98,
    Po = 84 => 209.0,
    At = 85 => 210.0,
    Rn = 86 => 222.0,
    Fr = 87 => 223.0,
    Ra = 88 => 226.0,
    Ac = 89 => 227.0,
    Th = 90 => 232.04,
    Pa = 91 => 231.04,
    U = 92 => 238.03,
    Np = 93 => 237.0,
    Pu = 94 => 244.0,
    Am = 95 => 243.0,
    Cm = 96 => 247.0,
    Bk = 97 => 247.0,
    Cf = 98 => 251.0,
    Es = 99 => 252.0,
    Fm = 100 => 257.0,
    Md = 101 => 258.0,
    No = 102 => 259.0,
    Lr = 103 => 262.0,
    Rf = 104 => 267.0,
    Db = 105 => 270.0,
    Sg = 106 => 271.0,
    Bh = 107 => 270.0,
    Hs = 108 => 277.0,
    Mt = 109 => 276.0,
    Ds = 110 => 281.0,
    Rg = 111 => 280.0,
    Cn = 112 => 285.0,
    Nh = 113 => 284.0,
    Fl = 114 => 289.0,
    Mc = 115 => 288.0,
    Lv = 116 => 293.0,
    Ts = 117 => 294.0,
    Og = 118 => 294.0,
}

impl Element {
    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    /// Normal valences used to fill implicit hydrogens on SMILES
    /// organic-subset atoms, lowest first. Empty for every other element.
    pub fn standard_valences(&self) -> &'static [u8] {
        match self {
            Element::B => &[3],
            Element::C => &[4],
            Element::N => &[3, 5],
            Element::O => &[2],
            Element::P => &[3, 5],
            Element::S => &[2, 4, 6],
            Element::F | Element::Cl | Element::Br | Element::I => &[1],
            _ => &[],
        }
    }

    /// Resolves a lowercase aromatic symbol (`c`, `n`, `se`, ...).
    pub fn from_aromatic_symbol(s: &str) -> Option<Self> {
        match s {
            "b" => Some(Element::B),
            "c" => Some(Element::C),
            "n" => Some(Element::N),
            "o" => Some(Element::O),
            "p" => Some(Element::P),
            "s" => Some(Element::S),
            "se" => Some(Element::Se),
            "as" => Some(Element::As),
            "te" => Some(Element::Te),
            _ => None,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .iter()
            .copied()
            .find(|element| element.symbol() == s)
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl BondOrder {
    pub fn value(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Quadruple => 4.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    /// Contribution to an atom's valence when counting implicit hydrogens.
    /// Aromatic bonds count as single; the aromatic system is accounted
    /// for on the atom.
    pub fn valence(&self) -> u8 {
        match self {
            BondOrder::Single | BondOrder::Aromatic => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Quadruple => 4,
        }
    }

    /// Maps a SMILES bond symbol. Directional bonds (`/`, `\`) are single.
    pub fn from_smiles(symbol: char) -> Option<Self> {
        match symbol {
            '-' | '/' | '\\' => Some(BondOrder::Single),
            '=' => Some(BondOrder::Double),
            '#' => Some(BondOrder::Triple),
            '$' => Some(BondOrder::Quadruple),
            ':' => Some(BondOrder::Aromatic),
            _ => None,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BondOrder::Single => write!(f, "Single"),
            BondOrder::Double => write!(f, "Double"),
            BondOrder::Triple => write!(f, "Triple"),
            BondOrder::Quadruple => write!(f, "Quadruple"),
            BondOrder::Aromatic => write!(f, "Aromatic"),
        }
    }
}
