//! SMILES / CXSMILES reader.
//!
//! Builds a [`Molecule`] graph from line notation. Stereo markers are
//! accepted and discarded; a CXSMILES extension block (`|...|` after
//! whitespace) is ignored. Supported: organic-subset and bracket atoms,
//! explicit bonds, branches, ring closures (`1`, `%12`) and dot-separated
//! components.

use std::collections::HashMap;
use std::str::FromStr;

use crate::io::error::Error;
use crate::model::{
    atom::Atom,
    molecule::{Bond, Molecule},
    types::{BondOrder, Element},
};

/// Parses a SMILES or CXSMILES string.
pub fn read(input: &str) -> Result<Molecule, Error> {
    let smiles = input.split_whitespace().next().unwrap_or("");
    if smiles.is_empty() {
        return Err(Error::smiles(input, 0, "empty structure string"));
    }
    Parser::new(smiles).parse()
}

/// Convenience wrapper: molecular weight (g/mol) of a structure string.
pub fn molecular_weight(input: &str) -> Result<f64, Error> {
    read(input).map(|mol| mol.molecular_weight())
}

struct RingOpening {
    atom: usize,
    order: Option<BondOrder>,
}

struct Parser<'a> {
    smiles: &'a str,
    chars: Vec<char>,
    pos: usize,
    molecule: Molecule,
    prev: Option<usize>,
    pending_bond: Option<BondOrder>,
    branches: Vec<usize>,
    rings: HashMap<u16, RingOpening>,
}

impl<'a> Parser<'a> {
    fn new(smiles: &'a str) -> Self {
        Self {
            smiles,
            chars: smiles.chars().collect(),
            pos: 0,
            molecule: Molecule::new(),
            prev: None,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn error(&self, details: impl Into<String>) -> Error {
        Error::smiles(self.smiles, self.pos, details)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn parse(mut self) -> Result<Molecule, Error> {
        while let Some(c) = self.peek() {
            match c {
                '(' => self.open_branch()?,
                ')' => self.close_branch()?,
                '.' => self.disconnect()?,
                '[' => {
                    let atom = self.bracket_atom()?;
                    self.add_atom(atom)?;
                }
                '%' | '0'..='9' => self.ring_closure()?,
                _ if BondOrder::from_smiles(c).is_some() => self.bond(c)?,
                _ => {
                    let atom = self.organic_atom()?;
                    self.add_atom(atom)?;
                }
            }
        }
        self.finish()
    }

    fn finish(self) -> Result<Molecule, Error> {
        if self.pending_bond.is_some() {
            return Err(self.error("bond symbol at end of string"));
        }
        if !self.branches.is_empty() {
            return Err(self.error("unclosed branch"));
        }
        if let Some(label) = self.rings.keys().min() {
            return Err(self.error(format!("unclosed ring bond {label}")));
        }
        if self.molecule.is_empty() {
            return Err(self.error("no atoms"));
        }
        Ok(self.molecule)
    }

    fn open_branch(&mut self) -> Result<(), Error> {
        let Some(prev) = self.prev else {
            return Err(self.error("branch opened before any atom"));
        };
        if self.pending_bond.is_some() {
            return Err(self.error("bond symbol before branch"));
        }
        self.branches.push(prev);
        self.pos += 1;
        Ok(())
    }

    fn close_branch(&mut self) -> Result<(), Error> {
        if self.pending_bond.is_some() {
            return Err(self.error("bond symbol at end of branch"));
        }
        let Some(anchor) = self.branches.pop() else {
            return Err(self.error("unmatched ')'"));
        };
        self.prev = Some(anchor);
        self.pos += 1;
        Ok(())
    }

    fn disconnect(&mut self) -> Result<(), Error> {
        if self.pending_bond.is_some() {
            return Err(self.error("bond symbol before '.'"));
        }
        if !self.branches.is_empty() {
            return Err(self.error("'.' inside a branch"));
        }
        self.prev = None;
        self.pos += 1;
        Ok(())
    }

    fn bond(&mut self, symbol: char) -> Result<(), Error> {
        if self.prev.is_none() {
            return Err(self.error("bond symbol without a preceding atom"));
        }
        if self.pending_bond.is_some() {
            return Err(self.error("consecutive bond symbols"));
        }
        self.pending_bond = BondOrder::from_smiles(symbol);
        self.pos += 1;
        Ok(())
    }

    fn add_atom(&mut self, atom: Atom) -> Result<(), Error> {
        let idx = self.molecule.atoms.len();
        self.molecule.atoms.push(atom);
        if let Some(prev) = self.prev {
            let order = self.pending_bond.take();
            self.connect(prev, idx, order);
        }
        self.prev = Some(idx);
        Ok(())
    }

    fn connect(&mut self, a: usize, b: usize, order: Option<BondOrder>) {
        let order = order.unwrap_or_else(|| {
            if self.molecule.atoms[a].aromatic && self.molecule.atoms[b].aromatic {
                BondOrder::Aromatic
            } else {
                BondOrder::Single
            }
        });
        self.molecule.bonds.push(Bond::new(a, b, order));
    }

    fn ring_closure(&mut self) -> Result<(), Error> {
        let Some(atom) = self.prev else {
            return Err(self.error("ring bond without a preceding atom"));
        };
        let label = self.ring_label()?;
        let order = self.pending_bond.take();

        match self.rings.remove(&label) {
            Some(opening) => {
                if opening.atom == atom {
                    return Err(self.error(format!("ring bond {label} closes on its own atom")));
                }
                let order = match (opening.order, order) {
                    (Some(a), Some(b)) if a != b => {
                        return Err(self.error(format!("conflicting bond orders on ring bond {label}")));
                    }
                    (a, b) => a.or(b),
                };
                self.connect(opening.atom, atom, order);
            }
            None => {
                self.rings.insert(label, RingOpening { atom, order });
            }
        }
        Ok(())
    }

    fn ring_label(&mut self) -> Result<u16, Error> {
        if self.peek() == Some('%') {
            let digits: Option<Vec<u32>> = (1..=2)
                .map(|offset| self.peek_at(offset).and_then(|c| c.to_digit(10)))
                .collect();
            let Some(digits) = digits else {
                return Err(self.error("'%' must be followed by two digits"));
            };
            self.pos += 3;
            return Ok((digits[0] * 10 + digits[1]) as u16);
        }

        let digit = self
            .peek()
            .and_then(|c| c.to_digit(10))
            .ok_or_else(|| self.error("expected ring bond digit"))?;
        self.pos += 1;
        Ok(digit as u16)
    }

    fn organic_atom(&mut self) -> Result<Atom, Error> {
        let c = self.peek().ok_or_else(|| self.error("unexpected end of input"))?;

        let two: String = self.chars[self.pos..].iter().take(2).collect();
        if two == "Cl" || two == "Br" {
            self.pos += 2;
            let element = if two == "Cl" { Element::Cl } else { Element::Br };
            return Ok(Atom::organic(element, false));
        }

        let (element, aromatic) = match c {
            'B' => (Element::B, false),
            'C' => (Element::C, false),
            'N' => (Element::N, false),
            'O' => (Element::O, false),
            'P' => (Element::P, false),
            'S' => (Element::S, false),
            'F' => (Element::F, false),
            'I' => (Element::I, false),
            'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                let element = Element::from_aromatic_symbol(&c.to_string())
                    .ok_or_else(|| self.error(format!("unknown aromatic atom '{c}'")))?;
                (element, true)
            }
            '*' => return Err(self.error("wildcard atoms have no defined mass")),
            _ => return Err(self.error(format!("unexpected character '{c}'"))),
        };
        self.pos += 1;
        Ok(Atom::organic(element, aromatic))
    }

    fn bracket_atom(&mut self) -> Result<Atom, Error> {
        self.pos += 1; // '['

        let isotope = self.number().map(|n| n as u16);
        let (element, aromatic) = self.bracket_symbol()?;
        self.chirality();
        let hydrogens = self.hydrogen_count();
        let charge = self.charge()?;

        if self.peek() == Some(':') {
            self.pos += 1;
            if self.number().is_none() {
                return Err(self.error("atom class must be a number"));
            }
        }

        if self.peek() != Some(']') {
            return Err(self.error("expected ']' to close bracket atom"));
        }
        self.pos += 1;

        Ok(Atom::bracket(element, aromatic, isotope, hydrogens, charge))
    }

    fn bracket_symbol(&mut self) -> Result<(Element, bool), Error> {
        let Some(first) = self.peek() else {
            return Err(self.error("unterminated bracket atom"));
        };

        if first.is_ascii_lowercase() {
            for len in [2, 1] {
                let candidate: String = self.chars[self.pos..].iter().take(len).collect();
                if candidate.chars().count() == len {
                    if let Some(element) = Element::from_aromatic_symbol(&candidate) {
                        self.pos += len;
                        return Ok((element, true));
                    }
                }
            }
            return Err(self.error(format!("unknown aromatic atom '{first}'")));
        }

        if first.is_ascii_uppercase() {
            if let Some(second) = self.peek_at(1).filter(|c| c.is_ascii_lowercase()) {
                if let Ok(element) = Element::from_str(&format!("{first}{second}")) {
                    self.pos += 2;
                    return Ok((element, false));
                }
            }
            if let Ok(element) = Element::from_str(&first.to_string()) {
                self.pos += 1;
                return Ok((element, false));
            }
        }

        if first == '*' {
            return Err(self.error("wildcard atoms have no defined mass"));
        }
        Err(self.error(format!("unknown element symbol starting with '{first}'")))
    }

    fn chirality(&mut self) {
        if self.peek() != Some('@') {
            return;
        }
        self.pos += 1;
        if self.peek() == Some('@') {
            self.pos += 1;
            return;
        }
        let class: String = self.chars[self.pos..].iter().take(2).collect();
        if matches!(class.as_str(), "TH" | "AL" | "SP" | "TB" | "OH") {
            self.pos += 2;
            self.number();
        }
    }

    fn hydrogen_count(&mut self) -> u8 {
        if self.peek() != Some('H') {
            return 0;
        }
        self.pos += 1;
        match self.peek().and_then(|c| c.to_digit(10)) {
            Some(d) => {
                self.pos += 1;
                d as u8
            }
            None => 1,
        }
    }

    fn charge(&mut self) -> Result<i8, Error> {
        let sign = match self.peek() {
            Some('+') => 1i32,
            Some('-') => -1i32,
            _ => return Ok(0),
        };
        let symbol = if sign > 0 { '+' } else { '-' };
        self.pos += 1;

        let magnitude = if let Some(n) = self.number() {
            n as i32
        } else {
            let mut count = 1;
            while self.peek() == Some(symbol) {
                count += 1;
                self.pos += 1;
            }
            count
        };

        i8::try_from(sign * magnitude).map_err(|_| self.error("charge out of range"))
    }

    fn number(&mut self) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while let Some(d) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value.saturating_mul(10).saturating_add(d);
            self.pos += 1;
        }
        (self.pos > start).then_some(value)
    }
}
