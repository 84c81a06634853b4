use super::ids::ResidueId;
use nalgebra::Point3;

/// An atom of a macromolecular structure.
///
/// Carries the identity and per-atom annotations of coordinate file formats:
/// the serial number from the source file (preserved for identifier
/// round-tripping), the atom and element names, position, occupancy,
/// temperature factor and formal charge.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Serial number from the source file, or 0 when built programmatically.
    pub serial: usize,
    /// The atom name (e.g. "CA", "N", "OXT").
    pub name: String,
    /// Upper-case element symbol (e.g. "C", "FE"); may be empty when the
    /// source file omits it and guessing was disabled.
    pub element: String,
    /// The ID of the parent residue.
    pub residue_id: ResidueId,
    /// Position in Angstroms.
    pub position: Point3<f64>,
    /// Alternate location indicator, if any.
    pub alt_loc: Option<char>,
    pub occupancy: f64,
    pub b_factor: f64,
    /// Formal charge in elementary charge units.
    pub charge: i8,
}

impl Atom {
    /// Creates an atom with default annotations.
    pub fn new(name: &str, residue_id: ResidueId, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            element: String::new(),
            residue_id,
            position,
            alt_loc: None,
            occupancy: 1.0,
            b_factor: 0.0,
            charge: 0,
        }
    }

    /// Whether the atom is neither hydrogen nor deuterium.
    pub fn is_heavy(&self) -> bool {
        !matches!(self.element.as_str(), "H" | "D")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn dummy_residue_id() -> ResidueId {
        ResidueId::from(KeyData::from_ffi(1))
    }

    #[test]
    fn new_atom_has_expected_default_annotations() {
        let atom = Atom::new("CA", dummy_residue_id(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.name, "CA");
        assert_eq!(atom.serial, 0);
        assert_eq!(atom.element, "");
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.alt_loc, None);
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.b_factor, 0.0);
        assert_eq!(atom.charge, 0);
    }

    #[test]
    fn is_heavy_excludes_hydrogen_and_deuterium() {
        let mut atom = Atom::new("HA", dummy_residue_id(), Point3::origin());
        atom.element = "H".to_string();
        assert!(!atom.is_heavy());
        atom.element = "D".to_string();
        assert!(!atom.is_heavy());
        atom.element = "C".to_string();
        assert!(atom.is_heavy());
        atom.element = "FE".to_string();
        assert!(atom.is_heavy());
    }
}
