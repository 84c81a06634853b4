use super::ids::{AtomId, ChainId};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub number: isize,                           // Residue sequence number from the source file
    pub name: String,                            // Residue name (e.g. "ALA", "HOH", "DA")
    pub ins_code: Option<char>,                  // Insertion code, if any
    pub hetero: bool,                            // Whether the source record was HETATM
    pub chain_id: ChainId,                       // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,               // Atoms belonging to this residue, in order
    atom_name_map: HashMap<String, Vec<AtomId>>, // Atom name -> IDs (duplicates allowed)
}

impl Residue {
    pub(crate) fn new(
        number: isize,
        name: &str,
        ins_code: Option<char>,
        hetero: bool,
        chain_id: ChainId,
    ) -> Self {
        Self {
            number,
            name: name.to_string(),
            ins_code,
            hetero,
            chain_id,
            atoms: Vec::new(),
            atom_name_map: HashMap::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.push(atom_id);
        self.atom_name_map
            .entry(atom_name.to_string())
            .or_default()
            .push(atom_id);
    }

    pub(crate) fn remove_atom(&mut self, atom_name: &str, atom_id: AtomId) {
        self.atoms.retain(|&id| id != atom_id);
        if let Some(ids) = self.atom_name_map.get_mut(atom_name) {
            ids.retain(|&id| id != atom_id);
            if ids.is_empty() {
                self.atom_name_map.remove(atom_name);
            }
        }
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    pub fn atom_ids_by_name(&self, name: &str) -> Option<&[AtomId]> {
        self.atom_name_map.get(name).map(|ids| ids.as_slice())
    }

    pub fn first_atom_id_by_name(&self, name: &str) -> Option<AtomId> {
        self.atom_name_map
            .get(name)
            .and_then(|ids| ids.first())
            .copied()
    }
}
