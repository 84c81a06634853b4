use super::atom::Atom;
use super::bond::{Bond, BondOrder};
use super::cell::UnitCell;
use super::chain::{Chain, ChainType};
use super::ids::{AtomId, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;

/// A complete macromolecular structure: atoms, residues, chains and bonds.
///
/// This is the central container of the structure layer. Entities are stored
/// in slot maps and addressed by stable keys; lookup maps and a bond
/// adjacency cache provide constant-time navigation from file-level
/// identifiers (chain letter, residue number) and between bonded atoms.
#[derive(Debug, Clone, Default)]
pub struct Structure {
    atoms: SlotMap<AtomId, Atom>,
    residues: SlotMap<ResidueId, Residue>,
    chains: SlotMap<ChainId, Chain>,
    bonds: Vec<Bond>,
    /// Lookup from (chain, residue number, insertion code) to residue key.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
    /// Lookup from single-character chain identifier to chain key.
    chain_id_map: HashMap<char, ChainId>,
    /// Cached adjacency lists for bond connectivity.
    bond_adjacency: SecondaryMap<AtomId, Vec<AtomId>>,
    cell: Option<UnitCell>,
}

impl Structure {
    /// Creates a new, empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        self.atoms.get_mut(id)
    }

    pub fn atoms_iter(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter()
    }

    pub fn atoms_iter_mut(&mut self) -> impl Iterator<Item = (AtomId, &mut Atom)> {
        self.atoms.iter_mut()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn residue_mut(&mut self, id: ResidueId) -> Option<&mut Residue> {
        self.residues.get_mut(id)
    }

    pub fn residues_iter(&self) -> impl Iterator<Item = (ResidueId, &Residue)> {
        self.residues.iter()
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    pub fn chain_mut(&mut self, id: ChainId) -> Option<&mut Chain> {
        self.chains.get_mut(id)
    }

    pub fn chains_iter(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chains.iter()
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// The crystallographic unit cell, when the source file declared one.
    pub fn cell(&self) -> Option<&UnitCell> {
        self.cell.as_ref()
    }

    pub fn set_cell(&mut self, cell: Option<UnitCell>) {
        self.cell = cell;
    }

    /// Finds a chain key by its single-character identifier.
    pub fn find_chain(&self, id: char) -> Option<ChainId> {
        self.chain_id_map.get(&id).copied()
    }

    /// Finds a residue key by chain, residue number and insertion code.
    pub fn find_residue(
        &self,
        chain_id: ChainId,
        number: isize,
        ins_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, number, ins_code))
            .copied()
    }

    /// Adds a chain or returns the existing one with the same identifier.
    pub fn add_chain(&mut self, id: char, chain_type: ChainType) -> ChainId {
        *self.chain_id_map.entry(id).or_insert_with(|| {
            let chain = Chain::new(id, chain_type);
            self.chains.insert(chain)
        })
    }

    /// Adds a residue to a chain or returns the existing one with the same
    /// (number, insertion code) key. Returns `None` if the chain does not
    /// exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        number: isize,
        name: &str,
        ins_code: Option<char>,
        hetero: bool,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, number, ins_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(number, name, ins_code, hetero, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Adds an atom to a residue, registering it under its name and
    /// initializing its adjacency list. Returns `None` if the residue does
    /// not exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;

        let name = atom.name.clone();
        let atom_id = self.atoms.insert(Atom { residue_id, ..atom });
        self.bond_adjacency.insert(atom_id, Vec::new());
        residue.add_atom(&name, atom_id);

        Some(atom_id)
    }

    /// Adds a bond between two atoms, keeping the adjacency cache in sync.
    /// Idempotent: re-adding an existing bond succeeds without duplicating
    /// it. Returns `None` if either atom does not exist.
    pub fn add_bond(&mut self, atom1_id: AtomId, atom2_id: AtomId, order: BondOrder) -> Option<()> {
        if !self.atoms.contains_key(atom1_id) || !self.atoms.contains_key(atom2_id) {
            return None;
        }

        if let Some(neighbors) = self.bond_adjacency.get(atom1_id) {
            if neighbors.contains(&atom2_id) {
                return Some(());
            }
        }

        self.bonds.push(Bond::new(atom1_id, atom2_id, order));
        self.bond_adjacency[atom1_id].push(atom2_id);
        self.bond_adjacency[atom2_id].push(atom1_id);
        Some(())
    }

    /// Removes an atom together with its bonds, adjacency entries and the
    /// registration in its parent residue.
    pub fn remove_atom(&mut self, atom_id: AtomId) -> Option<Atom> {
        let atom = self.atoms.remove(atom_id)?;

        if let Some(residue) = self.residues.get_mut(atom.residue_id) {
            residue.remove_atom(&atom.name, atom_id);
        }

        let bonds = std::mem::take(&mut self.bonds);
        self.bonds = bonds
            .into_iter()
            .filter(|bond| !bond.contains(atom_id))
            .collect();

        let neighbors = self.bond_adjacency.remove(atom_id).unwrap_or_default();
        for neighbor_id in neighbors {
            if let Some(adjacency) = self.bond_adjacency.get_mut(neighbor_id) {
                adjacency.retain(|&id| id != atom_id);
            }
        }

        Some(atom)
    }

    /// Removes a residue together with all of its atoms, updating the parent
    /// chain and the residue lookup map.
    pub fn remove_residue(&mut self, residue_id: ResidueId) -> Option<Residue> {
        let residue = self.residues.get(residue_id)?.clone();

        for atom_id in residue.atoms().to_vec() {
            self.remove_atom(atom_id);
        }

        if let Some(chain) = self.chains.get_mut(residue.chain_id) {
            chain.residues.retain(|&id| id != residue_id);
        }

        self.residue_id_map
            .remove(&(residue.chain_id, residue.number, residue.ins_code));

        self.residues.remove(residue_id)
    }

    /// The atoms directly bonded to the given atom, from the adjacency cache.
    pub fn bonded_neighbors(&self, atom_id: AtomId) -> Option<&[AtomId]> {
        self.bond_adjacency.get(atom_id).map(|v| v.as_slice())
    }

    /// Iterates over atoms belonging to polymer chains (protein or nucleic
    /// acid).
    pub fn polymer_atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter().filter(|(_, atom)| {
            self.residues
                .get(atom.residue_id)
                .and_then(|residue| self.chains.get(residue.chain_id))
                .is_some_and(|chain| chain.chain_type.is_polymer())
        })
    }

    /// Iterates over atoms of HETATM residues (ligands, solvent, ions).
    pub fn hetero_atoms(&self) -> impl Iterator<Item = (AtomId, &Atom)> {
        self.atoms.iter().filter(|(_, atom)| {
            self.residues
                .get(atom.residue_id)
                .is_some_and(|residue| residue.hetero)
        })
    }
}

/// Incremental construction of a [`Structure`] in file order.
///
/// Parsers stream records through `start_chain`/`start_residue`/`add_atom`
/// and connect atoms by their file serial numbers afterwards. The builder
/// tracks the current chain and residue, mirroring the way coordinate
/// formats group their records.
#[derive(Debug, Default)]
pub struct StructureBuilder {
    structure: Structure,
    serial_map: HashMap<usize, AtomId>,
    current_chain: Option<ChainId>,
    current_residue: Option<ResidueId>,
}

impl StructureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_chain(&mut self, id: char, chain_type: ChainType) -> &mut Self {
        let chain_id = self.structure.add_chain(id, chain_type);
        self.current_chain = Some(chain_id);
        self.current_residue = None;
        self
    }

    /// Starts (or re-enters) a residue in the current chain.
    ///
    /// # Panics
    ///
    /// Panics if no chain has been started.
    pub fn start_residue(
        &mut self,
        number: isize,
        name: &str,
        ins_code: Option<char>,
        hetero: bool,
    ) -> &mut Self {
        let chain_id = self
            .current_chain
            .expect("a chain must be started before a residue");
        let residue_id = self
            .structure
            .add_residue(chain_id, number, name, ins_code, hetero)
            .expect("current chain is present in the structure");
        self.current_residue = Some(residue_id);
        self
    }

    /// Adds an atom to the current residue and registers its serial number.
    ///
    /// # Panics
    ///
    /// Panics if no residue has been started.
    #[allow(clippy::too_many_arguments)]
    pub fn add_atom(
        &mut self,
        serial: usize,
        name: &str,
        element: &str,
        position: Point3<f64>,
        alt_loc: Option<char>,
        occupancy: f64,
        b_factor: f64,
        charge: i8,
    ) -> &mut Self {
        let residue_id = self
            .current_residue
            .expect("a residue must be started before an atom");
        let atom = Atom {
            serial,
            name: name.to_string(),
            element: element.to_string(),
            residue_id,
            position,
            alt_loc,
            occupancy,
            b_factor,
            charge,
        };
        let atom_id = self
            .structure
            .add_atom_to_residue(residue_id, atom)
            .expect("current residue is present in the structure");
        self.serial_map.insert(serial, atom_id);
        self
    }

    /// Connects two atoms by their file serial numbers. Returns false (and
    /// adds nothing) when either serial is unknown.
    pub fn add_bond(&mut self, serial1: usize, serial2: usize, order: BondOrder) -> bool {
        match (
            self.serial_map.get(&serial1).copied(),
            self.serial_map.get(&serial2).copied(),
        ) {
            (Some(atom1_id), Some(atom2_id)) => self
                .structure
                .add_bond(atom1_id, atom2_id, order)
                .is_some(),
            _ => false,
        }
    }

    pub fn set_cell(&mut self, cell: UnitCell) -> &mut Self {
        self.structure.set_cell(Some(cell));
        self
    }

    pub fn atom_count(&self) -> usize {
        self.structure.atom_count()
    }

    pub fn build(self) -> Structure {
        self.structure
    }
}
