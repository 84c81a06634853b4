//! Macromolecular structure representation.
//!
//! The structure layer models coordinate data the way structure file formats
//! deliver it: atoms grouped into residues, residues into chains, plus an
//! explicit bond list and an optional crystallographic unit cell. Entities
//! live in slot maps and are addressed by the stable key types of [`ids`];
//! [`Structure`] maintains the lookup maps and adjacency caches needed to
//! navigate between them, and [`StructureBuilder`] offers the streaming
//! construction path used by parsers.
//!
//! [`mapping`] carries the residue-name knowledge connecting the structure
//! layer to the sequence layer: three-letter and nucleotide residue names
//! map to alphabet symbols, and whole chains extract into
//! [`ProteinSequence`](crate::seq::ProteinSequence) or
//! [`NucleotideSequence`](crate::seq::NucleotideSequence) values.
//!
//! [`Structure`]: model::Structure
//! [`StructureBuilder`]: model::StructureBuilder

pub mod atom;
pub mod bond;
pub mod cell;
pub mod chain;
pub mod ids;
pub mod mapping;
pub mod model;
pub mod residue;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use cell::UnitCell;
pub use chain::{Chain, ChainType};
pub use ids::{AtomId, ChainId, ResidueId};
pub use model::{Structure, StructureBuilder};
pub use residue::Residue;
