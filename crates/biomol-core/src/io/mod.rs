//! Reading and writing structure file formats.
//!
//! Formats implement the [`StructureFile`](traits::StructureFile) trait,
//! parsing into the shared [`Structure`](crate::structure::Structure) model
//! and carrying format-specific side information in an associated metadata
//! type. The [`hybrid36`] codec handles the fixed-width identifier fields
//! that legacy formats overflow.

pub mod hybrid36;
pub mod pdb;
pub mod traits;

pub use hybrid36::{Hybrid36Error, decode_hybrid36, encode_hybrid36, max_hybrid36_number};
pub use pdb::{PdbError, PdbFile, PdbMetadata, PdbWriteOptions};
pub use traits::StructureFile;
