//! # biomol
//!
//! A library of data structures and file-format codecs for computational
//! biology: biological sequences encoded over symbol alphabets, and
//! macromolecular structures read from and written to coordinate file
//! formats.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers with a strict dependency
//! direction, so that each can be used and tested on its own.
//!
//! - **[`seq`]: Sequence encodings.** The representational core. An
//!   [`Alphabet`](seq::Alphabet) maps symbols to dense integer codes, and a
//!   [`Sequence`](seq::Sequence) stores a symbol string as a minimal-width
//!   code array, with indexing, mutation, concatenation and validity
//!   semantics defined entirely in terms of the alphabet contract.
//!
//! - **[`structure`]: Macromolecular models.** Atoms, residues, chains and
//!   bonds in slot-map keyed storage, plus the residue-name tables that
//!   project structure chains onto sequence types.
//!
//! - **[`io`]: Format codecs.** The PDB reader/writer and the hybrid-36
//!   identifier transcoder consumed by fixed-column formats. Codecs produce
//!   and consume only the public contracts of the two layers below.

pub mod io;
pub mod seq;
pub mod structure;
