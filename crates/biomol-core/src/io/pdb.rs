use crate::io::hybrid36::{Hybrid36Error, decode_hybrid36, encode_hybrid36};
use crate::io::traits::StructureFile;
use crate::structure::cell::UnitCell;
use crate::structure::chain::ChainType;
use crate::structure::ids::{AtomId, ChainId};
use crate::structure::mapping::{amino_one_letter, guess_element, is_water, nucleotide_symbol};
use crate::structure::model::{Structure, StructureBuilder};
use crate::structure::bond::BondOrder;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdbMetadata {
    /// Non-coordinate records (HEADER, TITLE, REMARK, ...) in input order.
    pub header_lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PdbWriteOptions {
    /// Write identifiers beyond their decimal column capacity in hybrid-36
    /// notation instead of wrapping them around.
    pub hybrid36: bool,
}

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: PdbParseErrorKind,
    },
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Invalid identifier in columns {columns}: {source}")]
    InvalidId {
        columns: String,
        source: Hybrid36Error,
    },
    #[error("Line is too short for ATOM/HETATM record (must reach the coordinate columns)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    if start >= end {
        return "";
    }
    line.get(start..end).unwrap_or("").trim()
}

fn char_at(line: &str, index: usize) -> Option<char> {
    line.get(index..index + 1)
        .and_then(|s| s.chars().next())
        .filter(|c| !c.is_whitespace())
}

fn parse_float(line: &str, line_num: usize, start: usize, end: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.into(),
        },
    })
}

fn parse_id(line: &str, line_num: usize, start: usize, end: usize) -> Result<i64, PdbError> {
    let value = slice_and_trim(line, start, end);
    decode_hybrid36(value).map_err(|source| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidId {
            columns: format!("{}-{}", start + 1, end),
            source,
        },
    })
}

fn parse_charge(line: &str, line_num: usize) -> Result<i8, PdbError> {
    let value = slice_and_trim(line, 78, 80);
    if value.is_empty() {
        return Ok(0);
    }
    let invalid = || PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: "79-80".into(),
            value: value.into(),
        },
    };
    // Both the column convention "2+" and the plain form "+2" occur.
    if let Some(magnitude) = value.strip_suffix(['+', '-']) {
        let magnitude: i8 = magnitude.parse().map_err(|_| invalid())?;
        return Ok(if value.ends_with('-') {
            -magnitude
        } else {
            magnitude
        });
    }
    value.parse().map_err(|_| invalid())
}

pub struct PdbFile;

impl PdbFile {
    /// Writes with explicit options; the [`StructureFile`] impl uses the
    /// defaults.
    pub fn write_with_options(
        structure: &Structure,
        metadata: &PdbMetadata,
        writer: &mut impl Write,
        options: PdbWriteOptions,
    ) -> Result<(), PdbError> {
        for line in &metadata.header_lines {
            writeln!(writer, "{}", line)?;
        }

        if let Some(cell) = structure.cell() {
            writeln!(
                writer,
                "CRYST1{:9.3}{:9.3}{:9.3}{:7.2}{:7.2}{:7.2} P 1           1",
                cell.a, cell.b, cell.c, cell.alpha, cell.beta, cell.gamma
            )?;
        }

        let mut serials: HashMap<AtomId, usize> = HashMap::new();
        let mut next_serial = 1usize;

        for (_, chain) in structure.chains_iter() {
            let mut last_residue = None;
            for &residue_id in chain.residues() {
                let residue = structure.residue(residue_id).ok_or_else(|| {
                    PdbError::Inconsistency("chain references a missing residue".into())
                })?;
                last_residue = Some(residue);
                for &atom_id in residue.atoms() {
                    let atom = structure.atom(atom_id).ok_or_else(|| {
                        PdbError::Inconsistency("residue references a missing atom".into())
                    })?;
                    let serial = next_serial;
                    next_serial += 1;
                    serials.insert(atom_id, serial);

                    let record = if residue.hetero { "HETATM" } else { "ATOM" };
                    let name = format_atom_name(&atom.name, &atom.element);
                    let alt_loc = atom.alt_loc.unwrap_or(' ');
                    let ins_code = residue.ins_code.unwrap_or(' ');
                    let charge = if atom.charge == 0 {
                        "  ".to_string()
                    } else {
                        format!(
                            "{}{}",
                            atom.charge.abs(),
                            if atom.charge < 0 { '-' } else { '+' }
                        )
                    };
                    writeln!(
                        writer,
                        "{:<6}{:>5} {}{}{:>3} {}{:>4}{}   {:8.3}{:8.3}{:8.3}{:6.2}{:6.2}          {:>2}{}",
                        record,
                        format_serial(serial, 5, options.hybrid36)?,
                        name,
                        alt_loc,
                        residue.name,
                        chain.id,
                        format_residue_number(residue.number, options.hybrid36)?,
                        ins_code,
                        atom.position.x,
                        atom.position.y,
                        atom.position.z,
                        atom.occupancy,
                        atom.b_factor,
                        atom.element,
                        charge
                    )?;
                }
            }

            if chain.chain_type.is_polymer() {
                if let Some(residue) = last_residue {
                    let serial = next_serial;
                    next_serial += 1;
                    writeln!(
                        writer,
                        "TER   {:>5}      {:>3} {}{:>4}{}",
                        format_serial(serial, 5, options.hybrid36)?,
                        residue.name,
                        chain.id,
                        format_residue_number(residue.number, options.hybrid36)?,
                        residue.ins_code.unwrap_or(' ')
                    )?;
                }
            }
        }

        if !structure.bonds().is_empty() {
            let mut partners: HashMap<usize, Vec<usize>> = HashMap::new();
            for bond in structure.bonds() {
                let serial1 = serials.get(&bond.atom1_id).copied().ok_or_else(|| {
                    PdbError::Inconsistency("bond references an atom outside any chain".into())
                })?;
                let serial2 = serials.get(&bond.atom2_id).copied().ok_or_else(|| {
                    PdbError::Inconsistency("bond references an atom outside any chain".into())
                })?;
                partners.entry(serial1).or_default().push(serial2);
                partners.entry(serial2).or_default().push(serial1);
            }
            let mut centers: Vec<usize> = partners.keys().copied().collect();
            centers.sort_unstable();
            for center in centers {
                let mut bonded = partners.remove(&center).unwrap_or_default();
                bonded.sort_unstable();
                for chunk in bonded.chunks(4) {
                    let mut line = format!("CONECT{}", format_serial(center, 5, options.hybrid36)?);
                    for &partner in chunk {
                        line.push_str(&format_serial(partner, 5, options.hybrid36)?);
                    }
                    writeln!(writer, "{}", line)?;
                }
            }
        }

        writeln!(writer, "END")?;
        Ok(())
    }
}

impl StructureFile for PdbFile {
    type Metadata = PdbMetadata;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<(Structure, Self::Metadata), Self::Error> {
        let mut builder = StructureBuilder::new();
        let mut metadata = PdbMetadata::default();

        let mut conect: Vec<(usize, usize)> = Vec::new();
        let mut cell = None;

        let mut current_chain = '\0';
        let mut current_residue: Option<(isize, Option<char>)> = None;
        let mut models_seen = 0usize;
        let mut coordinates_done = false;
        let mut extra_models_warned = false;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            let record_type = slice_and_trim(&line, 0, 6);
            match record_type {
                "ATOM" | "HETATM" => {
                    if coordinates_done {
                        if !extra_models_warned {
                            warn!("file contains multiple models, only the first is read");
                            extra_models_warned = true;
                        }
                        continue;
                    }
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let serial = parse_id(&line, line_num, 6, 11)?;
                    let serial = usize::try_from(serial).map_err(|_| PdbError::Parse {
                        line: line_num,
                        kind: PdbParseErrorKind::InvalidInt {
                            columns: "7-11".into(),
                            value: serial.to_string(),
                        },
                    })?;
                    let raw_name = line.get(12..16).unwrap_or("");
                    let name = raw_name.trim();
                    let alt_loc = char_at(&line, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = char_at(&line, 21).unwrap_or('A');
                    let res_number = parse_id(&line, line_num, 22, 26)? as isize;
                    let ins_code = char_at(&line, 26);
                    let x = parse_float(&line, line_num, 30, 38)?;
                    let y = parse_float(&line, line_num, 38, 46)?;
                    let z = parse_float(&line, line_num, 46, 54)?;
                    let occupancy = match slice_and_trim(&line, 54, 60) {
                        "" => 1.0,
                        _ => parse_float(&line, line_num, 54, 60)?,
                    };
                    let b_factor = match slice_and_trim(&line, 60, 66) {
                        "" => 0.0,
                        _ => parse_float(&line, line_num, 60, 66)?,
                    };
                    let element = match slice_and_trim(&line, 76, 78) {
                        "" => guess_element(raw_name),
                        found => found.to_string(),
                    };
                    let charge = parse_charge(&line, line_num)?;

                    if chain_id != current_chain {
                        // Chain types are classified after parsing, once all
                        // residue names are known.
                        builder.start_chain(chain_id, ChainType::Other);
                        current_chain = chain_id;
                        current_residue = None;
                    }
                    if current_residue != Some((res_number, ins_code)) {
                        builder.start_residue(
                            res_number,
                            res_name,
                            ins_code,
                            record_type == "HETATM",
                        );
                        current_residue = Some((res_number, ins_code));
                    }
                    builder.add_atom(
                        serial,
                        name,
                        &element,
                        nalgebra::Point3::new(x, y, z),
                        alt_loc,
                        occupancy,
                        b_factor,
                        charge,
                    );
                }
                "CONECT" => {
                    let center = match parse_id(&line, line_num, 6, 11) {
                        Ok(serial) if serial > 0 => serial as usize,
                        _ => continue,
                    };
                    for (start, end) in [(11, 16), (16, 21), (21, 26), (26, 31)] {
                        if slice_and_trim(&line, start, end).is_empty() {
                            continue;
                        }
                        if let Ok(partner) = parse_id(&line, line_num, start, end) {
                            if partner > 0 {
                                let partner = partner as usize;
                                conect.push((center.min(partner), center.max(partner)));
                            }
                        }
                    }
                }
                "CRYST1" => {
                    cell = Some(UnitCell::new(
                        parse_float(&line, line_num, 6, 15)?,
                        parse_float(&line, line_num, 15, 24)?,
                        parse_float(&line, line_num, 24, 33)?,
                        parse_float(&line, line_num, 33, 40)?,
                        parse_float(&line, line_num, 40, 47)?,
                        parse_float(&line, line_num, 47, 54)?,
                    ));
                }
                "MODEL" => {
                    models_seen += 1;
                    if models_seen > 1 {
                        coordinates_done = true;
                    }
                }
                "ENDMDL" => coordinates_done = true,
                "TER" | "MASTER" => {}
                "END" => break,
                "" => {}
                _ => metadata.header_lines.push(line.clone()),
            }
        }

        if builder.atom_count() == 0 {
            return Err(PdbError::MissingRecord("ATOM/HETATM records".into()));
        }

        conect.sort_unstable();
        conect.dedup();
        for (serial1, serial2) in conect {
            if !builder.add_bond(serial1, serial2, BondOrder::Single) {
                warn!(
                    serial1,
                    serial2, "CONECT record references unknown atom serials, skipping bond"
                );
            }
        }

        let mut structure = builder.build();
        structure.set_cell(cell);
        classify_chains(&mut structure);
        Ok((structure, metadata))
    }

    fn write_to(
        structure: &Structure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_with_options(structure, metadata, writer, PdbWriteOptions::default())
    }
}

fn format_serial(serial: usize, width: usize, hybrid36: bool) -> Result<String, PdbError> {
    let limit = 10usize.pow(width as u32) - 1;
    if hybrid36 {
        return encode_hybrid36(serial as i64, width)
            .map_err(|e| PdbError::Inconsistency(e.to_string()));
    }
    if serial > limit {
        // Legacy behavior: identifiers wrap around instead of widening the
        // column.
        let wrapped = (serial - 1) % limit + 1;
        warn!(
            serial,
            wrapped, "atom serial exceeds its column width, wrapping; consider hybrid-36 output"
        );
        return Ok(format!("{:>width$}", wrapped, width = width));
    }
    Ok(format!("{:>width$}", serial, width = width))
}

fn format_residue_number(number: isize, hybrid36: bool) -> Result<String, PdbError> {
    if number >= 0 && hybrid36 {
        return encode_hybrid36(number as i64, 4).map_err(|e| PdbError::Inconsistency(e.to_string()));
    }
    if number > 9999 {
        let wrapped = (number - 1) % 9999 + 1;
        warn!(
            number,
            wrapped,
            "residue number exceeds its column width, wrapping; consider hybrid-36 output"
        );
        return Ok(format!("{:>4}", wrapped));
    }
    Ok(format!("{:>4}", number))
}

fn format_atom_name(name: &str, element: &str) -> String {
    if name.len() >= 4 {
        name.to_string()
    } else if element.len() >= 2 {
        format!("{:<4}", name)
    } else {
        format!(" {:<3}", name)
    }
}

fn classify_chains(structure: &mut Structure) {
    let chain_ids: Vec<ChainId> = structure.chains_iter().map(|(id, _)| id).collect();
    for chain_id in chain_ids {
        let chain_type = classify_chain(structure, chain_id);
        if let Some(chain) = structure.chain_mut(chain_id) {
            chain.chain_type = chain_type;
        }
    }
}

fn classify_chain(structure: &Structure, chain_id: ChainId) -> ChainType {
    let Some(chain) = structure.chain(chain_id) else {
        return ChainType::Other;
    };
    let mut saw_deoxy = false;
    let mut saw_ribo = false;
    let mut saw_water = false;
    let mut saw_other = false;
    for &residue_id in chain.residues() {
        let Some(residue) = structure.residue(residue_id) else {
            continue;
        };
        let name = residue.name.as_str();
        if amino_one_letter(name).is_some() {
            return ChainType::Protein;
        } else if name.starts_with('D') && nucleotide_symbol(name).is_some() {
            saw_deoxy = true;
        } else if nucleotide_symbol(name).is_some() {
            saw_ribo = true;
        } else if is_water(name) {
            saw_water = true;
        } else {
            saw_other = true;
        }
    }
    if saw_deoxy {
        ChainType::DNA
    } else if saw_ribo {
        ChainType::RNA
    } else if saw_other {
        ChainType::Ligand
    } else if saw_water {
        ChainType::Water
    } else {
        ChainType::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::atom::Atom;
    use crate::structure::mapping::protein_sequence;
    use nalgebra::Point3;
    use std::io::{BufReader, Cursor};

    const SMALL_PDB: &str = "\
HEADER    TEST PROTEIN                            01-JAN-20   XXXX
TITLE     TWO RESIDUES AND A WATER
CRYST1   66.650  190.660   68.840  90.00  90.00  90.00 P 1           1
ATOM      1  N   GLY A   1       0.000   0.000   0.000  1.00 10.00           N
ATOM      2  CA  GLY A   1       1.458   0.000   0.000  1.00 10.50           C
ATOM      3  C   GLY A   1       2.009   1.420   0.000  1.00 11.00           C
ATOM      4  N   ALA A   2       3.332   1.536   0.000  1.00 12.00           N
ATOM      5  CA  ALA A   2       3.988   2.839   0.000  1.00 12.50           C
TER       6      ALA A   2
HETATM    7  O   HOH B 101       8.000   8.000   8.000  1.00 30.00           O
HETATM    8 FE   LIG B 102       9.000   9.000   9.000  0.50 20.00          FE2+
CONECT    7    8
END
";

    fn read_str(text: &str) -> (Structure, PdbMetadata) {
        let mut reader = BufReader::new(Cursor::new(text.as_bytes()));
        PdbFile::read_from(&mut reader).unwrap()
    }

    fn write_string(structure: &Structure, metadata: &PdbMetadata) -> String {
        let mut out = Vec::new();
        PdbFile::write_to(structure, metadata, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn read_parses_atoms_residues_and_chains() {
        let (structure, metadata) = read_str(SMALL_PDB);

        assert_eq!(structure.atom_count(), 8);
        assert_eq!(structure.chains_iter().count(), 2);
        assert_eq!(structure.residues_iter().count(), 4);
        assert_eq!(metadata.header_lines.len(), 2);

        let chain_a = structure.find_chain('A').unwrap();
        assert_eq!(structure.chain(chain_a).unwrap().chain_type, ChainType::Protein);
        let gly = structure.find_residue(chain_a, 1, None).unwrap();
        assert_eq!(structure.residue(gly).unwrap().name, "GLY");
        assert!(!structure.residue(gly).unwrap().hetero);

        let ca = structure.residue(gly).unwrap().first_atom_id_by_name("CA").unwrap();
        let atom = structure.atom(ca).unwrap();
        assert_eq!(atom.serial, 2);
        assert_eq!(atom.element, "C");
        assert!((atom.position.x - 1.458).abs() < 1e-9);
        assert!((atom.b_factor - 10.5).abs() < 1e-9);
    }

    #[test]
    fn read_classifies_hetero_chain_and_parses_charge() {
        let (structure, _) = read_str(SMALL_PDB);
        let chain_b = structure.find_chain('B').unwrap();
        assert_eq!(structure.chain(chain_b).unwrap().chain_type, ChainType::Ligand);

        let lig = structure.find_residue(chain_b, 102, None).unwrap();
        let fe = structure.residue(lig).unwrap().first_atom_id_by_name("FE").unwrap();
        let atom = structure.atom(fe).unwrap();
        assert_eq!(atom.element, "FE");
        assert_eq!(atom.charge, 2);
        assert!((atom.occupancy - 0.5).abs() < 1e-9);
        assert!(structure.residue(lig).unwrap().hetero);
    }

    #[test]
    fn read_parses_the_unit_cell() {
        let (structure, _) = read_str(SMALL_PDB);
        let cell = structure.cell().unwrap();
        assert!((cell.a - 66.65).abs() < 1e-9);
        assert!((cell.b - 190.66).abs() < 1e-9);
        assert!((cell.gamma - 90.0).abs() < 1e-9);
    }

    #[test]
    fn read_applies_conect_records() {
        let (structure, _) = read_str(SMALL_PDB);
        assert_eq!(structure.bonds().len(), 1);
        let chain_b = structure.find_chain('B').unwrap();
        let hoh = structure.find_residue(chain_b, 101, None).unwrap();
        let o = structure.residue(hoh).unwrap().first_atom_id_by_name("O").unwrap();
        assert_eq!(structure.bonded_neighbors(o).unwrap().len(), 1);
    }

    #[test]
    fn read_guesses_elements_when_the_column_is_missing() {
        let text = "\
ATOM      1  CA  GLY A   1       0.000   0.000   0.000
ATOM      2 1HB2 GLY A   1       1.000   0.000   0.000
HETATM    3 CA   UNL B   2       2.000   0.000   0.000
END
";
        let (structure, _) = read_str(text);
        let elements: Vec<String> = structure
            .atoms_iter()
            .map(|(_, atom)| atom.element.clone())
            .collect();
        assert!(elements.contains(&"C".to_string()));
        assert!(elements.contains(&"H".to_string()));
        assert!(elements.contains(&"CA".to_string()));
    }

    #[test]
    fn read_takes_only_the_first_model() {
        let text = "\
MODEL        1
ATOM      1  CA  GLY A   1       0.000   0.000   0.000  1.00  0.00           C
ENDMDL
MODEL        2
ATOM      1  CA  GLY A   1       5.000   0.000   0.000  1.00  0.00           C
ENDMDL
END
";
        let (structure, _) = read_str(text);
        assert_eq!(structure.atom_count(), 1);
        let (_, atom) = structure.atoms_iter().next().unwrap();
        assert!((atom.position.x).abs() < 1e-9);
    }

    #[test]
    fn read_rejects_files_without_atoms() {
        let mut reader = BufReader::new(Cursor::new(b"HEADER    EMPTY\nEND\n".as_slice()));
        let error = PdbFile::read_from(&mut reader).unwrap_err();
        assert!(matches!(error, PdbError::MissingRecord(_)));
    }

    #[test]
    fn read_rejects_truncated_atom_records() {
        let mut reader =
            BufReader::new(Cursor::new(b"ATOM      1  CA  GLY A   1      0.0\n".as_slice()));
        let error = PdbFile::read_from(&mut reader).unwrap_err();
        assert!(matches!(
            error,
            PdbError::Parse {
                kind: PdbParseErrorKind::LineTooShort,
                ..
            }
        ));
    }

    #[test]
    fn write_read_round_trip_preserves_the_structure() {
        let (structure, metadata) = read_str(SMALL_PDB);
        let text = write_string(&structure, &metadata);
        let mut reader = BufReader::new(Cursor::new(text.as_bytes()));
        let (reread, remeta) = PdbFile::read_from(&mut reader).unwrap();

        assert_eq!(remeta, metadata);
        assert_eq!(reread.atom_count(), structure.atom_count());
        assert_eq!(reread.bonds().len(), structure.bonds().len());
        assert_eq!(reread.cell(), structure.cell());

        for ((_, before), (_, after)) in structure.atoms_iter().zip(reread.atoms_iter()) {
            assert_eq!(before.serial, after.serial);
            assert_eq!(before.name, after.name);
            assert_eq!(before.element, after.element);
            assert_eq!(before.charge, after.charge);
            assert!((before.position - after.position).norm() < 1e-3);
            assert!((before.occupancy - after.occupancy).abs() < 1e-2);
            assert!((before.b_factor - after.b_factor).abs() < 1e-2);
        }

        let chain_a = reread.find_chain('A').unwrap();
        let seq = protein_sequence(&reread, chain_a).unwrap();
        assert_eq!(seq.to_symbol_string().unwrap(), "GA");
    }

    #[test]
    fn write_emits_ter_after_polymer_chains() {
        let (structure, metadata) = read_str(SMALL_PDB);
        let text = write_string(&structure, &metadata);
        let ter_lines: Vec<&str> = text.lines().filter(|l| l.starts_with("TER")).collect();
        assert_eq!(ter_lines.len(), 1);
        assert!(ter_lines[0].contains("ALA A   2"));
    }

    #[test]
    fn write_round_trips_through_paths() {
        let (structure, metadata) = read_str(SMALL_PDB);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdb");
        PdbFile::write_to_path(&structure, &metadata, &path).unwrap();
        let (reread, _) = PdbFile::read_from_path(&path).unwrap();
        assert_eq!(reread.atom_count(), structure.atom_count());
    }

    #[test]
    fn serial_formatting_wraps_or_extends_depending_on_options() {
        assert_eq!(format_serial(123, 5, false).unwrap(), "  123");
        assert_eq!(format_serial(99999, 5, false).unwrap(), "99999");
        assert_eq!(format_serial(100000, 5, false).unwrap(), "    1");
        assert_eq!(format_serial(100000, 5, true).unwrap(), "A0000");
        assert_eq!(format_serial(123, 5, true).unwrap(), "00123");
    }

    #[test]
    fn residue_number_formatting_matches_the_hybrid36_convention() {
        assert_eq!(format_residue_number(9999, false).unwrap(), "9999");
        assert_eq!(format_residue_number(10000, false).unwrap(), "   1");
        assert_eq!(format_residue_number(100000, true).unwrap(), "BXG0");
        assert_eq!(format_residue_number(-5, false).unwrap(), "  -5");
        assert_eq!(format_residue_number(-5, true).unwrap(), "  -5");
    }

    #[test]
    fn id_overflow_round_trips_with_hybrid36_output() {
        let mut structure = Structure::new();
        let chain_id = structure.add_chain('A', ChainType::Protein);
        for number in 1..=10_000isize {
            let residue_id = structure
                .add_residue(chain_id, number, "GLY", None, false)
                .unwrap();
            let mut atom = Atom::new("CA", residue_id, Point3::new(0.0, 0.0, number as f64));
            atom.element = "C".to_string();
            structure.add_atom_to_residue(residue_id, atom).unwrap();
        }

        let mut out = Vec::new();
        PdbFile::write_with_options(
            &structure,
            &PdbMetadata::default(),
            &mut out,
            PdbWriteOptions { hybrid36: true },
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        // The 10000th residue overflows the four-column decimal range.
        let last_atom_line = text
            .lines()
            .filter(|l| l.starts_with("ATOM"))
            .next_back()
            .unwrap();
        assert_eq!(&last_atom_line[22..26], "A000");

        let mut reader = BufReader::new(Cursor::new(text.as_bytes()));
        let (reread, _) = PdbFile::read_from(&mut reader).unwrap();
        assert_eq!(reread.atom_count(), 10_000);
        let chain = reread.find_chain('A').unwrap();
        assert!(reread.find_residue(chain, 10_000, None).is_some());
    }

    #[test]
    fn atom_names_are_padded_by_element_width() {
        assert_eq!(format_atom_name("CA", "C"), " CA ");
        assert_eq!(format_atom_name("N", "N"), " N  ");
        assert_eq!(format_atom_name("FE", "FE"), "FE  ");
        assert_eq!(format_atom_name("1HB2", "H"), "1HB2");
    }
}
