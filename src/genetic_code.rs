//! Genetic code definitions and translation logic.
//!
//! This module provides:
//! - NCBI genetic code tables (1-33, excluding the unassigned ids)
//! - Codon to amino acid translation, with IUPAC ambiguity resolution
//! - Whole-sequence translation in the reading frame starting at index 0

use std::fmt;
use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use crate::sequence::Sequence;

/// Symbol emitted for stop codons.
pub const STOP: char = '*';

/// Symbol emitted for codons that do not resolve to a single amino acid.
pub const UNKNOWN_AMINO_ACID: char = 'X';

/// Raised when a table id does not name a known genetic code.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Unknown genetic code table: {0} (valid ids are 1-33)")]
pub struct InvalidTableIdError(pub u8);

/// A translated protein: amino acid symbols, `*` for stops, `X` for unknowns.
///
/// Stop markers may appear anywhere, not only at the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ProteinSequence {
    data: String,
}

impl ProteinSequence {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    /// Gets the amino acid symbol at a specific position.
    pub fn symbol_at(&self, pos: usize) -> Option<char> {
        self.data.as_bytes().get(pos).map(|&b| b as char)
    }

    /// Iterates over the amino acid symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.data.chars()
    }
}

impl fmt::Display for ProteinSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

impl From<&str> for ProteinSequence {
    fn from(s: &str) -> Self {
        Self { data: s.to_string() }
    }
}

/// Concrete bases denoted by a nucleotide symbol, as NCBI table indices
/// (T=0, C=1, A=2, G=3).
fn base_indices(symbol: u8) -> &'static [usize] {
    match symbol {
        b'T' => &[0],
        b'C' => &[1],
        b'A' => &[2],
        b'G' => &[3],
        b'Y' => &[0, 1],
        b'W' => &[0, 2],
        b'K' => &[0, 3],
        b'M' => &[1, 2],
        b'S' => &[1, 3],
        b'R' => &[2, 3],
        b'H' => &[0, 1, 2],
        b'B' => &[0, 1, 3],
        b'D' => &[0, 2, 3],
        b'V' => &[1, 2, 3],
        b'N' => &[0, 1, 2, 3],
        _ => &[],
    }
}

/// A genetic code table for translating codons to amino acids.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    /// NCBI genetic code ID
    pub id: u8,
    /// Name of the genetic code
    pub name: &'static str,
    /// Amino acid per codon, indexed by `16*b1 + 4*b2 + b3` in NCBI base order
    codon_table: [u8; 64],
}

impl GeneticCode {
    /// Creates a genetic code from an NCBI `ncbieaa` string.
    ///
    /// The string lists the 64 amino acids in NCBI codon order
    /// (TTT, TTC, TTA, TTG, TCT, ...), which is exactly the index order
    /// of the internal table.
    fn new(id: u8, name: &'static str, ncbieaa: &str) -> Self {
        let mut codon_table = [UNKNOWN_AMINO_ACID as u8; 64];
        for (slot, aa) in codon_table.iter_mut().zip(ncbieaa.bytes()) {
            *slot = aa;
        }
        Self { id, name, codon_table }
    }

    /// Translates a single codon to an amino acid.
    ///
    /// # Rules:
    /// - Codons of unambiguous bases are looked up directly
    /// - Codons with IUPAC ambiguity codes are expanded to every codon they
    ///   denote; if all agree (same amino acid, or all stops) that symbol
    ///   is returned, otherwise 'X'
    /// - Anything that is not a 3-symbol nucleotide codon returns 'X'
    pub fn translate_codon(&self, codon: &[u8]) -> char {
        let [b1, b2, b3] = match codon {
            [a, b, c] => [
                base_indices(a.to_ascii_uppercase()),
                base_indices(b.to_ascii_uppercase()),
                base_indices(c.to_ascii_uppercase()),
            ],
            _ => return UNKNOWN_AMINO_ACID,
        };

        let mut resolved: Option<u8> = None;
        for &i in b1 {
            for &j in b2 {
                for &k in b3 {
                    let aa = self.codon_table[i * 16 + j * 4 + k];
                    match resolved {
                        None => resolved = Some(aa),
                        Some(prev) if prev != aa => return UNKNOWN_AMINO_ACID,
                        Some(_) => {}
                    }
                }
            }
        }

        resolved.map(char::from).unwrap_or(UNKNOWN_AMINO_ACID)
    }

    /// Translates an entire nucleotide sequence to amino acids.
    ///
    /// Codons are read from index 0; a trailing partial codon is dropped,
    /// and translation continues past stop codons.
    pub fn translate_sequence(&self, sequence: &[u8]) -> ProteinSequence {
        let data: String = sequence
            .chunks_exact(3)
            .map(|codon| self.translate_codon(codon))
            .collect();

        let remainder = sequence.len() % 3;
        if remainder != 0 {
            debug!(
                table = self.id,
                length = sequence.len(),
                remainder,
                "dropping trailing partial codon"
            );
        }

        ProteinSequence { data }
    }
}

/// Source of genetic code tables by id.
pub trait GeneticCodeTableProvider {
    /// Looks up the table for `table_id`.
    fn lookup(&self, table_id: u8) -> Result<&GeneticCode, InvalidTableIdError>;
}

/// All available genetic codes from NCBI.
pub struct GeneticCodes {
    codes: Vec<GeneticCode>,
}

impl GeneticCodes {
    /// Creates the complete set of NCBI genetic codes.
    pub fn new() -> Self {
        let codes = vec![
            GeneticCode::new(1, "Standard",
                "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(2, "Vertebrate Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"),
            GeneticCode::new(3, "Yeast Mitochondrial",
                "FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(4, "Mold, Protozoan, and Coelenterate Mitochondrial; Mycoplasma/Spiroplasma",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(5, "Invertebrate Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"),
            GeneticCode::new(6, "Ciliate, Dasycladacean and Hexamita Nuclear",
                "FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(9, "Echinoderm and Flatworm Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
            GeneticCode::new(10, "Euplotid Nuclear",
                "FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(11, "Bacterial, Archaeal and Plant Plastid",
                "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(12, "Alternative Yeast Nuclear",
                "FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(13, "Ascidian Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG"),
            GeneticCode::new(14, "Alternative Flatworm Mitochondrial",
                "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
            GeneticCode::new(15, "Blepharisma Macronuclear",
                "FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(16, "Chlorophycean Mitochondrial",
                "FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(21, "Trematode Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
            GeneticCode::new(22, "Scenedesmus obliquus Mitochondrial",
                "FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(23, "Thraustochytrium Mitochondrial",
                "FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(24, "Rhabdopleuridae Mitochondrial",
                "FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
            GeneticCode::new(25, "Candidate Division SR1 and Gracilibacteria",
                "FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(26, "Pachysolen tannophilus Nuclear",
                "FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(27, "Karyorelict Nuclear",
                "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(28, "Condylostoma Nuclear",
                "FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(29, "Mesodinium Nuclear",
                "FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(30, "Peritrich Nuclear",
                "FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(31, "Blastocrithidia Nuclear",
                "FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(32, "Balanophoraceae Plastid",
                "FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
            GeneticCode::new(33, "Cephalodiscidae Mitochondrial",
                "FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
        ];

        Self { codes }
    }

    /// Shared catalogue, built on first use.
    pub fn ncbi() -> &'static GeneticCodes {
        static CODES: OnceLock<GeneticCodes> = OnceLock::new();
        CODES.get_or_init(GeneticCodes::new)
    }

    /// Returns all genetic codes.
    pub fn all(&self) -> &[GeneticCode] {
        &self.codes
    }

    /// Gets a genetic code by ID.
    pub fn get(&self, id: u8) -> Option<&GeneticCode> {
        self.codes.iter().find(|c| c.id == id)
    }
}

impl GeneticCodeTableProvider for GeneticCodes {
    fn lookup(&self, table_id: u8) -> Result<&GeneticCode, InvalidTableIdError> {
        self.get(table_id).ok_or(InvalidTableIdError(table_id))
    }
}

impl Default for GeneticCodes {
    fn default() -> Self {
        Self::new()
    }
}

/// Translates `seq` under the NCBI genetic code `table_id`.
///
/// # Examples
///
/// ```
/// use mutsim::genetic_code::translate;
/// use mutsim::sequence::validate;
///
/// let protein = translate(&validate("ATGTT").unwrap(), 1).unwrap();
/// assert_eq!(protein.as_str(), "M");
/// assert!(translate(&validate("ATG").unwrap(), 34).is_err());
/// ```
pub fn translate(seq: &Sequence, table_id: u8) -> Result<ProteinSequence, InvalidTableIdError> {
    translate_with(GeneticCodes::ncbi(), seq, table_id)
}

/// Translates `seq` using a table from the given provider.
pub fn translate_with<P: GeneticCodeTableProvider + ?Sized>(
    provider: &P,
    seq: &Sequence,
    table_id: u8,
) -> Result<ProteinSequence, InvalidTableIdError> {
    let code = provider.lookup(table_id)?;
    Ok(code.translate_sequence(seq.as_bytes()))
}
