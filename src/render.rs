//! Plain-text rendering of a [`MutationReport`].
//!
//! This is the presentation layer used by the command-line tool; the core
//! modules never format anything themselves.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::effect::Effect;
use crate::genetic_code::GeneticCode;
use crate::mutation::MutationKind;
use crate::report::MutationReport;
use crate::source::SequenceRecord;

/// Width of the label column in the summary table.
const LABEL_WIDTH: usize = 20;

/// Rendering options.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Wrap sequence blocks to this many columns; `None` keeps one line each.
    pub width: Option<usize>,
}

pub fn kind_label(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Substitution => "Substitution",
        MutationKind::Insertion => "Insertion",
        MutationKind::Deletion => "Deletion",
    }
}

pub fn effect_label(effect: Effect) -> &'static str {
    match effect {
        Effect::Silent => "Silent mutation (no change in protein)",
        Effect::Nonsense => "Nonsense mutation (stop codon introduced)",
        Effect::MissenseOrFrameshift => "Missense or frameshift mutation",
        Effect::GenericChange => "Mutation changed protein",
    }
}

/// Writes the ID / Description / Length header of a sequence record.
pub fn write_record_header<W: Write>(out: &mut W, record: &SequenceRecord) -> io::Result<()> {
    writeln!(out, "ID: {}", record.id)?;
    writeln!(out, "Description: {}", record.description)?;
    writeln!(out, "Length: {}", record.sequence.len())?;
    writeln!(out)
}

/// Writes the summary table followed by the four sequence blocks.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &MutationReport,
    options: RenderOptions,
) -> io::Result<()> {
    let bases = report.bases().map_or("-", |b| b.as_str());

    writeln!(out, "Report")?;
    write_row(out, "Mutation Type", kind_label(report.kind()))?;
    write_row(out, "Position", &report.position().to_string())?;
    write_row(out, "Base", bases)?;
    write_row(out, "Effect of Mutation", effect_label(report.effect()))?;

    write_block(out, "Original DNA", report.original_sequence().as_str(), options)?;
    write_block(out, "Mutated DNA", report.mutated_sequence().as_str(), options)?;
    write_block(out, "Original Protein", report.original_protein().as_str(), options)?;
    write_block(out, "Mutated Protein", report.mutated_protein().as_str(), options)?;
    Ok(())
}

/// Writes one line per genetic code: id and name.
pub fn write_code_list<W: Write>(out: &mut W, codes: &[GeneticCode]) -> io::Result<()> {
    for code in codes {
        writeln!(out, "{:>3}  {}", code.id, code.name)?;
    }
    Ok(())
}

fn write_row<W: Write>(out: &mut W, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "  {:<width$}{}", label, value, width = LABEL_WIDTH)
}

fn write_block<W: Write>(
    out: &mut W,
    title: &str,
    data: &str,
    options: RenderOptions,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, ">> {}:", title)?;
    for line in wrap_lines(data, options.width) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn wrap_lines(data: &str, width: Option<usize>) -> Vec<Cow<'_, str>> {
    match width {
        Some(width) if !data.is_empty() => textwrap::wrap(data, width),
        _ => vec![Cow::Borrowed(data)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mutation::Mutation;
    use crate::sequence::validate;
    use crate::simulate::simulate;

    fn render(report: &MutationReport, options: RenderOptions) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_report_layout() {
        let seq = validate("ATGTTTAAA").unwrap();
        let report = simulate(&seq, &Mutation::substitution(6, "T").unwrap(), 1).unwrap();
        let text = render(&report, RenderOptions::default());

        let expected = "\
Report
  Mutation Type       Substitution
  Position            6
  Base                T
  Effect of Mutation  Nonsense mutation (stop codon introduced)

>> Original DNA:
ATGTTTAAA

>> Mutated DNA:
ATGTTTTAA

>> Original Protein:
MFK

>> Mutated Protein:
MF*
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_deletion_shows_no_base() {
        let seq = validate("ATGTTT").unwrap();
        let report = simulate(&seq, &Mutation::deletion(0), 1).unwrap();
        let text = render(&report, RenderOptions::default());

        assert!(text.contains("  Base                -\n"));
        assert!(text.contains("Deletion"));
    }

    #[test]
    fn test_wrapping() {
        let seq = validate(&"ATG".repeat(10)).unwrap();
        let report = simulate(&seq, &Mutation::substitution(0, "A").unwrap(), 1).unwrap();
        let text = render(&report, RenderOptions { width: Some(12) });

        assert!(text.contains(">> Original DNA:\nATGATGATGATG\nATGATGATGATG\nATGATG\n"));
        assert!(text.contains(">> Original Protein:\nMMMMMMMMMM\n"));
    }

    #[test]
    fn test_empty_protein_block() {
        let seq = validate("AT").unwrap();
        let report = simulate(&seq, &Mutation::insertion(2, "G").unwrap(), 1).unwrap();
        let text = render(&report, RenderOptions { width: Some(10) });

        assert!(text.contains(">> Original Protein:\n\n"));
        assert!(text.ends_with(">> Mutated Protein:\nM\n"));
    }

    #[test]
    fn test_record_header() {
        let record = SequenceRecord {
            id: "AB000001.1".to_string(),
            description: "test record".to_string(),
            sequence: validate("ACGT").unwrap(),
        };
        let mut buf = Vec::new();
        write_record_header(&mut buf, &record).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ID: AB000001.1\nDescription: test record\nLength: 4\n\n"
        );
    }

    #[test]
    fn test_code_list() {
        let mut buf = Vec::new();
        write_code_list(&mut buf, crate::genetic_code::GeneticCodes::ncbi().all()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("  1  Standard\n  2  Vertebrate Mitochondrial\n"));
        assert_eq!(text.lines().count(), 27);
    }
}
