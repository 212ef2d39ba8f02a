use super::traits::FormatReader;
use super::{FormatError, ParseErrorKind, RowPolicy};
use crate::core::models::chain::{ChainIndex, ChainIndexBuilder};
use std::io::BufRead;

/// Number of tab-separated fields in a structural row of the origin file.
pub const ORIGIN_FIELD_COUNT: usize = 8;

/// Reader for the tab-separated origin file.
///
/// The first line is a header and is discarded. Every row with exactly
/// [`ORIGIN_FIELD_COUNT`] fields contributes one bead: field 0 is the global bead id,
/// field 1 the chain it belongs to. The remaining fields are not interpreted.
pub struct OriginFile;

impl FormatReader for OriginFile {
    type Output = ChainIndex;
    type Options = RowPolicy;
    type Error = FormatError;

    fn read_from(
        reader: &mut impl BufRead,
        policy: &Self::Options,
    ) -> Result<Self::Output, Self::Error> {
        let mut records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut builder = ChainIndexBuilder::new();
        for result in records.records() {
            let record = result?;
            let line = record.position().map_or(0, |p| p.line() as usize);
            // The header is the first physical line, blank or not.
            if line <= 1 {
                continue;
            }

            let fields = trimmed_fields(&record);
            if fields.len() != ORIGIN_FIELD_COUNT {
                if policy.is_strict() && !fields.is_empty() {
                    return Err(FormatError::parse(
                        line,
                        ParseErrorKind::FieldCount {
                            expected: ORIGIN_FIELD_COUNT,
                            found: fields.len(),
                        },
                    ));
                }
                continue;
            }

            let bead = parse_id(fields[0], "bead id", line)?;
            let chain = parse_id(fields[1], "chain id", line)?;
            builder.push(bead, chain);
        }
        Ok(builder.build())
    }
}

/// Fields of a row with empty leading and trailing fields removed, so a row counts the
/// same as its whitespace-stripped line split on tabs.
fn trimmed_fields(record: &csv::StringRecord) -> Vec<&str> {
    let fields: Vec<&str> = record.iter().collect();
    let start = fields
        .iter()
        .position(|f| !f.is_empty())
        .unwrap_or(fields.len());
    let end = fields
        .iter()
        .rposition(|f| !f.is_empty())
        .map_or(start, |last| last + 1);
    fields[start..end].to_vec()
}

fn parse_id(value: &str, field: &'static str, line: usize) -> Result<u64, FormatError> {
    value.parse().map_err(|_| {
        FormatError::parse(
            line,
            ParseErrorKind::InvalidInt {
                field,
                value: value.to_string(),
            },
        )
    })
}
