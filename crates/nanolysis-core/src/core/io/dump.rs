use super::traits::FormatReader;
use super::{CoordinateMode, FormatError, ParseErrorKind, RowPolicy, Tokenizer};
use crate::core::models::bead::BeadRecord;
use crate::core::models::snapshot::{Snapshot, SnapshotHeader};
use nalgebra::{Point3, Vector3};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Number of tokens in a bead row: `id type x y z`.
pub const BEAD_ROW_TOKENS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpReadOptions {
    pub coordinate_mode: CoordinateMode,
    pub row_policy: RowPolicy,
    pub tokenizer: Tokenizer,
}

/// Reader and writer for per-timestep dump files.
///
/// A dump starts with a fixed header of [`SnapshotHeader::LINE_COUNT`] lines. Every
/// following line with exactly [`BEAD_ROW_TOKENS`] tokens is a bead row.
pub struct DumpFile;

impl FormatReader for DumpFile {
    type Output = Snapshot;
    type Options = DumpReadOptions;
    type Error = FormatError;

    fn read_from(
        reader: &mut impl BufRead,
        options: &Self::Options,
    ) -> Result<Self::Output, Self::Error> {
        let tokenizer = options.tokenizer;
        let strict = options.row_policy.is_strict();
        let mut lines = reader.lines();

        let header = take_header(&mut lines, tokenizer)?;
        let timestep = header_timestep(&header)?;
        let box_lengths = match options.coordinate_mode {
            CoordinateMode::Raw => None,
            CoordinateMode::ScaledByBox => Some(read_box_lengths(&header)?),
        };
        let scale = box_lengths.unwrap_or_else(|| Vector3::new(1.0, 1.0, 1.0));

        let mut beads = Vec::new();
        let mut seen = HashSet::new();
        for (offset, line) in lines.enumerate() {
            let line = line?;
            let line_num = SnapshotHeader::LINE_COUNT + offset + 1;
            let tokens = tokenizer.split(&line);

            if tokens.len() != BEAD_ROW_TOKENS {
                let blank = tokens.iter().all(|t| t.is_empty());
                if strict && !blank {
                    return Err(FormatError::parse(
                        line_num,
                        ParseErrorKind::FieldCount {
                            expected: BEAD_ROW_TOKENS,
                            found: tokens.len(),
                        },
                    ));
                }
                continue;
            }

            let bead = parse_bead_row(&tokens, &scale, line_num)?;
            if strict && !seen.insert(bead.id) {
                return Err(FormatError::DuplicateBead(bead.id));
            }
            beads.push(bead);
        }

        if strict {
            let declared: usize =
                header_int(&header, SnapshotHeader::ATOM_COUNT_LINE, 0, "atom count")?;
            if declared != beads.len() {
                return Err(FormatError::AtomCountMismatch {
                    declared,
                    found: beads.len(),
                });
            }
        }

        Ok(Snapshot {
            header,
            timestep,
            box_lengths,
            beads,
        })
    }
}

impl DumpFile {
    /// Reads only the header of a dump and returns it with its timestep. Bead rows are
    /// not touched.
    pub fn read_header(
        reader: &mut impl BufRead,
        tokenizer: Tokenizer,
    ) -> Result<(SnapshotHeader, u64), FormatError> {
        let header = take_header(&mut reader.lines(), tokenizer)?;
        let timestep = header_timestep(&header)?;
        Ok((header, timestep))
    }

    pub fn read_header_from_path<P: AsRef<Path>>(
        path: P,
        tokenizer: Tokenizer,
    ) -> Result<(SnapshotHeader, u64), FormatError> {
        let mut reader = BufReader::new(File::open(path)?);
        Self::read_header(&mut reader, tokenizer)
    }

    /// Writes `header` followed by one row per bead.
    ///
    /// The atom count line of the header is replaced by `beads.len()`, and beads are
    /// renumbered from 1 in the first column; type and coordinates follow unchanged.
    pub fn write_to(
        header: &SnapshotHeader,
        beads: &[BeadRecord],
        writer: &mut impl Write,
    ) -> Result<(), FormatError> {
        for line in header.render(beads.len()) {
            writeln!(writer, "{}", line)?;
        }
        for (serial, bead) in (1usize..).zip(beads) {
            writeln!(
                writer,
                "{} {} {} {} {}",
                serial,
                bead.bead_type,
                format_real(bead.x()),
                format_real(bead.y()),
                format_real(bead.z())
            )?;
        }
        Ok(())
    }

    /// Creates (or truncates) `path` and writes a reduced snapshot into it.
    pub fn write_to_path<P: AsRef<Path>>(
        header: &SnapshotHeader,
        beads: &[BeadRecord],
        path: P,
    ) -> Result<(), FormatError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(header, beads, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn take_header(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    tokenizer: Tokenizer,
) -> Result<SnapshotHeader, FormatError> {
    let mut header_lines = Vec::with_capacity(SnapshotHeader::LINE_COUNT);
    for line in lines.take(SnapshotHeader::LINE_COUNT) {
        let line = line?;
        header_lines.push(
            tokenizer
                .split(&line)
                .into_iter()
                .map(str::to_string)
                .collect::<Vec<_>>(),
        );
    }
    if header_lines.len() < SnapshotHeader::LINE_COUNT {
        return Err(FormatError::TruncatedHeader {
            expected: SnapshotHeader::LINE_COUNT,
            found: header_lines.len(),
        });
    }
    Ok(SnapshotHeader::new(header_lines))
}

fn header_timestep(header: &SnapshotHeader) -> Result<u64, FormatError> {
    header_int(header, SnapshotHeader::TIMESTEP_LINE, 0, "timestep")
}

/// Shortest round-trip representation that always carries a decimal point or exponent.
fn format_real(value: f64) -> String {
    format!("{:?}", value)
}

fn header_int<T: std::str::FromStr>(
    header: &SnapshotHeader,
    line: usize,
    index: usize,
    field: &'static str,
) -> Result<T, FormatError> {
    let token = header
        .token(line, index)
        .ok_or_else(|| FormatError::parse(line + 1, ParseErrorKind::MissingToken { field }))?;
    token.parse().map_err(|_| {
        FormatError::parse(
            line + 1,
            ParseErrorKind::InvalidInt {
                field,
                value: token.to_string(),
            },
        )
    })
}

fn read_box_lengths(header: &SnapshotHeader) -> Result<Vector3<f64>, FormatError> {
    const FIELDS: [&str; 3] = ["x box length", "y box length", "z box length"];
    let mut lengths = Vector3::zeros();
    for (axis, (&line, field)) in SnapshotHeader::BOX_LINES.iter().zip(FIELDS).enumerate() {
        let token = header
            .token(line, 1)
            .ok_or_else(|| FormatError::parse(line + 1, ParseErrorKind::MissingToken { field }))?;
        lengths[axis] = parse_real(token, field, line + 1)?;
    }
    Ok(lengths)
}

fn parse_bead_row(
    tokens: &[&str],
    scale: &Vector3<f64>,
    line: usize,
) -> Result<BeadRecord, FormatError> {
    let id = tokens[0].parse().map_err(|_| {
        FormatError::parse(
            line,
            ParseErrorKind::InvalidInt {
                field: "id",
                value: tokens[0].to_string(),
            },
        )
    })?;
    let bead_type = tokens[1].parse().map_err(|_| {
        FormatError::parse(
            line,
            ParseErrorKind::InvalidInt {
                field: "type",
                value: tokens[1].to_string(),
            },
        )
    })?;
    let x = parse_real(tokens[2], "x", line)?;
    let y = parse_real(tokens[3], "y", line)?;
    let z = parse_real(tokens[4], "z", line)?;

    Ok(BeadRecord::new(
        id,
        bead_type,
        Point3::new(x * scale.x, y * scale.y, z * scale.z),
    ))
}

fn parse_real(token: &str, field: &'static str, line: usize) -> Result<f64, FormatError> {
    token.parse().map_err(|_| {
        FormatError::parse(
            line,
            ParseErrorKind::InvalidFloat {
                field,
                value: token.to_string(),
            },
        )
    })
}
