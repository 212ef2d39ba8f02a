use super::bead::BeadRecord;
use nalgebra::Vector3;

/// The fixed-size header that precedes the bead rows of a dump file.
///
/// Lines are kept tokenized and verbatim so that a reduced file can reproduce them
/// exactly. Only a few positions carry meaning:
///
/// - line [`Self::TIMESTEP_LINE`], token 0: the timestep;
/// - line [`Self::ATOM_COUNT_LINE`]: the atom count, rewritten on output;
/// - lines [`Self::BOX_LINES`], token 1: per-axis box length (scaled mode only).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotHeader {
    lines: Vec<Vec<String>>,
}

impl SnapshotHeader {
    pub const LINE_COUNT: usize = 9;
    pub const TIMESTEP_LINE: usize = 1;
    pub const ATOM_COUNT_LINE: usize = 3;
    pub const BOX_LINES: [usize; 3] = [5, 6, 7];

    pub fn new(lines: Vec<Vec<String>>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Vec<String>] {
        &self.lines
    }

    /// Returns the token at `(line, index)`, if present.
    pub fn token(&self, line: usize, index: usize) -> Option<&str> {
        self.lines
            .get(line)
            .and_then(|tokens| tokens.get(index))
            .map(String::as_str)
    }

    /// Renders the header as it should appear above `atom_count` bead rows.
    ///
    /// Every line is space-joined; the atom count line is replaced wholesale.
    pub fn render(&self, atom_count: usize) -> impl Iterator<Item = String> + '_ {
        self.lines.iter().enumerate().map(move |(idx, tokens)| {
            if idx == Self::ATOM_COUNT_LINE {
                atom_count.to_string()
            } else {
                tokens.join(" ")
            }
        })
    }
}

/// All bead positions and metadata at one simulation timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub header: SnapshotHeader,
    pub timestep: u64,
    /// Per-axis box lengths; only read when coordinates are rescaled.
    pub box_lengths: Option<Vector3<f64>>,
    pub beads: Vec<BeadRecord>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }
}
