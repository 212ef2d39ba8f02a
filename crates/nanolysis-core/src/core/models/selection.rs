use super::bead::BeadRecord;

/// Accumulates beads chosen by one or more selection queries until they are written.
///
/// The buffer is owned by the caller and passed explicitly to every query, so that
/// accumulation across queries (or across snapshots) is visible at the call site.
/// Nothing is deduplicated: selecting the same bead twice stores it twice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionBuffer {
    beads: Vec<BeadRecord>,
}

impl SelectionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bead: BeadRecord) {
        self.beads.push(bead);
    }

    pub fn len(&self) -> usize {
        self.beads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BeadRecord> {
        self.beads.iter()
    }

    pub fn as_slice(&self) -> &[BeadRecord] {
        &self.beads
    }

    /// Drops every accumulated bead.
    pub fn clear(&mut self) {
        self.beads.clear();
    }
}

impl Extend<BeadRecord> for SelectionBuffer {
    fn extend<T: IntoIterator<Item = BeadRecord>>(&mut self, iter: T) {
        self.beads.extend(iter);
    }
}

impl<'a> IntoIterator for &'a SelectionBuffer {
    type Item = &'a BeadRecord;
    type IntoIter = std::slice::Iter<'a, BeadRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.beads.iter()
    }
}
