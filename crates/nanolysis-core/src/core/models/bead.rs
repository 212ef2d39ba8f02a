use nalgebra::Point3;

/// Global bead identifier as it appears in the first column of a dump row.
pub type BeadId = u64;

/// Bead type as it appears in the second column of a dump row.
pub type BeadType = u32;

/// A single bead of one snapshot.
///
/// Records are produced by the dump reader and are never mutated afterwards; the
/// selection buffer stores copies of them.
#[derive(Debug, Clone, PartialEq)]
pub struct BeadRecord {
    /// The global identifier of the bead, unique within a snapshot.
    pub id: BeadId,
    /// The bead type.
    pub bead_type: BeadType,
    /// Position, already rescaled by the box lengths when reading in scaled mode.
    pub position: Point3<f64>,
}

impl BeadRecord {
    pub fn new(id: BeadId, bead_type: BeadType, position: Point3<f64>) -> Self {
        Self {
            id,
            bead_type,
            position,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.position.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.position.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.position.z
    }
}
