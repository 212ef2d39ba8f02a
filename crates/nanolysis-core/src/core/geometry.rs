use super::models::snapshot::Snapshot;
use nalgebra::{Point3, Vector3};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Axis::X => "x",
                Axis::Y => "y",
                Axis::Z => "z",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("Cannot compute a bounding box of an empty snapshot")]
    EmptySnapshot,

    #[error("Range on the {axis} axis is inverted: [{low}, {high}]")]
    InvertedRange { axis: Axis, low: f64, high: f64 },

    #[error("Range on the {axis} axis has a NaN bound")]
    NanBound { axis: Axis },
}

/// A closed interval `[low, high]` on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub low: f64,
    pub high: f64,
}

impl AxisRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// A range that admits every finite coordinate.
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Inclusive at both ends.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, axis: Axis) -> Result<(), GeometryError> {
        if self.low.is_nan() || self.high.is_nan() {
            return Err(GeometryError::NanBound { axis });
        }
        if self.low > self.high {
            return Err(GeometryError::InvertedRange {
                axis,
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// An axis-aligned box given by one closed range per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: AxisRange,
    pub y: AxisRange,
    pub z: AxisRange,
}

impl Cell {
    pub fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Checks that every range is ordered and free of NaN bounds.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.x.validate(Axis::X)?;
        self.y.validate(Axis::Y)?;
        self.z.validate(Axis::Z)
    }

    #[inline]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y) && self.z.contains(point.z)
    }
}

/// Global coordinate extents of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Computes the extents of every bead in `snapshot` in a single pass, seeded from
    /// the first bead.
    pub fn compute(snapshot: &Snapshot) -> Result<Self, GeometryError> {
        Self::from_points(snapshot.beads.iter().map(|bead| &bead.position))
            .ok_or(GeometryError::EmptySnapshot)
    }

    /// Returns `None` when `points` is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            min: *first,
            max: *first,
        };
        for p in points {
            for axis in 0..3 {
                if p[axis] < bounds.min[axis] {
                    bounds.min[axis] = p[axis];
                }
                if p[axis] > bounds.max[axis] {
                    bounds.max[axis] = p[axis];
                }
            }
        }
        Some(bounds)
    }

    pub fn lengths(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.as_cell().contains(point)
    }

    pub fn as_cell(&self) -> Cell {
        Cell::new(
            AxisRange::new(self.min.x, self.max.x),
            AxisRange::new(self.min.y, self.max.y),
            AxisRange::new(self.min.z, self.max.z),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::bead::BeadRecord;
    use crate::core::models::snapshot::SnapshotHeader;

    fn snapshot_with(points: &[(f64, f64, f64)]) -> Snapshot {
        Snapshot {
            header: SnapshotHeader::default(),
            timestep: 0,
            box_lengths: None,
            beads: points
                .iter()
                .enumerate()
                .map(|(i, &(x, y, z))| BeadRecord::new(i as u64 + 1, 1, Point3::new(x, y, z)))
                .collect(),
        }
    }

    mod bounding_box {
        use super::*;

        #[test]
        fn computes_extents_per_axis() {
            let snapshot = snapshot_with(&[(0.0, 0.0, 0.0), (5.0, -3.0, 2.0), (1.0, 1.0, 10.0)]);
            let bounds = BoundingBox::compute(&snapshot).unwrap();
            assert_eq!(bounds.min, Point3::new(0.0, -3.0, 0.0));
            assert_eq!(bounds.max, Point3::new(5.0, 1.0, 10.0));
            assert_eq!(bounds.lengths(), Vector3::new(5.0, 4.0, 10.0));
        }

        #[test]
        fn single_bead_is_a_degenerate_box() {
            let snapshot = snapshot_with(&[(1.0, 2.0, 3.0)]);
            let bounds = BoundingBox::compute(&snapshot).unwrap();
            assert_eq!(bounds.min, bounds.max);
            assert!(bounds.contains(&Point3::new(1.0, 2.0, 3.0)));
        }

        #[test]
        fn empty_snapshot_is_rejected() {
            let snapshot = snapshot_with(&[]);
            assert_eq!(
                BoundingBox::compute(&snapshot),
                Err(GeometryError::EmptySnapshot)
            );
        }
    }

    mod cell {
        use super::*;

        #[test]
        fn bounds_are_inclusive() {
            let cell = Cell::new(
                AxisRange::new(0.0, 1.0),
                AxisRange::new(0.0, 1.0),
                AxisRange::new(0.0, 1.0),
            );
            assert!(cell.contains(&Point3::new(0.0, 1.0, 0.5)));
            assert!(!cell.contains(&Point3::new(1.0 + 1e-12, 0.5, 0.5)));
        }

        #[test]
        fn validate_rejects_inverted_and_nan_ranges() {
            let good = AxisRange::new(-1.0, 1.0);
            let inverted = Cell::new(good, AxisRange::new(2.0, 1.0), good);
            assert_eq!(
                inverted.validate(),
                Err(GeometryError::InvertedRange {
                    axis: Axis::Y,
                    low: 2.0,
                    high: 1.0
                })
            );

            let nan = Cell::new(good, good, AxisRange::new(f64::NAN, 1.0));
            assert_eq!(nan.validate(), Err(GeometryError::NanBound { axis: Axis::Z }));

            assert!(Cell::new(good, good, good).validate().is_ok());
            let unbounded = AxisRange::unbounded();
            assert!(Cell::new(unbounded, unbounded, unbounded).validate().is_ok());
        }
    }
}
