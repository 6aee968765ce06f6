//! Composite parts.
//!
//! A [`Part`] is a flat list of primitives expressed in the part's own
//! local frame. Parts are immutable once built and can be placed any
//! number of times under other frames.

use nalgebra::{Isometry3, Point3};

use crate::Primitive;

/// A composite part made of primitives in a shared local frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Part {
    primitives: Vec<Primitive>,
}

impl Part {
    /// Creates a part from primitives already in its local frame.
    #[must_use]
    pub fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    /// Returns the primitives of this part.
    #[must_use]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Consumes the part and returns its primitives.
    #[must_use]
    pub fn into_primitives(self) -> Vec<Primitive> {
        self.primitives
    }

    /// Returns the number of primitives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if the part has no primitives.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Returns a copy of this part with every primitive re-expressed under `parent`.
    #[must_use]
    pub fn placed(&self, parent: &Isometry3<f64>) -> Self {
        Self {
            primitives: self.primitives.iter().map(|p| p.placed(parent)).collect(),
        }
    }

    /// Returns the axis-aligned bounds of the primitive centers.
    ///
    /// Returns `None` for an empty part.
    #[must_use]
    pub fn center_bounds(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let mut centers = self.primitives.iter().map(Primitive::center);
        let first = centers.next()?;
        Some(centers.fold((first, first), |(lo, hi), c| (lo.inf(&c), hi.sup(&c))))
    }
}

impl From<Vec<Primitive>> for Part {
    fn from(primitives: Vec<Primitive>) -> Self {
        Self::from_primitives(primitives)
    }
}

impl<'a> IntoIterator for &'a Part {
    type Item = &'a Primitive;
    type IntoIter = std::slice::Iter<'a, Primitive>;

    fn into_iter(self) -> Self::IntoIter {
        self.primitives.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrimitiveKind, palette};
    use nalgebra::Vector3;

    fn unit_box_at(x: f64) -> Primitive {
        Primitive::new(
            PrimitiveKind::Box {
                size: Vector3::repeat(1.0),
            },
            Isometry3::translation(x, 0.0, 0.0),
            palette::GRAY,
        )
    }

    #[test]
    fn empty_part_has_no_bounds() {
        assert!(Part::default().center_bounds().is_none());
        assert!(Part::default().is_empty());
    }

    #[test]
    fn bounds_cover_all_centers() {
        let part = Part::from(vec![unit_box_at(-2.0), unit_box_at(3.0)]);
        let (lo, hi) = part.center_bounds().unwrap();
        assert!((lo.x + 2.0).abs() < 1e-12);
        assert!((hi.x - 3.0).abs() < 1e-12);
        assert_eq!(part.len(), 2);
    }

    #[test]
    fn placed_moves_every_primitive() {
        let part = Part::from(vec![unit_box_at(0.0), unit_box_at(1.0)]);
        let moved = part.placed(&Isometry3::translation(0.0, 0.0, 4.0));
        assert!(moved.primitives().iter().all(|p| (p.center().z - 4.0).abs() < 1e-12));
    }
}
