//! Spatial indexing for position-to-cell lookups
//!
//! This module is only available with the `spatial-index` feature.

#[cfg(feature = "spatial-index")]
use glam::DVec3;
#[cfg(feature = "spatial-index")]
use kiddo::immutable::float::kdtree::ImmutableKdTree;
#[cfg(feature = "spatial-index")]
use kiddo::SquaredEuclidean;

/// KD-tree over the real generators
///
/// A position belongs to the Voronoi cell of its nearest generator, so a
/// nearest-neighbor query answers "which cell is this in" without touching
/// any cell geometry. Virtual scaffold points are not indexed.
#[cfg(feature = "spatial-index")]
#[derive(Clone)]
pub struct SpatialIndex {
    tree: Option<ImmutableKdTree<f64, usize, 3, 32>>,
    len: usize,
}

#[cfg(feature = "spatial-index")]
impl SpatialIndex {
    /// Build spatial index from generator positions
    ///
    /// # Example
    ///
    /// ```
    /// use rust_voronoi_cells::*;
    /// use glam::DVec3;
    ///
    /// # #[cfg(feature = "spatial-index")]
    /// # {
    /// let generators = vec![
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(0.0, 1.0, 0.0),
    ///     DVec3::new(0.0, 0.0, 1.0),
    /// ];
    ///
    /// let index = SpatialIndex::new(&generators);
    /// assert_eq!(index.find_nearest(DVec3::new(1.0, 0.1, 0.0)), Some(0));
    /// # }
    /// ```
    pub fn new(generators: &[DVec3]) -> Self {
        let points: Vec<[f64; 3]> = generators.iter().map(|c| c.to_array()).collect();

        Self {
            tree: (!points.is_empty()).then(|| ImmutableKdTree::new_from_slice(&points)),
            len: generators.len(),
        }
    }

    /// Number of indexed generators
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the generator nearest to `position`
    ///
    /// Returns `None` when no generators were indexed.
    pub fn find_nearest(&self, position: DVec3) -> Option<usize> {
        let tree = self.tree.as_ref()?;
        let result = tree.nearest_one::<SquaredEuclidean>(&position.to_array());
        Some(result.item)
    }
}

#[cfg(test)]
#[cfg(feature = "spatial-index")]
mod tests {
    use super::*;

    #[test]
    fn test_spatial_index_basic() {
        let generators = vec![
            DVec3::new(5.0, 0.0, 0.0),
            DVec3::new(0.0, 5.0, 0.0),
            DVec3::new(0.0, 0.0, 5.0),
            DVec3::new(-5.0, 0.0, 0.0),
        ];

        let index = SpatialIndex::new(&generators);
        assert_eq!(index.len(), 4);

        assert_eq!(index.find_nearest(DVec3::new(4.5, 0.5, 0.0)), Some(0));
        assert_eq!(index.find_nearest(DVec3::new(0.0, 4.75, 0.0)), Some(1));
        assert_eq!(index.find_nearest(DVec3::new(0.0, 0.5, 4.5)), Some(2));
        assert_eq!(index.find_nearest(DVec3::new(-4.0, 0.0, 0.0)), Some(3));
    }

    #[test]
    fn test_spatial_index_exact_match() {
        let generators = vec![DVec3::new(10.0, 0.0, 0.0), DVec3::new(0.0, 10.0, 0.0)];

        let index = SpatialIndex::new(&generators);

        assert_eq!(index.find_nearest(generators[0]), Some(0));
        assert_eq!(index.find_nearest(generators[1]), Some(1));
    }

    #[test]
    fn test_spatial_index_empty() {
        let index = SpatialIndex::new(&[]);
        assert!(index.is_empty());
        assert_eq!(index.find_nearest(DVec3::ZERO), None);
    }
}
