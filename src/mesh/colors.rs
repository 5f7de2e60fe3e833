//! Color mapping for cells

use crate::cell::VoronoiCell;

/// RGBA color type
pub type CellColor = [f32; 4];

/// Translucent light blue used for cell surfaces (#88ccff at 30% opacity)
pub const CELL_COLOR: CellColor = [0.533, 0.8, 1.0, 0.3];

/// Red used for generator markers (#ff4444)
pub const MARKER_COLOR: CellColor = [1.0, 0.267, 0.267, 1.0];

/// Faint white used for the bounding sphere
pub const BOUNDARY_COLOR: CellColor = [1.0, 1.0, 1.0, 0.1];

/// Trait for mapping cells to colors
pub trait ColorMapper {
    /// Map a cell to an RGBA color
    fn map_color(&self, cell: &VoronoiCell) -> CellColor;
}

/// Gives every cell the same color
#[derive(Debug, Clone, Copy)]
pub struct UniformColorMapper {
    pub color: CellColor,
}

impl Default for UniformColorMapper {
    fn default() -> Self {
        Self { color: CELL_COLOR }
    }
}

impl ColorMapper for UniformColorMapper {
    fn map_color(&self, _cell: &VoronoiCell) -> CellColor {
        self.color
    }
}

/// Cycles through a palette by generator index
#[derive(Debug, Clone)]
pub struct PaletteColorMapper {
    pub palette: Vec<CellColor>,
}

impl Default for PaletteColorMapper {
    fn default() -> Self {
        Self {
            palette: vec![
                [0.533, 0.8, 1.0, 0.3],
                [1.0, 0.8, 0.4, 0.3],
                [0.6, 0.9, 0.5, 0.3],
                [0.9, 0.5, 0.8, 0.3],
                [0.7, 0.6, 1.0, 0.3],
                [1.0, 0.6, 0.5, 0.3],
            ],
        }
    }
}

impl ColorMapper for PaletteColorMapper {
    fn map_color(&self, cell: &VoronoiCell) -> CellColor {
        if self.palette.is_empty() {
            return CELL_COLOR;
        }
        self.palette[cell.id % self.palette.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn cell(id: usize) -> VoronoiCell {
        VoronoiCell::new(id, DVec3::ZERO, vec![])
    }

    #[test]
    fn test_uniform_mapper() {
        let mapper = UniformColorMapper::default();
        assert_eq!(mapper.map_color(&cell(0)), CELL_COLOR);
        assert_eq!(mapper.map_color(&cell(9)), CELL_COLOR);
    }

    #[test]
    fn test_palette_cycles() {
        let mapper = PaletteColorMapper::default();
        let n = mapper.palette.len();
        assert_eq!(mapper.map_color(&cell(1)), mapper.map_color(&cell(1 + n)));
        assert_ne!(mapper.map_color(&cell(0)), mapper.map_color(&cell(1)));
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mapper = PaletteColorMapper { palette: vec![] };
        assert_eq!(mapper.map_color(&cell(3)), CELL_COLOR);
    }
}
