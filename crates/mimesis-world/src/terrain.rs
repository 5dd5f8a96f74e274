//! The terrain grid and its procedural generator.
//!
//! The grid is a fixed-size rectangle of [`Terrain`] tiles stored row-major.
//! Generation paints a grass field, scatters water and forest blobs around
//! random centres, then draws a handful of straight wall segments. After
//! generation the only mutation is the Build action turning a tile to wall.
//!
//! Out-of-bounds reads return [`Terrain::Wall`], so callers can treat the
//! map edge exactly like an obstacle without a separate bounds check.

use mimesis_types::{MapView, Position, Terrain};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

use crate::error::WorldError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of water regions painted.
const WATER_REGIONS: u32 = 3;

/// Inclusive size range of a water region.
const WATER_SIZE: (u32, u32) = (20, 50);

/// Number of forest regions painted.
const FOREST_REGIONS: u32 = 6;

/// Inclusive size range of a forest region.
const FOREST_SIZE: (u32, u32) = (10, 30);

/// Scatter points per unit of region size.
const SCATTER_PER_SIZE: u32 = 4;

/// Number of straight wall segments drawn.
const WALL_SEGMENTS: u32 = 5;

/// Inclusive length range of a wall segment.
const WALL_LENGTH: (i32, i32) = (5, 15);

/// Unit steps a wall segment may follow on each axis.
const DIRECTIONS: [i32; 3] = [-1, 0, 1];

// ---------------------------------------------------------------------------
// TerrainGrid
// ---------------------------------------------------------------------------

/// A rectangular grid of terrain tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
}

impl TerrainGrid {
    /// Create a grid where every tile is `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] if either dimension is zero
    /// or too large to address.
    pub fn filled(width: u32, height: u32, fill: Terrain) -> Result<Self, WorldError> {
        let invalid = WorldError::InvalidDimensions { width, height };
        if width == 0 || height == 0 {
            return Err(invalid);
        }
        let (Ok(w), Ok(h)) = (i32::try_from(width), i32::try_from(height)) else {
            return Err(invalid);
        };
        let cell_count = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h))
            .ok_or(invalid)?;

        Ok(Self {
            width: w,
            height: h,
            cells: vec![fill; cell_count],
        })
    }

    /// Procedurally generate a grid with water, forest, and wall features.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimensions`] for a degenerate size.
    pub fn generate(width: u32, height: u32, rng: &mut impl Rng) -> Result<Self, WorldError> {
        let mut grid = Self::filled(width, height, Terrain::Grass)?;
        grid.grow_regions(Terrain::Water, WATER_REGIONS, WATER_SIZE, rng);
        grid.grow_regions(Terrain::Forest, FOREST_REGIONS, FOREST_SIZE, rng);
        grid.draw_walls(rng);

        debug!(
            width,
            height,
            water = grid.count(Terrain::Water),
            forest = grid.count(Terrain::Forest),
            wall = grid.count(Terrain::Wall),
            "terrain generated"
        );
        Ok(grid)
    }

    /// Grid width in tiles.
    pub const fn width(&self) -> u32 {
        self.width.unsigned_abs()
    }

    /// Grid height in tiles.
    pub const fn height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Whether `pos` lies inside the grid.
    pub const fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// The tile at `pos`, or [`Terrain::Wall`] outside the grid.
    pub fn get(&self, pos: Position) -> Terrain {
        self.index(pos)
            .and_then(|i| self.cells.get(i))
            .copied()
            .unwrap_or(Terrain::Wall)
    }

    /// Overwrite the tile at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] if `pos` is outside the grid.
    pub fn set(&mut self, pos: Position, terrain: Terrain) -> Result<(), WorldError> {
        let cell = self
            .index(pos)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(WorldError::OutOfBounds { x: pos.x, y: pos.y })?;
        *cell = terrain;
        Ok(())
    }

    /// Whether an agent could stand on `pos`, ignoring other agents.
    pub fn is_passable(&self, pos: Position) -> bool {
        self.get(pos).is_walkable()
    }

    /// Whether `pos` or one of its four orthogonal neighbours is `terrain`.
    pub fn is_on_or_adjacent(&self, pos: Position, terrain: Terrain) -> bool {
        [(0, 0), (1, 0), (-1, 0), (0, 1), (0, -1)]
            .into_iter()
            .any(|(dx, dy)| {
                let p = pos.offset(dx, dy);
                self.in_bounds(p) && self.get(p) == terrain
            })
    }

    /// Number of tiles of the given kind.
    pub fn count(&self, terrain: Terrain) -> usize {
        self.cells.iter().filter(|&&t| t == terrain).count()
    }

    /// A uniformly random in-bounds position.
    pub fn random_position(&self, rng: &mut impl Rng) -> Position {
        Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        )
    }

    /// The grid as rows, indexed `rows[y][x]`.
    pub fn rows(&self) -> Vec<Vec<Terrain>> {
        let row_len = usize::try_from(self.width()).unwrap_or(1).max(1);
        self.cells.chunks(row_len).map(<[Terrain]>::to_vec).collect()
    }

    /// Build the serializable map snapshot.
    pub fn to_view(&self) -> MapView {
        MapView {
            width: self.width(),
            height: self.height(),
            grid: self.rows(),
        }
    }

    // -----------------------------------------------------------------------
    // Generation helpers
    // -----------------------------------------------------------------------

    fn grow_regions(
        &mut self,
        terrain: Terrain,
        count: u32,
        (min_size, max_size): (u32, u32),
        rng: &mut impl Rng,
    ) {
        for _ in 0..count {
            let centre = self.random_position(rng);
            let size = rng.random_range(min_size..=max_size);
            let spread = f64::from(size).sqrt() as i32;
            for _ in 0..size.saturating_mul(SCATTER_PER_SIZE) {
                let ox = rng.random_range(-spread..=spread);
                let oy = rng.random_range(-spread..=spread);
                // Points landing off the grid are dropped.
                let _ = self.set(centre.offset(ox, oy), terrain);
            }
        }
    }

    fn draw_walls(&mut self, rng: &mut impl Rng) {
        for _ in 0..WALL_SEGMENTS {
            let start = self.random_position(rng);
            let dx = DIRECTIONS.choose(rng).copied().unwrap_or(0);
            let dy = DIRECTIONS.choose(rng).copied().unwrap_or(0);
            let length = rng.random_range(WALL_LENGTH.0..=WALL_LENGTH.1);
            for i in 0..length {
                let step = start.offset(dx.saturating_mul(i), dy.saturating_mul(i));
                let _ = self.set(step, Terrain::Wall);
            }
        }
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        let w = usize::try_from(self.width).ok()?;
        y.checked_mul(w)?.checked_add(x)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn zero_dimension_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            TerrainGrid::generate(0, 10, &mut rng),
            Err(WorldError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(TerrainGrid::filled(10, 0, Terrain::Grass).is_err());
    }

    #[test]
    fn generated_grid_has_requested_shape_and_grass() {
        let mut rng = StdRng::seed_from_u64(42);
        let Ok(grid) = TerrainGrid::generate(20, 20, &mut rng) else {
            panic!("generation failed");
        };
        let rows = grid.rows();
        assert_eq!(rows.len(), 20);
        assert!(rows.iter().all(|r| r.len() == 20));
        assert!(grid.count(Terrain::Grass) > 0);
    }

    #[test]
    fn same_seed_yields_same_map() {
        let a = TerrainGrid::generate(32, 24, &mut StdRng::seed_from_u64(9));
        let b = TerrainGrid::generate(32, 24, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.ok(), b.ok());
    }

    #[test]
    fn outside_reads_as_wall() {
        let Ok(grid) = TerrainGrid::filled(4, 4, Terrain::Grass) else {
            panic!("grid");
        };
        assert_eq!(grid.get(Position::new(-1, 0)), Terrain::Wall);
        assert_eq!(grid.get(Position::new(0, 4)), Terrain::Wall);
        assert!(!grid.is_passable(Position::new(4, 4)));
        assert!(grid.is_passable(Position::new(3, 3)));
    }

    #[test]
    fn set_changes_one_tile_and_rejects_outside() {
        let Ok(mut grid) = TerrainGrid::filled(4, 3, Terrain::Grass) else {
            panic!("grid");
        };
        assert!(grid.set(Position::new(2, 1), Terrain::Wall).is_ok());
        assert_eq!(grid.get(Position::new(2, 1)), Terrain::Wall);
        assert_eq!(grid.count(Terrain::Wall), 1);
        assert_eq!(grid.rows().get(1).and_then(|r| r.get(2)), Some(&Terrain::Wall));
        assert!(grid.set(Position::new(4, 0), Terrain::Wall).is_err());
    }

    #[test]
    fn adjacency_is_orthogonal_only() {
        let Ok(mut grid) = TerrainGrid::filled(5, 5, Terrain::Grass) else {
            panic!("grid");
        };
        let _ = grid.set(Position::new(2, 1), Terrain::Wall);
        assert!(grid.is_on_or_adjacent(Position::new(2, 2), Terrain::Wall));
        assert!(grid.is_on_or_adjacent(Position::new(2, 1), Terrain::Wall));
        assert!(!grid.is_on_or_adjacent(Position::new(3, 2), Terrain::Wall));
        assert!(!grid.is_on_or_adjacent(Position::new(4, 4), Terrain::Wall));
    }

    #[test]
    fn map_view_matches_grid() {
        let Ok(grid) = TerrainGrid::filled(10, 10, Terrain::Forest) else {
            panic!("grid");
        };
        let view = grid.to_view();
        assert_eq!(view.width, 10);
        assert_eq!(view.height, 10);
        assert_eq!(view.grid.len(), 10);
    }
}
