//! Shape catalog - rotation classes and their bounding boxes
//!
//! Every piece orientation is its own class with a 4x4 grid and the id of the
//! class it turns into. Following `next` from any class walks a cycle of length
//! 1, 2 or 4 back to where it started.
//!
//! The tight bounding box of each class is computed once when the catalog is
//! built. [`init`] installs the process-wide catalog; everything that needs
//! shapes afterwards borrows it read-only.

use std::sync::OnceLock;

use thiserror::Error;

use crate::rng::SimpleRng;
use crate::types::{Area, Cell, Point, ShapeId, COL, SHAPE_SIZE};

/// Local occupancy grid of a shape, indexed `[row][col]`.
pub type ShapeGrid = [[Cell; SHAPE_SIZE]; SHAPE_SIZE];

/// `(id, next, grid)` for every rotation class.
pub const SHAPE_TABLE: [(u8, u8, ShapeGrid); 54] = [
    // single cell
    (0, 0, [
        [0, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    // two cells
    (1, 2, [
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (2, 1, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (3, 4, [
        [0, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (4, 3, [
        [0, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    // three cells
    (5, 6, [
        [0, 0, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (6, 5, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (7, 8, [
        [0, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (8, 9, [
        [0, 1, 0, 0],
        [1, 0, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (9, 10, [
        [0, 1, 0, 0],
        [1, 0, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (10, 7, [
        [0, 0, 0, 0],
        [1, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (11, 12, [
        [0, 1, 0, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (12, 13, [
        [0, 0, 1, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (13, 14, [
        [0, 1, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (14, 11, [
        [0, 1, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    // four cells
    (15, 16, [
        [0, 0, 0, 0],
        [1, 1, 1, 1],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (16, 15, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
    ]),
    (17, 18, [
        [0, 1, 1, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (18, 19, [
        [1, 0, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (19, 20, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (20, 17, [
        [0, 0, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
    ]),
    (21, 22, [
        [0, 1, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
    ]),
    (22, 23, [
        [0, 0, 0, 0],
        [0, 1, 1, 1],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (23, 24, [
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 1],
        [0, 0, 0, 0],
    ]),
    (24, 21, [
        [0, 0, 0, 1],
        [0, 1, 1, 1],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (25, 26, [
        [1, 1, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (26, 27, [
        [0, 1, 0, 0],
        [0, 1, 1, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (27, 28, [
        [0, 1, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (28, 25, [
        [0, 1, 0, 0],
        [1, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (29, 30, [
        [0, 1, 1, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (30, 29, [
        [1, 0, 0, 0],
        [1, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (31, 32, [
        [1, 1, 0, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (32, 31, [
        [0, 1, 0, 0],
        [1, 1, 0, 0],
        [1, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    // split pieces
    (33, 34, [
        [0, 0, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 1, 1],
        [0, 0, 0, 0],
    ]),
    (34, 33, [
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
    ]),
    (35, 36, [
        [0, 0, 0, 0],
        [0, 0, 1, 1],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (36, 35, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 0],
    ]),
    (37, 38, [
        [0, 0, 0, 0],
        [1, 1, 1, 0],
        [0, 0, 0, 1],
        [0, 0, 0, 0],
    ]),
    (38, 39, [
        [0, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
    ]),
    (39, 40, [
        [0, 0, 0, 0],
        [1, 0, 0, 0],
        [0, 1, 1, 1],
        [0, 0, 0, 0],
    ]),
    (40, 37, [
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 1, 0, 0],
    ]),
    (41, 42, [
        [0, 0, 0, 0],
        [0, 1, 1, 1],
        [1, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (42, 43, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 1, 0],
    ]),
    (43, 44, [
        [0, 0, 0, 0],
        [0, 0, 0, 1],
        [1, 1, 1, 0],
        [0, 0, 0, 0],
    ]),
    (44, 41, [
        [0, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 0],
        [0, 0, 1, 0],
    ]),
    // bent three-cell pieces
    (45, 46, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [1, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (46, 47, [
        [0, 0, 0, 0],
        [1, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
    ]),
    (47, 48, [
        [0, 0, 1, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (48, 45, [
        [1, 0, 0, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (49, 50, [
        [1, 0, 0, 0],
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 0, 0],
    ]),
    (50, 51, [
        [0, 0, 0, 0],
        [0, 1, 1, 0],
        [1, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    (51, 52, [
        [0, 1, 0, 0],
        [0, 1, 0, 0],
        [0, 0, 1, 0],
        [0, 0, 0, 0],
    ]),
    (52, 49, [
        [0, 0, 1, 0],
        [1, 1, 0, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
    // square
    (53, 53, [
        [0, 1, 1, 0],
        [0, 1, 1, 0],
        [0, 0, 0, 0],
        [0, 0, 0, 0],
    ]),
];

/// Catalog construction failures. Any of these is fatal at startup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("shape table entry {index} declares id {id}")]
    IdMismatch { index: usize, id: u8 },
    #[error("shape {id} has no filled cells")]
    EmptyShape { id: u8 },
    #[error("shape {id} rotates into unknown shape {next}")]
    MissingSuccessor { id: u8, next: u8 },
    #[error("rotating shape {id} never returns to it")]
    OpenRotation { id: u8 },
}

/// One rotation class with its cached bounding box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    id: ShapeId,
    next: ShapeId,
    grid: ShapeGrid,
    bounds: Area,
}

impl Shape {
    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// The class this one turns into.
    pub fn next(&self) -> ShapeId {
        self.next
    }

    pub fn grid(&self) -> &ShapeGrid {
        &self.grid
    }

    /// Tight bounding box of the filled cells, in local grid coordinates.
    pub fn bounds(&self) -> Area {
        self.bounds
    }

    /// Bounding box translated to board coordinates for a placement.
    pub fn area(&self, origin: Point) -> Area {
        self.bounds.translate(origin.col, origin.row)
    }

    /// Cell value at local `(col, row)`; 0 outside the grid.
    pub fn cell(&self, col: i32, row: i32) -> Cell {
        if col < 0 || row < 0 || col >= SHAPE_SIZE as i32 || row >= SHAPE_SIZE as i32 {
            return 0;
        }
        self.grid[row as usize][col as usize]
    }

    /// Filled cells as local `(col, row, value)`, visiting only the bounding box.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        let b = self.bounds;
        (b.min_row..=b.max_row).flat_map(move |row| {
            (b.min_col..=b.max_col).filter_map(move |col| {
                let value = self.cell(col, row);
                (value > 0).then_some((col, row, value))
            })
        })
    }

    pub fn cell_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Spawn origin: bounding box centered horizontally, top filled row on
    /// board row 0. The origin row is negative when the grid's top rows are
    /// empty.
    pub fn spawn_point(&self) -> Point {
        let col = (COL as i32 - self.bounds.width()) / 2 - self.bounds.min_col;
        Point::at(col, -self.bounds.min_row)
    }
}

/// Tight box around the filled cells of a grid, `None` when it is empty.
fn compute_bounds(grid: &ShapeGrid) -> Option<Area> {
    let mut bounds: Option<Area> = None;
    for (row, cells) in grid.iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let (col, row) = (col as i32, row as i32);
            bounds = Some(match bounds {
                None => Area::new(col, row, col, row),
                Some(b) => Area::new(
                    b.min_col.min(col),
                    b.min_row.min(row),
                    b.max_col.max(col),
                    b.max_row.max(row),
                ),
            });
        }
    }
    bounds
}

/// Immutable registry of every rotation class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeCatalog {
    shapes: Vec<Shape>,
}

impl ShapeCatalog {
    /// Build the catalog from the built-in table.
    pub fn new() -> Result<Self, CatalogError> {
        Self::from_table(&SHAPE_TABLE)
    }

    /// Build and validate a catalog from an arbitrary table.
    pub fn from_table(table: &[(u8, u8, ShapeGrid)]) -> Result<Self, CatalogError> {
        let mut shapes = Vec::with_capacity(table.len());
        for (index, &(id, next, grid)) in table.iter().enumerate() {
            if id as usize != index {
                return Err(CatalogError::IdMismatch { index, id });
            }
            if next as usize >= table.len() {
                return Err(CatalogError::MissingSuccessor { id, next });
            }
            let bounds = compute_bounds(&grid).ok_or(CatalogError::EmptyShape { id })?;
            shapes.push(Shape {
                id: ShapeId(id),
                next: ShapeId(next),
                grid,
                bounds,
            });
        }

        let catalog = Self { shapes };
        for shape in &catalog.shapes {
            if catalog.cycle_len(shape.id).is_none() {
                return Err(CatalogError::OpenRotation { id: shape.id.0 });
            }
        }
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.index())
    }

    /// Shape for an id handed out by this catalog.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this catalog.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.index()]
    }

    pub fn bounds(&self, id: ShapeId) -> Area {
        self.shape(id).bounds
    }

    pub fn area(&self, id: ShapeId, origin: Point) -> Area {
        self.shape(id).area(origin)
    }

    pub fn rotated(&self, id: ShapeId) -> ShapeId {
        self.shape(id).next
    }

    /// Number of rotations that bring `id` back to itself.
    pub fn rotation_cycle_len(&self, id: ShapeId) -> usize {
        self.cycle_len(id).unwrap_or(0)
    }

    fn cycle_len(&self, start: ShapeId) -> Option<usize> {
        let mut id = start;
        for steps in 1..=self.shapes.len() {
            id = self.shapes.get(id.index())?.next;
            if id == start {
                return Some(steps);
            }
        }
        None
    }

    /// Uniformly random class for spawning.
    pub fn random(&self, rng: &mut SimpleRng) -> ShapeId {
        ShapeId(rng.next_range(self.shapes.len() as u32) as u8)
    }
}

static CATALOG: OnceLock<ShapeCatalog> = OnceLock::new();

/// Build the process-wide catalog once. Later calls return the same instance.
pub fn init() -> Result<&'static ShapeCatalog, CatalogError> {
    if let Some(catalog) = CATALOG.get() {
        return Ok(catalog);
    }
    let built = ShapeCatalog::new()?;
    Ok(CATALOG.get_or_init(|| built))
}

/// The installed catalog.
///
/// # Panics
///
/// Panics if [`init`] has not run. Using shapes before the bounding-box cache
/// exists is a startup bug, not a runtime condition.
pub fn get() -> &'static ShapeCatalog {
    match CATALOG.get() {
        Some(catalog) => catalog,
        None => panic!("shape catalog used before catalog::init()"),
    }
}

/// Cached bounding box of a class in the installed catalog.
pub fn bounds(id: ShapeId) -> Area {
    get().bounds(id)
}
