use std::fmt;

use itertools::Itertools;
use petgraph::graph::{NodeIndex, UnGraph};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, Cell};
use crate::directions::{Direction, Directions};
use crate::units::{EdgesCount, Height, NodesCount, Width};

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

/// A fixed size rectangular grid of cells, stored as a flat row-major arena.
///
/// The passages between cells are recorded on the cells themselves as sets of open
/// directions, always symmetrically: a passage leading `Right` out of one cell leads `Left`
/// out of its neighbour.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    NoNeighbour,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid :: width: {:?}, height: {:?}, links: {:?}",
               self.width, self.height, self.links_count())
    }
}

impl Grid {
    /// Allocate a `width * height` grid of unvisited cells with no passages.
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: Width, height: Height) -> Grid {
        let (Width(w), Height(h)) = (width, height);
        assert!(w > 0 && h > 0, "grid dimensions must be positive, got {} x {}", w, h);
        assert!(w <= u32::MAX as usize && h <= u32::MAX as usize,
                "grid dimensions {} x {} do not fit cell coordinates", w, h);

        Grid {
            width: w,
            height: h,
            cells: vec![Cell::default(); w * h],
        }
    }

    #[inline]
    pub fn dimensions(&self) -> (Width, Height) {
        (Width(self.width), Height(self.height))
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Vertex and edge counts of a spanning tree over this grid.
    #[inline]
    pub fn spanning_tree_size(&self) -> (NodesCount, EdgesCount) {
        (NodesCount(self.size()), EdgesCount(self.size() - 1))
    }

    /// The fixed starting cell of a maze, the top left corner.
    #[inline]
    pub fn entrance(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(0, 0)
    }

    /// The fixed exit cell of a maze, the bottom right corner.
    #[inline]
    pub fn exit(&self) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(self.width as u32 - 1, self.height as u32 - 1)
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width && (coord.y as usize) < self.height
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// Panics if the coordinate is outside the grid.
    pub fn cell_at(&self, coord: Cartesian2DCoordinate) -> &Cell {
        let index = self.checked_index(coord);
        &self.cells[index]
    }

    pub(crate) fn cell_at_mut(&mut self, coord: Cartesian2DCoordinate) -> &mut Cell {
        let index = self.checked_index(coord);
        &mut self.cells[index]
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: Direction)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .filter(|neighbour_coord| self.is_valid_coordinate(*neighbour_coord))
    }

    /// Cells that are Up, Down, Left or Right of a particular cell, but not
    /// necessarily linked by a passage.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        Direction::ALL.iter()
                      .filter_map(|dir| self.neighbour_at_direction(coord, *dir))
                      .collect()
    }

    /// The directions leading to in-bounds neighbours that have not been visited yet.
    pub fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> Directions {
        Direction::ALL.iter()
                      .filter(|dir| {
                          self.neighbour_at_direction(coord, **dir)
                              .map_or(false, |neighbour| !self.cell_at(neighbour).is_visited())
                      })
                      .fold(Directions::empty(), |acc, dir| acc | dir.bit())
    }

    /// Is there a passage from the cell in the given direction?
    #[inline]
    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: Direction) -> bool {
        self.is_valid_coordinate(coord) && self.cell_at(coord).is_open(direction)
    }

    pub(crate) fn visit(&mut self, coord: Cartesian2DCoordinate) {
        self.cell_at_mut(coord).mark_visited();
    }

    /// Open a passage from a cell to its neighbour in `direction`, recording it on both cells.
    /// Returns the neighbour's coordinate.
    pub(crate) fn link(&mut self,
                       coord: Cartesian2DCoordinate,
                       direction: Direction)
                       -> Result<Cartesian2DCoordinate, CellLinkError> {
        if !self.is_valid_coordinate(coord) {
            return Err(CellLinkError::InvalidGridCoordinate);
        }
        let neighbour = self.neighbour_at_direction(coord, direction)
                            .ok_or(CellLinkError::NoNeighbour)?;

        self.cell_at_mut(coord).open(direction);
        self.cell_at_mut(neighbour).open(direction.opposite());
        Ok(neighbour)
    }

    /// Number of passages, each counted once.
    pub fn links_count(&self) -> usize {
        let forward = Directions::DOWN | Directions::RIGHT;
        self.cells
            .iter()
            .map(|cell| (cell.open_directions() & forward).bits().count_ones() as usize)
            .sum()
    }

    /// All cell coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cartesian2DCoordinate> {
        (0..self.height as u32).cartesian_product(0..self.width as u32)
                               .map(|(y, x)| Cartesian2DCoordinate::new(x, y))
    }

    /// Every passage once, as (cell, neighbour to the Right or Down) pairs.
    pub fn iter_links(&self) -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            [Direction::Right, Direction::Down]
                .iter()
                .filter(move |dir| self.cell_at(coord).is_open(**dir))
                .filter_map(move |dir| self.neighbour_at_direction(coord, *dir))
                .map(move |neighbour| (coord, neighbour))
                .collect::<SmallVec<[_; 2]>>()
        })
    }

    /// The passages as an undirected graph whose node indices are the row-major cell indices.
    pub fn to_graph(&self) -> UnGraph<Cartesian2DCoordinate, ()> {
        let (NodesCount(nodes), _) = self.spanning_tree_size();
        let mut graph = UnGraph::with_capacity(nodes, self.links_count());
        for coord in self.iter() {
            let _ = graph.add_node(coord);
        }
        for (a, b) in self.iter_links() {
            let a_index = NodeIndex::new(self.checked_index(a));
            let b_index = NodeIndex::new(self.checked_index(b));
            let _ = graph.add_edge(a_index, b_index, ());
        }
        graph
    }

    fn checked_index(&self, coord: Cartesian2DCoordinate) -> usize {
        self.grid_coordinate_to_index(coord)
            .unwrap_or_else(|| panic!("cell coordinate {:?} outside of {} x {} grid",
                                      coord, self.width, self.height))
    }

    /// Is there a wall segment running right from the wall corner at (x, y)?
    fn has_horizontal_wall(&self, x: usize, y: usize) -> bool {
        y == 0 || y == self.height ||
        !self.cell_at(Cartesian2DCoordinate::new(x as u32, y as u32 - 1)).is_open(Direction::Down)
    }

    /// Is there a wall segment running down from the wall corner at (x, y)?
    fn has_vertical_wall(&self, x: usize, y: usize) -> bool {
        x == 0 || x == self.width ||
        !self.cell_at(Cartesian2DCoordinate::new(x as u32 - 1, y as u32)).is_open(Direction::Right)
    }

    fn wall_corner(&self, x: usize, y: usize) -> &'static str {
        let left = x > 0 && self.has_horizontal_wall(x - 1, y);
        let right = x < self.width && self.has_horizontal_wall(x, y);
        let up = y > 0 && self.has_vertical_wall(x, y - 1);
        let down = y < self.height && self.has_vertical_wall(x, y);

        match (left, right, up, down) {
            (true, true, true, true) => "┼",
            (true, true, true, false) => "┴",
            (true, true, false, true) => "┬",
            (true, false, true, true) => "┤",
            (false, true, true, true) => "├",
            (true, true, false, false) => "─",
            (false, false, true, true) => "│",
            (false, true, true, false) => "└",
            (true, false, false, true) => "┐",
            (true, false, true, false) => "┘",
            (false, true, false, true) => "┌",
            (true, false, false, false) => "╴",
            (false, true, false, false) => "╶",
            (false, false, true, false) => "╵",
            (false, false, false, true) => "╷",
            (false, false, false, false) => " ",
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        const WALL_LR_3: &str = "───";
        const WALL_UD: &str = "│";
        const PASSAGE_3: &str = "   ";
        const PASSAGE: &str = " ";

        let mut output = String::new();

        // Each text row of wall corners is followed by a row of cell bodies, the last
        // corner row closes off the southern boundary.
        for y in 0..=self.height {
            for x in 0..=self.width {
                output.push_str(self.wall_corner(x, y));
                if x < self.width {
                    output.push_str(if self.has_horizontal_wall(x, y) { WALL_LR_3 } else { PASSAGE_3 });
                }
            }
            output.push('\n');

            if y < self.height {
                for x in 0..=self.width {
                    output.push_str(if self.has_vertical_wall(x, y) { WALL_UD } else { PASSAGE });
                    if x < self.width {
                        let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                        let body = if coord == self.entrance() {
                            " S "
                        } else if coord == self.exit() {
                            " E "
                        } else {
                            PASSAGE_3
                        };
                        output.push_str(body);
                    }
                }
                output.push('\n');
            }
        }

        write!(f, "{}", output)
    }
}
