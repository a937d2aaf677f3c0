use std::slice::ChunksExact;

use glam::Vec2;

use crate::cells::Cartesian2DCoordinate;
use crate::directions::Direction;
use crate::grid::Grid;
use crate::units::{EdgesCount, NodesCount};

/// World space distance between the centres of adjacent cells.
pub const NODE_SIZE: f32 = 50.0;

/// Half the width of a corridor as a fraction of `NODE_SIZE`.
/// Below 0.5 so that unconnected cells are separated by a visible gap.
pub const CORRIDOR_WIDTH_FACTOR: f32 = 0.4;

const HALF_CORRIDOR: f32 = NODE_SIZE * CORRIDOR_WIDTH_FACTOR;

pub const VERTICES_PER_QUAD: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: Vec2,
    pub tex_coords: Vec2,
}

impl Vertex {
    /// A vertex textured with its own position, so a repeated texture tiles across the maze.
    #[inline]
    fn at(x: f32, y: f32) -> Vertex {
        let position = Vec2::new(x, y);
        Vertex {
            position,
            tex_coords: position,
        }
    }
}

/// The corridors of a carved maze as a flat list of axis-aligned quads, 4 vertices each.
///
/// Every cell contributes a square body quad and every passage a connector quad filling the
/// gap between the two bodies it joins. Walls are the gaps left unfilled.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Geometry {
    vertices: Vec<Vertex>,
}

impl Geometry {
    /// Emit the quads for a carved grid.
    ///
    /// Cells are walked in row-major order. Each visited cell emits its body, then a connector
    /// for an open `Up` passage, then one for an open `Left` passage. `Down` and `Right`
    /// passages are emitted by the cell on their far side.
    pub fn from_grid(grid: &Grid) -> Geometry {
        let (NodesCount(nodes), EdgesCount(edges)) = grid.spanning_tree_size();
        let mut vertices = Vec::with_capacity(VERTICES_PER_QUAD * (nodes + edges));

        for coord in grid.iter() {
            let cell = grid.cell_at(coord);
            if !cell.is_visited() {
                continue;
            }

            push_body(&mut vertices, coord);
            for &direction in &[Direction::Up, Direction::Left] {
                if cell.is_open(direction) {
                    if let Some(neighbour) = grid.neighbour_at_direction(coord, direction) {
                        push_connector(&mut vertices, coord, neighbour, direction);
                    }
                }
            }
        }

        Geometry { vertices }
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    #[inline]
    pub fn quads(&self) -> ChunksExact<Vertex> {
        self.vertices.chunks_exact(VERTICES_PER_QUAD)
    }

    #[inline]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// The smallest and largest corner of the box enclosing all the vertex positions.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices
                 .iter()
                 .fold((first, first), |(min, max), v| (min.min(v.position), max.max(v.position))))
    }
}

#[inline]
fn node_centre(coord: Cartesian2DCoordinate) -> Vec2 {
    Vec2::new(coord.x as f32, coord.y as f32) * NODE_SIZE
}

fn push_body(vertices: &mut Vec<Vertex>, coord: Cartesian2DCoordinate) {
    let c = node_centre(coord);
    let h = HALF_CORRIDOR;
    vertices.extend_from_slice(&[Vertex::at(c.x - h, c.y - h),
                                 Vertex::at(c.x + h, c.y - h),
                                 Vertex::at(c.x + h, c.y + h),
                                 Vertex::at(c.x - h, c.y + h)]);
}

fn push_connector(vertices: &mut Vec<Vertex>,
                  coord: Cartesian2DCoordinate,
                  neighbour: Cartesian2DCoordinate,
                  direction: Direction) {
    let c = node_centre(coord);
    let n = node_centre(neighbour);
    let h = HALF_CORRIDOR;
    let quad = match direction {
        Direction::Up => [Vertex::at(c.x - h, n.y + h),
                          Vertex::at(c.x + h, n.y + h),
                          Vertex::at(c.x + h, c.y - h),
                          Vertex::at(c.x - h, c.y - h)],
        Direction::Down => [Vertex::at(c.x - h, c.y + h),
                            Vertex::at(c.x + h, c.y + h),
                            Vertex::at(c.x + h, n.y - h),
                            Vertex::at(c.x - h, n.y - h)],
        Direction::Left => [Vertex::at(n.x + h, c.y + h),
                            Vertex::at(c.x - h, c.y + h),
                            Vertex::at(c.x - h, c.y - h),
                            Vertex::at(n.x + h, c.y - h)],
        Direction::Right => [Vertex::at(c.x + h, c.y + h),
                             Vertex::at(n.x - h, c.y + h),
                             Vertex::at(n.x - h, c.y - h),
                             Vertex::at(c.x + h, c.y - h)],
    };
    vertices.extend_from_slice(&quad);
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;

    use super::*;
    use crate::generators::{carve, RandomSource};
    use crate::units::{Height, Width};

    fn carved(w: usize, h: usize, seed: u64) -> Grid {
        carve(Width(w), Height(h), &mut RandomSource::from_seed(seed))
    }

    fn assert_quad_eq(quad: &[Vertex], expected: &[(f32, f32)]) {
        assert_eq!(quad.len(), expected.len());
        for (vertex, &(x, y)) in quad.iter().zip(expected) {
            assert!(vertex.position.abs_diff_eq(Vec2::new(x, y), 1e-4),
                    "{:?} != {:?}", vertex.position, (x, y));
        }
    }

    #[test]
    fn single_cell_is_one_body_quad() {
        let geometry = Geometry::from_grid(&carved(1, 1, 77));
        assert_eq!(geometry.vertices().len(), 4);
        assert_quad_eq(geometry.vertices(),
                       &[(-20.0, -20.0), (20.0, -20.0), (20.0, 20.0), (-20.0, 20.0)]);
    }

    #[test]
    fn two_cells_are_bridged_by_a_connector() {
        let geometry = Geometry::from_grid(&carved(2, 1, 0));
        assert_eq!(geometry.vertices().len(), 12);

        let quads: Vec<&[Vertex]> = geometry.quads().collect();
        assert_quad_eq(quads[0], &[(-20.0, -20.0), (20.0, -20.0), (20.0, 20.0), (-20.0, 20.0)]);
        assert_quad_eq(quads[1], &[(30.0, -20.0), (70.0, -20.0), (70.0, 20.0), (30.0, 20.0)]);
        // the Left passage of the second cell spans the gap between the two bodies
        assert_quad_eq(quads[2], &[(20.0, 20.0), (30.0, 20.0), (30.0, -20.0), (20.0, -20.0)]);
    }

    #[test]
    fn vertical_connector_spans_the_gap() {
        let geometry = Geometry::from_grid(&carved(1, 2, 0));
        let quads: Vec<&[Vertex]> = geometry.quads().collect();
        assert_eq!(quads.len(), 3);
        assert_quad_eq(quads[2], &[(-20.0, 20.0), (20.0, 20.0), (20.0, 30.0), (-20.0, 30.0)]);
    }

    #[test]
    fn down_and_right_connectors_match_their_partners() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        let left = Cartesian2DCoordinate::new(0, 0);
        let right = Cartesian2DCoordinate::new(1, 0);
        push_connector(&mut a, left, right, Direction::Right);
        push_connector(&mut b, right, left, Direction::Left);
        let corners = |quad: &[Vertex]| {
            let mut points: Vec<(i32, i32)> = quad.iter()
                .map(|v| (v.position.x.round() as i32, v.position.y.round() as i32))
                .collect();
            points.sort();
            points
        };
        assert_eq!(corners(&a), corners(&b));

        let (mut c, mut d) = (Vec::new(), Vec::new());
        let below = Cartesian2DCoordinate::new(0, 1);
        push_connector(&mut c, left, below, Direction::Down);
        push_connector(&mut d, below, left, Direction::Up);
        assert_eq!(corners(&c), corners(&d));
    }

    #[test]
    fn texture_coordinates_follow_positions() {
        let geometry = Geometry::from_grid(&carved(5, 4, 3));
        assert!(geometry.vertices().iter().all(|v| v.tex_coords == v.position));
    }

    #[test]
    fn bounds_enclose_every_cell() {
        let geometry = Geometry::from_grid(&carved(4, 3, 11));
        let (min, max) = geometry.bounds().unwrap();
        assert!(min.abs_diff_eq(Vec2::new(-20.0, -20.0), 1e-4));
        assert!(max.abs_diff_eq(Vec2::new(170.0, 120.0), 1e-4));
        assert_eq!(Geometry::default().bounds(), None);
    }

    #[test]
    fn unvisited_cells_emit_nothing() {
        let grid = Grid::new(Width(3), Height(3));
        assert!(Geometry::from_grid(&grid).is_empty());
    }

    #[test]
    fn one_quad_per_cell_and_per_passage() {
        fn p(w: u8, h: u8, seed: u64) -> bool {
            let (w, h) = (w as usize % 16 + 1, h as usize % 16 + 1);
            let geometry = Geometry::from_grid(&carved(w, h, seed));
            let cells = w * h;
            geometry.quad_count() == 2 * cells - 1 &&
            geometry.vertices().len() == 4 * (cells + cells - 1)
        }
        quickcheck(p as fn(u8, u8, u64) -> bool)
    }

    #[test]
    fn same_maze_same_geometry() {
        assert_eq!(Geometry::from_grid(&carved(8, 6, 42)),
                   Geometry::from_grid(&carved(8, 6, 42)));
    }
}
