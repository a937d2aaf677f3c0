use std::path::Path;

use glam::Affine2;
use log::{debug, warn};

use crate::cells::Cartesian2DCoordinate;
use crate::directions::Directions;
use crate::errors::*;
use crate::generators::{self, RandomSource};
use crate::geometry::{Geometry, NODE_SIZE};
use crate::grid::Grid;
use crate::renderers::{RenderTarget, Texture};
use crate::units::{Height, Width};

/// A generated maze: the carved grid, its corridor geometry and the floor texture to paint it
/// with.
///
/// Every `generate` builds a brand new grid and geometry from scratch, nothing from a previous
/// maze is carried over except the random source that `regenerate` draws its next seed from.
#[derive(Debug, Default)]
pub struct Maze {
    grid: Option<Grid>,
    geometry: Geometry,
    random: RandomSource,
    seed: Option<u64>,
    texture: Option<Texture>,
}

impl Maze {
    pub fn new() -> Maze {
        Maze::default()
    }

    /// A maze painted with the image at `path`.
    ///
    /// A texture that fails to load is logged and the maze falls back to untextured
    /// rendering, generation and queries are unaffected.
    pub fn with_texture_file<P: AsRef<Path>>(path: P) -> Maze {
        let mut maze = Maze::new();
        if let Err(e) = maze.load_texture(path) {
            warn!("{}", e);
        }
        maze
    }

    pub fn load_texture<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.texture = Some(Texture::from_file(path)?);
        Ok(())
    }

    pub fn set_texture(&mut self, texture: Option<Texture>) {
        self.texture = texture;
    }

    #[inline]
    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    /// Carve a new `width * height` maze from `seed` and rebuild its geometry.
    ///
    /// The same dimensions and seed always give the same maze. Panics if either dimension is
    /// zero.
    pub fn generate(&mut self, width: Width, height: Height, seed: u64) {
        assert!(width.0 > 0 && height.0 > 0,
                "maze dimensions must be positive, got {:?} x {:?}", width, height);

        self.random.reseed(seed);
        let grid = generators::carve(width, height, &mut self.random);
        self.geometry = Geometry::from_grid(&grid);
        self.grid = Some(grid);
        self.seed = Some(seed);

        debug!("generated {} x {} maze from seed {}: {} quads",
               width.0, height.0, seed, self.geometry.quad_count());
    }

    /// Generate a different maze of the same size, seeded from this maze's random source.
    ///
    /// The new maze follows from the previous seed and the number of regenerations since, not
    /// from any seed the caller picks. Panics if `generate` has not been called.
    pub fn regenerate(&mut self) {
        let (width, height) = self.maze_size();
        let seed = self.random.next_seed();
        self.generate(width, height, seed);
    }

    /// Hand the corridors, the floor texture and the caller's transform to a render target.
    pub fn render<T: RenderTarget + ?Sized>(&self, target: &mut T, transform: &Affine2) {
        target.draw_quads(self.geometry.vertices(), self.texture.as_ref(), transform);
    }

    /// World space distance between the centres of adjacent cells.
    #[inline]
    pub fn node_size() -> f32 {
        NODE_SIZE
    }

    /// The passages leading out of a cell, for navigating the maze.
    ///
    /// Panics if no maze has been generated or the coordinate is outside the maze.
    pub fn available_directions(&self, coord: Cartesian2DCoordinate) -> Directions {
        self.grid().cell_at(coord).open_directions()
    }

    /// Panics if no maze has been generated.
    pub fn maze_size(&self) -> (Width, Height) {
        self.grid().dimensions()
    }

    /// Panics if no maze has been generated.
    pub fn grid(&self) -> &Grid {
        self.grid.as_ref().expect("no maze has been generated yet")
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.grid.is_some()
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The seed the current maze was carved from.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn entrance(&self) -> Cartesian2DCoordinate {
        self.grid().entrance()
    }

    pub fn exit(&self) -> Cartesian2DCoordinate {
        self.grid().exit()
    }
}
