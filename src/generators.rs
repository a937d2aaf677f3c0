use log::{debug, trace};
use rand::distributions::Uniform;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use crate::directions::{Direction, Directions};
use crate::grid::Grid;
use crate::units::{Height, Width};

/// Seedable source of the random choices made while carving a maze.
///
/// XorShift output for a given seed is the same on every platform, so a seed always names
/// the same maze.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: XorShiftRng,
    exponents: Uniform<u32>,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> RandomSource {
        RandomSource {
            rng: XorShiftRng::seed_from_u64(seed),
            // direction bits are 1 << 0 through 1 << 3
            exponents: Uniform::new_inclusive(0, 3),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = XorShiftRng::seed_from_u64(seed);
    }

    /// A uniformly random direction out of all four.
    pub fn random_direction(&mut self) -> Direction {
        let exponent = self.rng.sample(&self.exponents);
        Direction::from_exponent(exponent).expect("exponent distribution is limited to 0..=3")
    }

    /// A uniformly random member of `available`.
    ///
    /// Draws from all four directions and redraws until the draw is available, so the number
    /// of values consumed from the generator depends on the set. Panics if `available` is empty.
    pub fn direction_from(&mut self, available: Directions) -> Direction {
        assert!(!available.is_empty(), "cannot pick a direction from an empty set");

        let mut direction = self.random_direction();
        while !available.has(direction) {
            direction = self.random_direction();
        }
        direction
    }

    /// A fresh seed drawn from this source, for deriving the next maze from the current one.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

impl Default for RandomSource {
    fn default() -> RandomSource {
        RandomSource::from_seed(0)
    }
}

/// Build a new grid and carve it into a perfect maze.
pub fn carve(width: Width, height: Height, random: &mut RandomSource) -> Grid {
    let mut grid = Grid::new(width, height);
    recursive_backtracker(&mut grid, random);
    grid
}

/// Apply the recursive backtracker maze generation algorithm to a fresh grid.
///
/// A depth first random walk from the entrance cell: each step opens a passage to a random
/// unvisited neighbour and moves there, backing up to the most recent cell that still has an
/// unvisited neighbour when the walk is boxed in. The exit cell is a dead end, the walk never
/// continues past it.
///
/// The walk keeps its own stack of cells rather than recursing, entering cells and drawing
/// random numbers in the same order a recursive formulation would.
pub fn recursive_backtracker(grid: &mut Grid, random: &mut RandomSource) {
    let entrance = grid.entrance();
    let exit = grid.exit();

    grid.visit(entrance);
    let mut stack = Vec::with_capacity(grid.size());
    stack.push(entrance);

    while let Some(&current) = stack.last() {
        let available = if current == exit {
            Directions::empty()
        } else {
            grid.unvisited_neighbours(current)
        };

        if available.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let direction = random.direction_from(available);
        let next = grid.link(current, direction)
                       .expect("available directions always lead to a neighbour on the grid");
        trace!("carved {:?} from {:?} to {:?}", direction, current, next);

        grid.visit(next);
        stack.push(next);
    }

    debug!("recursive backtracker carved {} passages over {} cells",
           grid.links_count(), grid.size());
}
