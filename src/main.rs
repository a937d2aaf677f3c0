use corridors::{
    geometry::NODE_SIZE,
    grid::Grid,
    renderers::ImageTarget,
    units::{Height, Width},
    Maze,
};
use docopt::Docopt;
use error_chain::bail;
use glam::{Affine2, Vec2};
use log::info;
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
};

const USAGE: &str = "Corridors

Usage:
    corridors_driver -h | --help
    corridors_driver [options]

Options:
    -h --help              Show this screen.
    --grid-width=<w>       The grid width in a w*h maze [default: 16].
    --grid-height=<h>      The grid height in a w*h maze [default: 12].
    --seed=<s>             Seed the maze is carved from [default: 0].
    --regenerations=<n>    How many times to regenerate the maze from its own random source [default: 0].
    --texture=<path>       Tileable image painted onto the corridor floors.
    --text-out=<path>      Output file path for a textual rendering of the maze.
    --image-out=<path>     Output file path for a PNG rendering of the maze.
    --cell-pixels=<n>      Pixels between the centres of adjacent cells in image renderings [default: 50].
    --save-edges=<path>    Output file path for the maze passages as a graph edge list.
    --screen-view          Show the rendered maze in a window, requires the sdl feature.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: u64,
    flag_regenerations: usize,
    flag_texture: String,
    flag_text_out: String,
    flag_image_out: String,
    flag_cell_pixels: u32,
    flag_save_edges: String,
    flag_screen_view: bool,
}

// Driver errors wrap the library's own error chain plus argument and file failures.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(corridors::errors::Error, corridors::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }

        errors {
            InvalidDimensions(width: usize, height: usize) {
                description("maze dimensions must be positive")
                display("maze dimensions must be positive, got {} x {}", width, height)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = (args.flag_grid_width, args.flag_grid_height);
    if width == 0 || height == 0 {
        bail!(ErrorKind::InvalidDimensions(width, height));
    }

    let mut maze = if args.flag_texture.is_empty() {
        Maze::new()
    } else {
        Maze::with_texture_file(&args.flag_texture)
    };

    maze.generate(Width(width), Height(height), args.flag_seed);
    for _ in 0..args.flag_regenerations {
        maze.regenerate();
    }
    info!("carved {} x {} maze from seed {}, {} passages",
          width, height, maze.seed().unwrap_or(args.flag_seed), maze.grid().links_count());

    let large_grid_cell_count = 25 * 25;
    let wants_picture = !args.flag_image_out.is_empty() || args.flag_screen_view;

    if !args.flag_text_out.is_empty() {
        write_text_to_file(&format!("{}", maze.grid()), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    } else if !wants_picture && width * height < large_grid_cell_count {
        println!("{}", maze.grid());
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(maze.grid(), &args.flag_save_edges)?;
    }

    if wants_picture {
        let target = render_to_image(&maze, args.flag_cell_pixels);

        if !args.flag_image_out.is_empty() {
            target.save(&args.flag_image_out)?;
            info!("wrote maze image to {}", args.flag_image_out);
        }
        if args.flag_screen_view {
            show_on_screen(&target)?;
        }
    }

    Ok(())
}

/// Rasterise the maze so that each node is `cell_pixels` wide, with cell (0, 0) pulled fully
/// on to the image.
fn render_to_image(maze: &Maze, cell_pixels: u32) -> ImageTarget {
    let (Width(width), Height(height)) = maze.maze_size();
    let scale = cell_pixels as f32 / NODE_SIZE;
    let transform = Affine2::from_scale(Vec2::splat(scale)) *
                    Affine2::from_translation(Vec2::splat(NODE_SIZE / 2.0));

    let mut target = ImageTarget::new(width as u32 * cell_pixels, height as u32 * cell_pixels);
    maze.render(&mut target, &transform);
    target
}

#[cfg(feature = "sdl")]
fn show_on_screen(target: &ImageTarget) -> Result<()> {
    corridors::sdl::show_image("Corridors", target.image())?;
    Ok(())
}

#[cfg(not(feature = "sdl"))]
fn show_on_screen(_: &ImageTarget) -> Result<()> {
    log::warn!("--screen-view ignored, corridors_driver was built without the sdl feature");
    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

/// Write the passages as `V E` followed by one 1-based `a b` cell index pair per passage.
fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    graph_data.push_str(&format!("{} {}\n", maze_grid.size(), maze_grid.links_count()));

    for (src, dst) in maze_grid.iter_links() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .expect("Links iter should give valid coordinate");
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .expect("Links iter should give valid coordinate");
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
