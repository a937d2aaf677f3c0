use std::path::Path;

use error_chain::bail;
use glam::{Affine2, Vec2};
use image::{Rgba, RgbaImage};
use log::debug;

use crate::errors::*;
use crate::geometry::{Vertex, VERTICES_PER_QUAD};

pub const BACKGROUND: Rgba<u8> = Rgba([0x10, 0x10, 0x18, 0xff]);
pub const FLOOR: Rgba<u8> = Rgba([0xc8, 0xb4, 0x8c, 0xff]);

/// Anything that can paint a maze's quads.
///
/// `vertices` come in runs of 4, one axis-aligned quad each. `transform` maps vertex positions
/// into the target's space and `texture`, when present, is sampled at the vertex texture
/// coordinates and repeats outside its own extent.
pub trait RenderTarget {
    fn draw_quads(&mut self, vertices: &[Vertex], texture: Option<&Texture>, transform: &Affine2);
}

/// A repeating image painted onto the corridors.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbaImage,
}

impl Texture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Texture> {
        let path = path.as_ref();
        let image = image::open(path)
            .chain_err(|| format!("Failed to load texture {}", path.display()))?;
        Texture::from_image(image.to_rgba8())
    }

    pub fn from_image(image: RgbaImage) -> Result<Texture> {
        if image.width() == 0 || image.height() == 0 {
            bail!(ErrorKind::EmptyTexture);
        }
        Ok(Texture { image })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The texel under a texture coordinate measured in texels, wrapping in both axes.
    pub fn sample(&self, tex_coords: Vec2) -> Rgba<u8> {
        let wrap = |coordinate: f32, size: u32| (coordinate.floor() as i64).rem_euclid(i64::from(size)) as u32;
        *self.image.get_pixel(wrap(tex_coords.x, self.width()), wrap(tex_coords.y, self.height()))
    }
}

/// A software rasteriser drawing into an in-memory RGBA image.
#[derive(Clone, Debug)]
pub struct ImageTarget {
    canvas: RgbaImage,
    floor: Rgba<u8>,
}

impl ImageTarget {
    pub fn new(width: u32, height: u32) -> ImageTarget {
        ImageTarget {
            canvas: RgbaImage::from_pixel(width, height, BACKGROUND),
            floor: FLOOR,
        }
    }

    /// The colour of untextured quads.
    pub fn floor_colour(mut self, floor: Rgba<u8>) -> ImageTarget {
        self.floor = floor;
        self
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        self.canvas
            .save(path)
            .chain_err(|| format!("Failed to write maze image {}", path.display()))?;
        debug!("saved {}x{} maze image to {}", self.canvas.width(), self.canvas.height(), path.display());
        Ok(())
    }

    /// Fill every pixel whose centre maps back inside the quad.
    ///
    /// Quads are axis-aligned in their own space, so the inside test happens after undoing
    /// `transform` and works for any rotation or scale the caller applies.
    fn fill_quad(&mut self,
                 quad: &[Vertex],
                 texture: Option<&Texture>,
                 transform: &Affine2,
                 inverse: &Affine2) {
        let (local_min, local_max) = min_max(quad.iter().map(|v| v.position));
        let (screen_min, screen_max) = min_max(quad.iter().map(|v| transform.transform_point2(v.position)));

        let x_start = screen_min.x.max(0.0).floor() as u32;
        let y_start = screen_min.y.max(0.0).floor() as u32;
        let x_end = (screen_max.x.ceil().max(0.0) as u32).min(self.canvas.width());
        let y_end = (screen_max.y.ceil().max(0.0) as u32).min(self.canvas.height());

        // Opposite corners of the quad pin down its linear position to texture mapping.
        let (a, c) = (quad[0], quad[2]);
        let span = c.position - a.position;
        let tex_span = c.tex_coords - a.tex_coords;
        let tex_at = |p: Vec2| {
            let t = Vec2::new(if span.x != 0.0 { (p.x - a.position.x) / span.x } else { 0.0 },
                              if span.y != 0.0 { (p.y - a.position.y) / span.y } else { 0.0 });
            a.tex_coords + t * tex_span
        };

        for y in y_start..y_end {
            for x in x_start..x_end {
                let p = inverse.transform_point2(Vec2::new(x as f32 + 0.5, y as f32 + 0.5));
                let inside = p.x >= local_min.x && p.x < local_max.x &&
                             p.y >= local_min.y && p.y < local_max.y;
                if inside {
                    let colour = texture.map_or(self.floor, |t| t.sample(tex_at(p)));
                    self.canvas.put_pixel(x, y, colour);
                }
            }
        }
    }
}

impl RenderTarget for ImageTarget {
    fn draw_quads(&mut self, vertices: &[Vertex], texture: Option<&Texture>, transform: &Affine2) {
        let inverse = transform.inverse();
        for quad in vertices.chunks_exact(VERTICES_PER_QUAD) {
            self.fill_quad(quad, texture, transform, &inverse);
        }
    }
}

fn min_max<I: Iterator<Item = Vec2>>(mut points: I) -> (Vec2, Vec2) {
    let first = points.next().unwrap_or(Vec2::ZERO);
    points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)))
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::directions::Direction;
    use crate::generators::{carve, RandomSource};
    use crate::geometry::{Geometry, NODE_SIZE};
    use crate::units::{Height, Width};

    fn half_node_offset() -> Affine2 {
        Affine2::from_translation(Vec2::splat(NODE_SIZE / 2.0))
    }

    fn render(w: usize, h: usize, seed: u64, texture: Option<&Texture>) -> (RgbaImage, crate::grid::Grid) {
        let grid = carve(Width(w), Height(h), &mut RandomSource::from_seed(seed));
        let geometry = Geometry::from_grid(&grid);
        let mut target = ImageTarget::new(w as u32 * 50, h as u32 * 50);
        target.draw_quads(geometry.vertices(), texture, &half_node_offset());
        (target.into_image(), grid)
    }

    #[test]
    fn texture_sampling_wraps() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        image.put_pixel(0, 1, Rgba([255, 0, 0, 255]));
        let texture = Texture::from_image(image).unwrap();
        assert_eq!(texture.sample(Vec2::new(2.5, -0.5)), Rgba([255, 0, 0, 255]));
        assert_eq!(texture.sample(Vec2::new(0.2, 1.9)), Rgba([255, 0, 0, 255]));
        assert_eq!(texture.sample(Vec2::new(1.0, 1.0)), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn empty_texture_is_rejected() {
        let result = Texture::from_image(RgbaImage::new(0, 4));
        match result {
            Err(Error(ErrorKind::EmptyTexture, _)) => (),
            other => panic!("expected an empty texture error, got {:?}", other),
        }
    }

    #[test]
    fn missing_texture_file_is_an_error() {
        assert!(Texture::from_file("no/such/floor.png").is_err());
    }

    #[test]
    fn single_cell_fills_its_body_only() {
        let (image, _) = render(1, 1, 0, None);
        assert_eq!(*image.get_pixel(25, 25), FLOOR);
        assert_eq!(*image.get_pixel(5, 5), FLOOR);
        assert_eq!(*image.get_pixel(44, 44), FLOOR);
        assert_eq!(*image.get_pixel(4, 25), BACKGROUND);
        assert_eq!(*image.get_pixel(45, 25), BACKGROUND);
    }

    #[test]
    fn gaps_are_filled_exactly_where_passages_are_open() {
        let (image, grid) = render(6, 5, 1234, None);
        for coord in grid.iter() {
            let (x, y) = (coord.x * 50, coord.y * 50);
            if grid.neighbour_at_direction(coord, Direction::Right).is_some() {
                let expected = if grid.is_neighbour_linked(coord, Direction::Right) { FLOOR } else { BACKGROUND };
                assert_eq!(*image.get_pixel(x + 50, y + 25), expected, "right of {:?}", coord);
            }
            if grid.neighbour_at_direction(coord, Direction::Down).is_some() {
                let expected = if grid.is_neighbour_linked(coord, Direction::Down) { FLOOR } else { BACKGROUND };
                assert_eq!(*image.get_pixel(x + 25, y + 50), expected, "below {:?}", coord);
            }
        }
        // wall corners are never painted
        assert_eq!(*image.get_pixel(50, 50), BACKGROUND);
    }

    #[test]
    fn textured_quads_take_texture_colours() {
        let red = Rgba([255, 0, 0, 255]);
        let texture = Texture::from_image(RgbaImage::from_pixel(4, 4, red)).unwrap();
        let (image, _) = render(2, 2, 9, Some(&texture));
        assert_eq!(*image.get_pixel(25, 25), red);
        assert_eq!(*image.get_pixel(75, 75), red);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn transform_moves_the_maze() {
        let grid = carve(Width(1), Height(1), &mut RandomSource::from_seed(0));
        let geometry = Geometry::from_grid(&grid);
        let mut target = ImageTarget::new(100, 100).floor_colour(Rgba([0, 255, 0, 255]));
        let transform = Affine2::from_scale_angle_translation(Vec2::splat(2.0), 0.0, Vec2::splat(50.0));
        target.draw_quads(geometry.vertices(), None, &transform);

        let image = target.image();
        assert_eq!(*image.get_pixel(50, 50), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(11, 11), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(9, 9), BACKGROUND);
        assert_eq!(*image.get_pixel(91, 50), BACKGROUND);
    }
}
