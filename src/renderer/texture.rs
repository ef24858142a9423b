//! Wall and floor texture loading.
//!
//! Images are decoded with the `image` crate, flipped so `v = 0` is the bottom
//! row, and uploaded as sRGB. If either image fails to load, both surfaces use
//! the same procedural checkerboard instead.

use image::RgbaImage;
use log::{info, warn};
use std::path::Path;

/// Side length of the fallback checkerboard, in pixels.
pub const CHECKERBOARD_SIZE: u32 = 64;
/// Side length of one checkerboard square, in pixels.
pub const CHECKER_SQUARE: u32 = 8;

/// 64x64 black and white checkerboard with 8-pixel squares, black at the origin.
pub fn checkerboard() -> RgbaImage {
    RgbaImage::from_fn(CHECKERBOARD_SIZE, CHECKERBOARD_SIZE, |x, y| {
        let value = if (x / CHECKER_SQUARE + y / CHECKER_SQUARE) & 1 == 1 {
            255
        } else {
            0
        };
        image::Rgba([value, value, value, 255])
    })
}

fn load_image(path: &Path) -> Result<RgbaImage, image::ImageError> {
    Ok(image::open(path)?.flipv().to_rgba8())
}

/// Decoded pixel data for the two surface textures.
pub struct TexturePair {
    pub wall: RgbaImage,
    pub floor: RgbaImage,
    /// `true` when the checkerboard replaced the files.
    pub fallback: bool,
}

/// Loads both textures, substituting the checkerboard for both if either fails.
pub fn load_texture_pair(wall_path: &Path, floor_path: &Path) -> TexturePair {
    match (load_image(wall_path), load_image(floor_path)) {
        (Ok(wall), Ok(floor)) => {
            info!(
                "Loaded textures {} ({}x{}) and {} ({}x{})",
                wall_path.display(),
                wall.width(),
                wall.height(),
                floor_path.display(),
                floor.width(),
                floor.height()
            );
            TexturePair {
                wall,
                floor,
                fallback: false,
            }
        }
        (wall, floor) => {
            if let Err(e) = wall {
                warn!("Failed to load wall texture {}: {}", wall_path.display(), e);
            }
            if let Err(e) = floor {
                warn!("Failed to load floor texture {}: {}", floor_path.display(), e);
            }
            warn!("Using fallback checkerboard texture");
            let board = checkerboard();
            TexturePair {
                wall: board.clone(),
                floor: board,
                fallback: true,
            }
        }
    }
}

/// Uploads an RGBA image into a new sampled texture and returns its view.
pub fn upload_texture(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    img: &RgbaImage,
    label: &str,
) -> wgpu::TextureView {
    let dimensions = img.dimensions();
    let texture_size = wgpu::Extent3d {
        width: dimensions.0,
        height: dimensions.1,
        depth_or_array_layers: 1,
    };

    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: texture_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });

    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            aspect: wgpu::TextureAspect::All,
            texture: &texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
        },
        img,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * dimensions.0),
            rows_per_image: Some(dimensions.1),
        },
        texture_size,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Linear sampler that repeats in both directions, so tiling factors above 1 wrap.
pub fn create_repeat_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Maze Texture Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Squares alternate every 8 pixels along both axes.
    #[test]
    fn test_checkerboard_pattern() {
        let board = checkerboard();
        assert_eq!(board.dimensions(), (64, 64));
        assert_eq!(board.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(board.get_pixel(7, 7).0, [0, 0, 0, 255]);
        assert_eq!(board.get_pixel(8, 0).0, [255, 255, 255, 255]);
        assert_eq!(board.get_pixel(0, 8).0, [255, 255, 255, 255]);
        assert_eq!(board.get_pixel(8, 8).0, [0, 0, 0, 255]);
        assert_eq!(board.get_pixel(63, 0).0, [255, 255, 255, 255]);
    }

    /// A missing file swaps in the checkerboard for both surfaces.
    #[test]
    fn test_missing_files_fall_back() {
        let pair = load_texture_pair(
            Path::new("/nonexistent/wall.jpg"),
            Path::new("/nonexistent/floor.jpg"),
        );
        assert!(pair.fallback);
        assert_eq!(pair.wall, checkerboard());
        assert_eq!(pair.floor, checkerboard());
    }

    /// One good file is not enough; both surfaces still fall back.
    #[test]
    fn test_partial_failure_falls_back_for_both() {
        let dir = tempfile::tempdir().unwrap();
        let wall_path = dir.path().join("wall.png");
        RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]))
            .save(&wall_path)
            .unwrap();

        let pair = load_texture_pair(&wall_path, &dir.path().join("floor.png"));
        assert!(pair.fallback);
        assert_eq!(pair.wall, checkerboard());
    }

    /// Loaded images are flipped so the first file row ends up last.
    #[test]
    fn test_loaded_images_are_flipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tex.png");
        let mut img = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let pair = load_texture_pair(&path, &path);
        assert!(!pair.fallback);
        assert_eq!(pair.wall.get_pixel(0, 1).0, [255, 0, 0, 255]);
        assert_eq!(pair.floor.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }
}
