use image::{DynamicImage, ImageFormat, ImageReader, RgbImage, imageops::FilterType};
use std::path::{Path, PathBuf};

use crate::error::{PaintError, PaintResult};
use crate::raster::RasterBuffer;

/// Extension appended when the user saves without one.
pub const DEFAULT_EXTENSION: &str = "png";

/// Extensions offered when opening an image.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Reads and writes the raster buffer as ordinary image files.
///
/// Remembers the last path used so the file dialogs can start from it.
#[derive(Debug, Default)]
pub struct FileHandler {
    last_path: Option<PathBuf>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Encode the buffer to `path`, format chosen by extension.
    ///
    /// Returns the path actually written (with the default extension added
    /// if there was none).
    pub fn save(&mut self, path: &Path, buffer: &RasterBuffer) -> PaintResult<PathBuf> {
        let path = with_default_extension(path);
        let format = ImageFormat::from_path(&path).map_err(|err| PaintError::from_image(&path, err))?;
        if !format.can_write() {
            return Err(PaintError::unsupported(&path, format!("{format:?} cannot be written")));
        }

        log::info!("Saving {}x{} image to {}", buffer.width(), buffer.height(), path.display());
        let image = DynamicImage::ImageRgb8(buffer.export());
        // The GIF encoder expects an alpha channel.
        let image = match format {
            ImageFormat::Gif => DynamicImage::ImageRgba8(image.to_rgba8()),
            _ => image,
        };
        image
            .save_with_format(&path, format)
            .map_err(|err| PaintError::from_image(&path, err))?;

        self.last_path = Some(path.clone());
        Ok(path)
    }

    /// Decode `path` and stretch it to exactly `width` x `height`.
    pub fn load(&mut self, path: &Path, width: u32, height: u32) -> PaintResult<RgbImage> {
        log::info!("Loading image from {}", path.display());
        let reader = ImageReader::open(path)
            .map_err(|err| PaintError::io(path, err))?
            .with_guessed_format()
            .map_err(|err| PaintError::io(path, err))?;
        if reader.format().is_none() {
            return Err(PaintError::unsupported(path, "unrecognized image data"));
        }
        let decoded = reader.decode().map_err(|err| PaintError::from_image(path, err))?;
        log::debug!("Decoded {}x{} image", decoded.width(), decoded.height());

        let pixels = decoded.to_rgb8();
        let pixels = if pixels.dimensions() == (width, height) {
            pixels
        } else {
            image::imageops::resize(&pixels, width, height, FilterType::Triangle)
        };

        self.last_path = Some(path.to_path_buf());
        Ok(pixels)
    }
}

/// Append `.png` when `path` has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

/// Whether the open dialog should accept `path`.
pub fn is_openable(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| OPEN_EXTENSIONS.contains(&ext.as_str()))
}
