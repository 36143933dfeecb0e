//! File saving for exported selections.

use super::types::CaptureError;
use crate::draw::Bitmap;
use chrono::Local;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for file saving.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save exports to.
    pub save_directory: PathBuf,
    /// Append a `_%Y-%m-%d_%H%M%S` timestamp to the suggested name.
    pub timestamped: bool,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Sketchboard"),
            timestamped: false,
        }
    }
}

/// Builds the on-disk filename for a suggested export name.
///
/// The extension is always `png`; a timestamp is inserted before it when
/// requested.
pub fn generate_filename(suggested_name: &str, timestamped: bool) -> String {
    let stem = Path::new(suggested_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("selection");

    if timestamped {
        format!("{}_{}.png", stem, Local::now().format("%Y-%m-%d_%H%M%S"))
    } else {
        format!("{}.png", stem)
    }
}

/// Picks a path in `directory` that does not exist yet, adding ` (n)` before
/// the extension the way browsers do for repeated downloads.
pub fn unique_path(directory: &Path, filename: &str) -> PathBuf {
    let candidate = directory.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let path = Path::new(filename);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(filename);
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("png");
    (1..)
        .map(|n| directory.join(format!("{} ({}).{}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

/// Ensure the save directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<PathBuf, CaptureError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Save a bitmap as PNG.
///
/// # Returns
/// Path to the saved file
pub fn save_bitmap(
    bitmap: &Bitmap,
    suggested_name: &str,
    config: &FileSaveConfig,
) -> Result<PathBuf, CaptureError> {
    let directory = ensure_directory_exists(&config.save_directory)?;
    let filename = generate_filename(suggested_name, config.timestamped);
    let file_path = unique_path(&directory, &filename);

    log::info!(
        "Saving {}x{} export to: {}",
        bitmap.width(),
        bitmap.height(),
        file_path.display()
    );

    bitmap
        .save_with_format(&file_path, ImageFormat::Png)
        .map_err(|e| match e {
            image::ImageError::IoError(io) => CaptureError::SaveError(io),
            other => CaptureError::ImageError(other.to_string()),
        })?;

    // User read/write only
    #[cfg(unix)]
    {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
    }

    log::debug!("Export saved: {}", file_path.display());

    Ok(file_path)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn filename_keeps_stem_and_forces_png() {
        assert_eq!(generate_filename("selection.png", false), "selection.png");
        assert_eq!(generate_filename("drawing", false), "drawing.png");
        assert_eq!(generate_filename("", false), "selection.png");

        let stamped = generate_filename("selection.png", true);
        assert!(stamped.starts_with("selection_"));
        assert!(stamped.ends_with(".png"));
    }

    #[test]
    fn unique_path_adds_counter_for_existing_files() {
        let temp = TempDir::new().unwrap();
        let first = unique_path(temp.path(), "selection.png");
        assert_eq!(first, temp.path().join("selection.png"));

        fs::write(&first, b"x").unwrap();
        let second = unique_path(temp.path(), "selection.png");
        assert_eq!(second, temp.path().join("selection (1).png"));
    }

    #[test]
    fn save_bitmap_writes_decodable_png() {
        let temp = TempDir::new().unwrap();
        let config = FileSaveConfig {
            save_directory: temp.path().join("nested"),
            timestamped: false,
        };
        let bitmap = Bitmap::from_pixel(3, 2, Rgba([255, 255, 255, 255]));

        let path = save_bitmap(&bitmap, "selection.png", &config).unwrap();
        assert!(path.ends_with("selection.png"));

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn test_expand_tilde() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with("~"));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_default_config() {
        let config = FileSaveConfig::default();
        assert!(!config.timestamped);
        assert!(
            config
                .save_directory
                .to_string_lossy()
                .contains("Sketchboard")
        );
    }
}
