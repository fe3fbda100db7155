use std::{
    fs,
    path::{Path, PathBuf},
};

use image::{DynamicImage, GenericImageView};
use log::{info, warn};
use serde::Deserialize;

use crate::{
    error::BatchCropError,
    utils::misc::{find_files_with_ext_in_folder, normalize_extension},
};

pub const DEFAULT_INPUT_FOLDER: &str = ".";
pub const DEFAULT_OUTPUT_FOLDER: &str = "../cropped_temp";
/// Standard frame width times number of columns.
pub const DEFAULT_TARGET_WIDTH: u32 = 842;
/// Standard frame height times number of rows.
pub const DEFAULT_TARGET_HEIGHT: u32 = 1353;
pub const DEFAULT_EXTENSION: &str = "png";

/// What happens to the batch when one image cannot be cropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnError {
    /// Log it, remember it, move on.
    #[default]
    Skip,
    /// Stop at the first failing image.
    Abort,
}

pub struct BatchCropOptions {
    width: u32,
    height: u32,
    extension: String,
    on_error: OnError,
}

impl Default for BatchCropOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_TARGET_WIDTH,
            height: DEFAULT_TARGET_HEIGHT,
            extension: DEFAULT_EXTENSION.to_string(),
            on_error: OnError::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchCropReport {
    /// Written files, in processing order.
    pub cropped: Vec<PathBuf>,
    /// Source images that failed, only filled with [`OnError::Skip`].
    pub skipped: Vec<(PathBuf, BatchCropError)>,
}

pub struct BatchCrop {
    input_folder: PathBuf,
    output_folder: PathBuf,
    options: BatchCropOptions,
}

impl Default for BatchCrop {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from(DEFAULT_INPUT_FOLDER),
            output_folder: PathBuf::from(DEFAULT_OUTPUT_FOLDER),
            options: Default::default(),
        }
    }
}

impl BatchCrop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_folder(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.input_folder = path.into();

        self
    }

    pub fn output_folder(&mut self, path: impl AsRef<Path> + Into<PathBuf>) -> &mut Self {
        self.output_folder = path.into();

        self
    }

    pub fn size(&mut self, width: u32, height: u32) -> &mut Self {
        self.options.width = width;
        self.options.height = height;

        self
    }

    pub fn extension(&mut self, ext: &str) -> &mut Self {
        self.options.extension = normalize_extension(ext).to_string();

        self
    }

    pub fn on_error(&mut self, on_error: OnError) -> &mut Self {
        self.options.on_error = on_error;

        self
    }

    /// Crops every matching image in the input folder, one after another.
    pub fn work(&self) -> Result<BatchCropReport, BatchCropError> {
        let BatchCropOptions {
            width,
            height,
            ref extension,
            on_error,
        } = self.options;

        if width == 0 || height == 0 {
            return Err(BatchCropError::InvalidSize { width, height });
        }

        let paths = find_files_with_ext_in_folder(&self.input_folder, extension).map_err(
            |source| BatchCropError::IOError {
                path: self.input_folder.clone(),
                source,
            },
        )?;

        fs::create_dir_all(&self.output_folder).map_err(|source| BatchCropError::IOError {
            path: self.output_folder.clone(),
            source,
        })?;

        let mut report = BatchCropReport::default();

        for path in paths {
            let Some(file_name) = path.file_name() else {
                continue;
            };

            let out_path = self.output_folder.join(file_name);

            match crop_file(&path, &out_path, width, height) {
                Ok(()) => {
                    info!("Cropped and saved: {}", out_path.display());
                    report.cropped.push(out_path);
                }
                Err(err) => match on_error {
                    OnError::Abort => return Err(err),
                    OnError::Skip => {
                        warn!("Skipped {}: {}", path.display(), err);
                        report.skipped.push((path, err));
                    }
                },
            }
        }

        info!(
            "Batch cropping completed. {} cropped, {} skipped",
            report.cropped.len(),
            report.skipped.len()
        );

        Ok(report)
    }
}

/// Top-left anchored crop to exactly `width` x `height`.
pub fn crop_image(
    image: &DynamicImage,
    width: u32,
    height: u32,
    path: &Path,
) -> Result<DynamicImage, BatchCropError> {
    let (image_width, image_height) = image.dimensions();

    if image_width < width || image_height < height {
        return Err(BatchCropError::ImageTooSmall {
            path: path.to_path_buf(),
            width: image_width,
            height: image_height,
            target_width: width,
            target_height: height,
        });
    }

    Ok(image.crop_imm(0, 0, width, height))
}

pub fn crop_file(
    in_path: &Path,
    out_path: &Path,
    width: u32,
    height: u32,
) -> Result<(), BatchCropError> {
    let image = image::open(in_path).map_err(|source| BatchCropError::ImageError {
        path: in_path.to_path_buf(),
        source,
    })?;

    let cropped = crop_image(&image, width, height, in_path)?;

    cropped
        .save(out_path)
        .map_err(|source| BatchCropError::ImageError {
            path: out_path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod test {
    use image::{Rgba, RgbaImage};

    use super::*;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 7, 255]))
    }

    #[test]
    fn crop_keeps_top_left() {
        let image = DynamicImage::ImageRgba8(gradient(20, 16));
        let cropped = crop_image(&image, 8, 6, Path::new("sheet.png")).unwrap();

        assert_eq!(cropped.dimensions(), (8, 6));
        assert_eq!(cropped.get_pixel(0, 0), Rgba([0, 0, 7, 255]));
        assert_eq!(cropped.get_pixel(7, 5), Rgba([7, 5, 7, 255]));
    }

    #[test]
    fn crop_exact_size() {
        let image = DynamicImage::ImageRgba8(gradient(8, 6));
        let cropped = crop_image(&image, 8, 6, Path::new("sheet.png")).unwrap();

        assert_eq!(cropped.to_rgba8(), gradient(8, 6));
    }

    #[test]
    fn crop_too_small() {
        let image = DynamicImage::ImageRgba8(gradient(8, 4));

        assert!(matches!(
            crop_image(&image, 8, 6, Path::new("sheet.png")),
            Err(BatchCropError::ImageTooSmall {
                width: 8,
                height: 4,
                target_width: 8,
                target_height: 6,
                ..
            })
        ));
    }

    #[test]
    fn batch_skips_bad_images() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("cropped");

        gradient(12, 10).save(input.path().join("goblin.png")).unwrap();
        gradient(9, 6).save(input.path().join("orc.png")).unwrap();
        gradient(4, 4).save(input.path().join("imp.png")).unwrap();
        fs::write(input.path().join("broken.png"), b"not a png").unwrap();
        fs::write(input.path().join("notes.txt"), b"hello").unwrap();

        let report = BatchCrop::new()
            .input_folder(input.path())
            .output_folder(&output)
            .size(8, 6)
            .work()
            .unwrap();

        assert_eq!(
            report.cropped,
            vec![output.join("goblin.png"), output.join("orc.png")]
        );
        for path in report.cropped.iter() {
            assert_eq!(image::image_dimensions(path).unwrap(), (8, 6));
        }

        let skipped: Vec<PathBuf> = report.skipped.iter().map(|(p, _)| p.clone()).collect();
        assert_eq!(
            skipped,
            vec![input.path().join("broken.png"), input.path().join("imp.png")]
        );
        assert!(matches!(
            report.skipped[0].1,
            BatchCropError::ImageError { .. }
        ));
        assert!(matches!(
            report.skipped[1].1,
            BatchCropError::ImageTooSmall { .. }
        ));

        assert!(!output.join("notes.txt").exists());
        assert!(!output.join("imp.png").exists());
    }

    #[test]
    fn batch_abort_on_first_error() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("cropped");

        gradient(4, 4).save(input.path().join("a_small.png")).unwrap();
        gradient(12, 10).save(input.path().join("b_goblin.png")).unwrap();

        let res = BatchCrop::new()
            .input_folder(input.path())
            .output_folder(&output)
            .size(8, 6)
            .on_error(OnError::Abort)
            .work();

        assert!(matches!(res, Err(BatchCropError::ImageTooSmall { .. })));
        assert!(!output.join("b_goblin.png").exists());
    }

    #[test]
    fn batch_creates_nested_output() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("deep").join("er").join("cropped");

        gradient(10, 10).save(input.path().join("goblin.png")).unwrap();

        let report = BatchCrop::new()
            .input_folder(input.path())
            .output_folder(&output)
            .size(5, 5)
            .work()
            .unwrap();

        assert_eq!(report.cropped.len(), 1);
        assert_eq!(
            image::image_dimensions(output.join("goblin.png")).unwrap(),
            (5, 5)
        );
    }

    #[test]
    fn batch_with_other_extension() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("cropped");

        gradient(10, 10).save(input.path().join("goblin.png")).unwrap();
        DynamicImage::ImageRgba8(gradient(10, 10))
            .to_rgb8()
            .save(input.path().join("orc.bmp"))
            .unwrap();

        let report = BatchCrop::new()
            .input_folder(input.path())
            .output_folder(&output)
            .size(4, 4)
            .extension(".bmp")
            .work()
            .unwrap();

        assert_eq!(report.cropped, vec![output.join("orc.bmp")]);
    }

    #[test]
    fn batch_invalid_size() {
        let input = tempfile::tempdir().unwrap();
        let output = input.path().join("cropped");

        let res = BatchCrop::new()
            .input_folder(input.path())
            .output_folder(&output)
            .size(0, 10)
            .work();

        assert!(matches!(
            res,
            Err(BatchCropError::InvalidSize { width: 0, height: 10 })
        ));
        assert!(!output.exists());
    }

    #[test]
    fn batch_missing_input() {
        let input = tempfile::tempdir().unwrap();

        let res = BatchCrop::new()
            .input_folder(input.path().join("nope"))
            .output_folder(input.path().join("cropped"))
            .size(1, 1)
            .work();

        assert!(matches!(res, Err(BatchCropError::IOError { .. })));
    }
}
