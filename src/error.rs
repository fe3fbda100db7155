use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FrameMapError {
    #[error("Cannot read or write `{}`: {source}", path.display())]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("`{}` has {have} line(s). Need at least {need}", path.display())]
    TooFewLines {
        path: PathBuf,
        have: usize,
        need: usize,
    },
    #[error("Could not extract texture ID from expected line. Line content:\n{line}")]
    MissingTextureId { line: String },
    #[error("Placeholder texture ID cannot be empty")]
    EmptyPlaceholder,
}

#[derive(Debug, thiserror::Error)]
pub enum BatchCropError {
    #[error("IOError at `{}`: {source}", path.display())]
    IOError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot process image `{}`: {source}", path.display())]
    ImageError {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(
        "Image `{}` is {width}x{height}. Smaller than target size {target_width}x{target_height}",
        path.display()
    )]
    ImageTooSmall {
        path: PathBuf,
        width: u32,
        height: u32,
        target_width: u32,
        target_height: u32,
    },
    #[error("Invalid target size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}
