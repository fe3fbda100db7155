use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::error::FrameMapError;

/// Texture id that standard frame maps use in place of the real character texture.
pub const DEFAULT_PLACEHOLDER: &str = "1_jud8h";

/// Lines `[0, 4)` belong to the character file and are never replaced.
pub const HEADER_LINE_COUNT: usize = 4;
/// Third line of the character file holds the texture `ext_resource`.
pub const TEXTURE_ID_LINE_INDEX: usize = 2;
pub const MIN_LINE_COUNT: usize = HEADER_LINE_COUNT + 1;

const PREVIEW_LINE_COUNT: usize = 5;

lazy_static! {
    // the space matters, `uid="..."` must not match
    static ref TEXTURE_ID_RE: Regex = Regex::new(r#" id="([^"]+)""#).unwrap();
}

/// One input file already loaded into memory.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub path: &'a Path,
    pub text: &'a str,
}

impl<'a> Document<'a> {
    pub fn new(path: &'a Path, text: &'a str) -> Self {
        Self { path, text }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFrameMap {
    pub content: String,
    pub texture_id: String,
    /// Placeholder occurrences replaced in the frame data that ends up in `content`.
    pub replaced: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameMapReport {
    pub texture_id: String,
    pub replaced: usize,
    /// False when the character file already had the merged content.
    pub changed: bool,
}

/// Splits on `\n` and keeps the terminators, so `\r\n` files come back byte-for-byte.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Finds the first ` id="..."` attribute on a line.
pub fn extract_texture_id(line: &str) -> Option<&str> {
    TEXTURE_ID_RE
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

fn check_line_count(document: &Document, lines: &[&str]) -> Result<(), FrameMapError> {
    if lines.len() < MIN_LINE_COUNT {
        return Err(FrameMapError::TooFewLines {
            path: document.path.to_path_buf(),
            have: lines.len(),
            need: MIN_LINE_COUNT,
        });
    }

    Ok(())
}

/// Keeps the character header and appends the standard frame data with the placeholder
/// swapped for the character texture id.
///
/// Nothing is written here. Every validation failure happens before the caller touches
/// the character file.
pub fn merge_frame_map(
    template: Document,
    target: Document,
    placeholder: &str,
) -> Result<MergedFrameMap, FrameMapError> {
    if placeholder.is_empty() {
        return Err(FrameMapError::EmptyPlaceholder);
    }

    let target_lines = split_lines(target.text);

    debug!(
        "First {} lines of {}:",
        PREVIEW_LINE_COUNT,
        target.path.display()
    );
    for (idx, line) in target_lines.iter().take(PREVIEW_LINE_COUNT).enumerate() {
        debug!("{}: {}", idx + 1, line.trim());
    }

    check_line_count(&target, &target_lines)?;

    let id_line = target_lines[TEXTURE_ID_LINE_INDEX].trim();
    debug!("Line with ID: {}", id_line);

    let Some(texture_id) = extract_texture_id(id_line) else {
        return Err(FrameMapError::MissingTextureId {
            line: id_line.to_string(),
        });
    };
    debug!("Extracted Texture ID: {}", texture_id);

    let template_lines = split_lines(template.text);
    check_line_count(&template, &template_lines)?;

    let replaced = template_lines[HEADER_LINE_COUNT..]
        .iter()
        .map(|line| line.matches(placeholder).count())
        .sum();

    // whole template gets substituted, only the frame data is kept
    let template_modified: Vec<String> = template_lines
        .iter()
        .map(|line| line.replace(placeholder, texture_id))
        .collect();

    let mut content = target_lines[..HEADER_LINE_COUNT].concat();
    content.push_str(&template_modified[HEADER_LINE_COUNT..].concat());

    Ok(MergedFrameMap {
        content,
        texture_id: texture_id.to_string(),
        replaced,
    })
}

fn read_document(path: &Path) -> Result<String, FrameMapError> {
    fs::read_to_string(path).map_err(|source| FrameMapError::IOError {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document(path: &Path, content: &str) -> Result<(), FrameMapError> {
    let to_io_err = |source| FrameMapError::IOError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(to_io_err)?;

    file.write_all(content.as_bytes()).map_err(to_io_err)?;
    file.flush().map_err(to_io_err)?;

    Ok(())
}

/// Rewrites a character `.tres` in place from a standard frame map.
pub struct FrameMap {
    template_path: PathBuf,
    target_path: PathBuf,
    placeholder: String,
}

impl FrameMap {
    pub fn new(
        template_path: impl AsRef<Path> + Into<PathBuf>,
        target_path: impl AsRef<Path> + Into<PathBuf>,
    ) -> Self {
        Self {
            template_path: template_path.into(),
            target_path: target_path.into(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }

    pub fn placeholder(&mut self, placeholder: &str) -> &mut Self {
        self.placeholder = placeholder.to_string();

        self
    }

    /// Reads both files, merges, then overwrites the character file.
    ///
    /// The overwrite is not atomic. A failed write can leave the character file truncated.
    pub fn apply(&self) -> Result<FrameMapReport, FrameMapError> {
        let target_text = read_document(&self.target_path)?;
        let template_text = read_document(&self.template_path)?;

        let MergedFrameMap {
            content,
            texture_id,
            replaced,
        } = merge_frame_map(
            Document::new(&self.template_path, &template_text),
            Document::new(&self.target_path, &target_text),
            &self.placeholder,
        )?;

        write_document(&self.target_path, &content)?;

        Ok(FrameMapReport {
            texture_id,
            replaced,
            changed: content != target_text,
        })
    }
}

pub fn apply_frame_map(
    template_path: impl AsRef<Path> + Into<PathBuf>,
    target_path: impl AsRef<Path> + Into<PathBuf>,
) -> Result<FrameMapReport, FrameMapError> {
    FrameMap::new(template_path, target_path).apply()
}
