use std::{
    fs,
    path::{Path, PathBuf},
};

/// Lists regular files in `path` whose extension matches `ext`, ignoring ASCII case.
///
/// Sorted by path so batch jobs always visit files in the same order.
pub fn find_files_with_ext_in_folder(path: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let rd = fs::read_dir(path)?;
    let paths = rd.filter_map(|path| path.ok()).map(|path| path.path());
    let mut ext_paths: Vec<PathBuf> = paths
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|path_ext| path_ext.to_str())
                .is_some_and(|path_ext| path_ext.eq_ignore_ascii_case(ext))
        })
        .collect();

    ext_paths.sort();

    Ok(ext_paths)
}

/// Joins `relative` onto `root` unless it is already absolute.
pub fn relative_to_less_relative(root: &Path, relative: &Path) -> PathBuf {
    if relative.is_absolute() {
        relative.to_path_buf()
    } else {
        root.join(relative)
    }
}

/// Strips a leading dot so `.png` and `png` mean the same extension.
pub fn normalize_extension(ext: &str) -> &str {
    ext.trim_start_matches('.')
}

#[macro_export]
macro_rules! err {
    ($e: ident) => {{
        use eyre::eyre;

        Err(eyre!($e))
    }};

    ($format_string: literal) => {{
        use eyre::eyre;

        Err(eyre!($format_string))
    }};

    ($($arg:tt)*) => {{
        use eyre::eyre;

        Err(eyre!($($arg)*))
    }};
}
