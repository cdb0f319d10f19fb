pub mod build;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

/// Expand an input path into the list of `.jack` files it denotes: the file
/// itself, or every `.jack` file directly inside a directory (spec.md §6
/// Input resolution). Directory entries are walked in sorted order so
/// output is reproducible across runs.
pub(crate) fn resolve_jack_files(input: &Path) -> std::io::Result<Vec<PathBuf>> {
    if input.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(input)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some("jack"))
            .collect();
        files.sort();
        Ok(files)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}
