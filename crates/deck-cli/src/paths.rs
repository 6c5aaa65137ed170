use std::path::{Path, PathBuf};

/// `<stem>_shuffled.<ext>` next to `deck`.
pub fn default_output_path(deck: &Path) -> PathBuf {
    let stem = deck
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    let name = match deck.extension() {
        Some(ext) => format!("{stem}_shuffled.{}", ext.to_string_lossy()),
        None => format!("{stem}_shuffled"),
    };
    deck.with_file_name(name)
}
