//! Guessing how a file is delimited
//!
//! Two sources are consulted: the file extension (`.tsv`, `.psv`) and, on
//! request, the content itself. `.csv` and `.txt` say nothing beyond "some
//! delimited text", so they leave the configured separator alone.

use std::path::Path;

/// Extensions accepted as delimited text
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv", "tsv", "psv", "txt"];

/// Lines looked at by [`detect_delimiter`]
const SAMPLE_LINES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Semicolon,
    Pipe,
    Tab,
}

impl Delimiter {
    /// Candidates in ascending tie-break priority
    const BY_PRIORITY: [Delimiter; 4] = [
        Delimiter::Comma,
        Delimiter::Semicolon,
        Delimiter::Pipe,
        Delimiter::Tab,
    ];

    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Semicolon => ';',
            Delimiter::Pipe => '|',
            Delimiter::Tab => '\t',
        }
    }

    /// Delimiter an extension commits to, if any
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "tsv" | "tab" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Most frequent candidate in the first few lines.
///
/// Ties go to tab, then pipe, then semicolon; text with none of them is
/// taken to be comma separated.
pub fn detect_delimiter(content: &str) -> Delimiter {
    let sample: Vec<&str> = content.lines().take(SAMPLE_LINES).collect();
    let occurrences = |delimiter: Delimiter| -> usize {
        sample
            .iter()
            .map(|line| line.matches(delimiter.as_char()).count())
            .sum()
    };

    Delimiter::BY_PRIORITY
        .into_iter()
        .map(|delimiter| (delimiter, occurrences(delimiter)))
        .filter(|&(_, count)| count > 0)
        .max_by_key(|&(_, count)| count)
        .map(|(delimiter, _)| delimiter)
        .unwrap_or_default()
}

/// Lower-cased extension of `path`, if it has one
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(str::to_lowercase)
}

/// Whether `path` looks like a delimited text file we can import
pub fn is_supported_file(path: &Path) -> bool {
    extension(path).is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}

/// Separator to use for `path`: the one its extension commits to, otherwise
/// `configured`
pub fn separator_for(path: &Path, configured: char) -> char {
    extension(path)
        .and_then(|ext| Delimiter::from_extension(&ext))
        .map_or(configured, Delimiter::as_char)
}

/// Table name derived from a file: its lower-cased stem
pub fn table_name_for(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_lowercase)
}
