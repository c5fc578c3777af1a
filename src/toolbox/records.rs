//! Record iteration over Toolbox files.
//!
//! Records are delimited by occurrences of the record marker (`\ref` by
//! default): each record spans from one marker to the next, the last one to
//! the end of the file. Everything before the first marker is preamble and
//! never surfaces. A file without any marker yields no records.

use std::fmt;
use std::fs::File;
use std::io;
use std::ops::Range;
use std::path::Path;

use memmap2::Mmap;

/// Errors opening a Toolbox file.
#[derive(Debug)]
pub enum ToolboxError {
    Io(io::Error),
    /// The record marker does not form a valid search pattern.
    Marker(regex::Error),
}

impl fmt::Display for ToolboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolboxError::Io(err) => write!(f, "cannot read toolbox file: {}", err),
            ToolboxError::Marker(err) => write!(f, "invalid record marker: {}", err),
        }
    }
}

impl std::error::Error for ToolboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ToolboxError::Io(err) => Some(err),
            ToolboxError::Marker(err) => Some(err),
        }
    }
}

impl From<io::Error> for ToolboxError {
    fn from(err: io::Error) -> ToolboxError {
        ToolboxError::Io(err)
    }
}

impl From<regex::Error> for ToolboxError {
    fn from(err: regex::Error) -> ToolboxError {
        ToolboxError::Marker(err)
    }
}

#[derive(Debug)]
enum Source {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl AsRef<[u8]> for Source {
    fn as_ref(&self) -> &[u8] {
        match self {
            Source::Mapped(map) => map.as_ref(),
            Source::Owned(bytes) => bytes.as_ref(),
        }
    }
}

/// One opened Toolbox file with its record boundaries resolved.
///
/// Boundary resolution scans the raw bytes once; record content is decoded
/// lazily, one record at a time, when requested.
#[derive(Debug)]
pub struct ToolboxFile {
    source: Source,
    spans: Vec<Range<usize>>,
}

impl ToolboxFile {
    /// Memory-maps the file at `path` and locates records by `marker`
    /// (the field-marker name without its backslash).
    pub fn open(path: &Path, marker: &str) -> Result<ToolboxFile, ToolboxError> {
        let file = File::open(path)?;
        // Safety: the map is read-only and lives as long as this value;
        // transcripts are not rewritten while being parsed.
        let map = unsafe { Mmap::map(&file)? };
        ToolboxFile::from_source(Source::Mapped(map), marker)
    }

    /// Builds record boundaries over an in-memory buffer.
    pub fn from_bytes(bytes: Vec<u8>, marker: &str) -> Result<ToolboxFile, ToolboxError> {
        ToolboxFile::from_source(Source::Owned(bytes), marker)
    }

    fn from_source(source: Source, marker: &str) -> Result<ToolboxFile, ToolboxError> {
        let pattern = format!(r"\\{}", regex::escape(marker));
        let marker_regex = regex::bytes::Regex::new(&pattern)?;

        let data = source.as_ref();
        let starts: Vec<usize> = marker_regex.find_iter(data).map(|m| m.start()).collect();
        let spans = starts
            .iter()
            .enumerate()
            .map(|(at, &start)| {
                let end = starts.get(at + 1).copied().unwrap_or(data.len());
                start..end
            })
            .collect();

        Ok(ToolboxFile { source, spans })
    }

    /// Number of records in the file.
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Decodes the record at `at`; invalid UTF-8 is replaced, not fatal.
    pub fn record_text(&self, at: usize) -> Option<String> {
        let span = self.spans.get(at)?.clone();
        let bytes = &self.source.as_ref()[span];
        Some(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn records(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.len()).filter_map(|at| self.record_text(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_from(text: &str) -> ToolboxFile {
        ToolboxFile::from_bytes(text.as_bytes().to_vec(), "ref").unwrap()
    }

    #[test]
    fn test_record_split() {
        let toolbox = file_from(
            "\\_sh v3.0 400 Text\n\n\
             \\ref session.001\n\\tx peiskasina okaoka\n\\eng the pig is waiting\n\n\
             \\ref session.002\n\\tx harenuna\n",
        );
        assert_eq!(toolbox.len(), 2);
        let first = toolbox.record_text(0).unwrap();
        assert!(first.starts_with("\\ref session.001"));
        assert!(first.contains("\\eng the pig is waiting"));
        let second = toolbox.record_text(1).unwrap();
        assert!(second.starts_with("\\ref session.002"));
        assert!(second.ends_with("\\tx harenuna\n"));
    }

    #[test]
    fn test_preamble_is_skipped() {
        let toolbox = file_from("\\_sh v3.0 400 Text\n\\ref a.1\n\\tx ha\n");
        assert_eq!(toolbox.len(), 1);
        assert!(toolbox.record_text(0).unwrap().starts_with("\\ref a.1"));
    }

    #[test]
    fn test_no_marker_yields_nothing() {
        let toolbox = file_from("\\_sh v3.0 400 Text\n\\tx stray line\n");
        assert!(toolbox.is_empty());
        assert_eq!(toolbox.records().count(), 0);
    }

    #[test]
    fn test_custom_marker() {
        let toolbox =
            ToolboxFile::from_bytes(b"\\utt one\n\\utt two\n".to_vec(), "utt").unwrap();
        assert_eq!(toolbox.len(), 2);
    }
}
