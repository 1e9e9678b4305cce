//! Measurement text sources.

use std::borrow::Cow;
use std::path::Path;

use crate::error::{Result, SourceError};

const UTF8_BOM: char = '\u{feff}';

/// Where measurement text comes from.
#[derive(Debug, Clone, Copy)]
pub enum TextSource<'a> {
    Path(&'a Path),
    Bytes(&'a [u8]),
    Text(&'a str),
}

impl<'a> TextSource<'a> {
    /// Read the full text, validating encoding and emptiness.
    ///
    /// A source with zero bytes is empty; whitespace-only text is not, and
    /// parses to no measurements. A leading UTF-8 BOM is dropped.
    pub fn read(&self) -> Result<Cow<'a, str>> {
        let text = match *self {
            TextSource::Path(path) => {
                let bytes = std::fs::read(path).map_err(|source| SourceError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;
                Cow::Owned(decode(bytes)?)
            }
            TextSource::Bytes(bytes) => {
                if bytes.is_empty() {
                    return Err(SourceError::Empty);
                }
                Cow::Borrowed(std::str::from_utf8(bytes).map_err(|_| SourceError::NotUtf8)?)
            }
            TextSource::Text(text) => Cow::Borrowed(text),
        };
        if text.is_empty() {
            return Err(SourceError::Empty);
        }
        Ok(strip_bom(text))
    }

    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            TextSource::Path(path) => path.display().to_string(),
            TextSource::Bytes(bytes) => format!("<{} bytes>", bytes.len()),
            TextSource::Text(text) => format!("<{} chars>", text.chars().count()),
        }
    }
}

impl<'a> From<&'a Path> for TextSource<'a> {
    fn from(path: &'a Path) -> Self {
        TextSource::Path(path)
    }
}

impl<'a> From<&'a str> for TextSource<'a> {
    fn from(text: &'a str) -> Self {
        TextSource::Text(text)
    }
}

impl<'a> From<&'a [u8]> for TextSource<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        TextSource::Bytes(bytes)
    }
}

fn decode(bytes: Vec<u8>) -> Result<String> {
    if bytes.is_empty() {
        return Err(SourceError::Empty);
    }
    String::from_utf8(bytes).map_err(|_| SourceError::NotUtf8)
}

fn strip_bom(text: Cow<'_, str>) -> Cow<'_, str> {
    match text {
        Cow::Borrowed(text) => Cow::Borrowed(text.strip_prefix(UTF8_BOM).unwrap_or(text)),
        Cow::Owned(text) => match text.strip_prefix(UTF8_BOM) {
            Some(rest) => Cow::Owned(rest.to_string()),
            None => Cow::Owned(text),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_are_rejected() {
        assert!(matches!(TextSource::Text("").read(), Err(SourceError::Empty)));
        assert!(matches!(TextSource::Bytes(b"").read(), Err(SourceError::Empty)));
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let bytes: &[u8] = &[b'A', b':', b' ', 0xff, 0xfe];
        assert!(matches!(TextSource::Bytes(bytes).read(), Err(SourceError::NotUtf8)));
    }

    #[test]
    fn bom_is_stripped() {
        let bytes = "\u{feff}A: 50.1\n".as_bytes();
        assert_eq!(TextSource::Bytes(bytes).read().unwrap(), "A: 50.1\n");
    }

    #[test]
    fn whitespace_only_is_not_empty() {
        assert_eq!(TextSource::Text("  \n").read().unwrap(), "  \n");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.txt");
        let err = TextSource::Path(&missing).read().unwrap_err();
        assert!(matches!(err, SourceError::FileRead { .. }));
        assert!(
            err.to_diagnostic()
                .message()
                .starts_with("Error: Cannot read file - ")
        );
    }
}
