use std::path::Path;

use crate::errors::GenerationError;

/// Encoded rows held in memory until the single flush.
#[derive(Debug, Clone)]
pub struct Dataset {
    delimiter: u8,
    lines: Vec<String>,
}

impl Dataset {
    /// `sep` must be ASCII; config validation guarantees it.
    pub fn new(sep: char) -> Self {
        Self {
            delimiter: u8::try_from(sep).unwrap_or(b','),
            lines: Vec::new(),
        }
    }

    pub fn push_record<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<(), GenerationError> {
        let line = encode_record(self.delimiter, fields)?;
        self.lines.push(line);
        Ok(())
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// All lines joined by `\n`, without a trailing newline.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// One record joined by `delimiter`. Fields that contain the delimiter, a
/// quote or a line break are quoted.
pub fn encode_record<S: AsRef<str>>(delimiter: u8, fields: &[S]) -> Result<String, GenerationError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields.iter().map(|field| field.as_ref()))?;
    let bytes = writer.into_inner().map_err(|err| err.into_error())?;

    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    if line.ends_with('\n') {
        line.pop();
    }
    Ok(line)
}

/// Writes the dataset in one call, replacing any existing file. Returns the
/// number of bytes written.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<u64, GenerationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let text = dataset.to_text();
    std::fs::write(path, text.as_bytes())?;
    Ok(text.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_joined_without_trailing_separator() {
        let line = encode_record(b'|', &["abc", "de"]).expect("encode");
        assert_eq!(line, "abc|de");
    }

    #[test]
    fn fields_containing_the_separator_are_quoted() {
        let line = encode_record(b',', &["(1.5, 2.5)", "plain"]).expect("encode");
        assert_eq!(line, "\"(1.5, 2.5)\",plain");
    }

    #[test]
    fn dataset_text_has_no_trailing_newline() {
        let mut dataset = Dataset::new(';');
        dataset.push_record(&["a", "b"]).expect("header");
        dataset.push_record(&["1", "2"]).expect("row");
        assert_eq!(dataset.to_text(), "a;b\n1;2");
    }
}
