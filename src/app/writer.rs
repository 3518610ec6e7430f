use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{Seek, SeekFrom, Write};
use std::path::Path;

use crate::app::error::ScrapeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriterState {
    Empty,
    HasElements,
}

/// Appends records to a JSON array one at a time, without ever holding more
/// than one serialized record in memory. Every element is followed by a
/// `,\n` separator; `finalize` turns the trailing separator into the closing
/// bracket, or emits the bracket directly when nothing was written.
pub struct JsonArrayWriter {
    file: File,
    state: WriterState,
}

/// Byte length of the `,\n` written after each element.
const SEPARATOR_LEN: i64 = 2;

impl JsonArrayWriter {
    pub fn create(path: &Path) -> Result<Self, ScrapeError> {
        let mut file = File::create(path)?;
        file.write_all(b"[\n")?;
        Ok(Self {
            file,
            state: WriterState::Empty,
        })
    }

    /// Serializes one record with tab indentation and appends it.
    pub fn append<T: Serialize>(&mut self, record: &T) -> Result<(), ScrapeError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"\t");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        record
            .serialize(&mut serializer)
            .map_err(std::io::Error::other)?;
        self.file.write_all(&buf)?;
        self.file.write_all(b",\n")?;
        self.state = WriterState::HasElements;
        Ok(())
    }

    /// Closes the array. Must be called exactly once; dropping the writer
    /// without finalizing leaves the file unterminated.
    pub fn finalize(mut self) -> Result<(), ScrapeError> {
        match self.state {
            WriterState::Empty => self.file.write_all(b"\n]")?,
            WriterState::HasElements => {
                self.file.seek(SeekFrom::Current(-SEPARATOR_LEN))?;
                self.file.write_all(b"\n]")?;
            }
        }
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use std::path::PathBuf;

    struct TempPath(PathBuf);

    impl TempPath {
        fn new(tag: &str) -> Self {
            Self(std::env::temp_dir().join(format!(
                "regchula_writer_{tag}_{}.json",
                std::process::id()
            )))
        }
    }

    impl Drop for TempPath {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn written(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    #[test]
    fn zero_records_is_a_valid_empty_array() {
        let path = TempPath::new("empty");
        let writer = JsonArrayWriter::create(&path.0).unwrap();
        writer.finalize().unwrap();
        let text = written(&path.0);
        assert_eq!(text, "[\n\n]");
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!([]));
    }

    #[test]
    fn appended_records_parse_back() {
        let path = TempPath::new("many");
        let mut writer = JsonArrayWriter::create(&path.0).unwrap();
        for i in 0..3 {
            writer.append(&json!({"id": i, "name": format!("course {i}")})).unwrap();
        }
        writer.finalize().unwrap();
        let text = written(&path.0);
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 3);
        assert_eq!(parsed[2]["name"], "course 2");
        // Framing: opening bracket plus newline, newline plus closing bracket,
        // no trailing comma.
        assert!(text.starts_with("[\n"));
        assert!(text.ends_with("\n]"));
        assert!(!text.contains(",\n]"));
    }

    #[test]
    fn records_are_tab_indented() {
        let path = TempPath::new("tabs");
        let mut writer = JsonArrayWriter::create(&path.0).unwrap();
        writer.append(&json!({"a": 1})).unwrap();
        writer.finalize().unwrap();
        assert!(written(&path.0).contains("\n\t\"a\": 1"));
    }

    #[test]
    fn output_is_byte_stable_across_runs() {
        let record = json!({"id": "1234567", "credit": 3.0, "note": null});
        let render = |tag: &str| {
            let path = TempPath::new(tag);
            let mut writer = JsonArrayWriter::create(&path.0).unwrap();
            writer.append(&record).unwrap();
            writer.finalize().unwrap();
            written(&path.0)
        };
        assert_eq!(render("stable_a"), render("stable_b"));
    }
}
