use std::path::PathBuf;

use crate::body::{FileAttachment, Payload};

/// How a JSON response body is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonDecode {
    /// A dynamic JSON value with field access
    Object,
    /// A string-keyed map of fields
    Map,
}

/// Encoding, decoding and side-effect settings for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BehaviorConfig {
    pub data: Payload,
    pub files: Vec<FileAttachment>,
    pub json_request: bool,
    pub json_response: Option<JsonDecode>,
    pub response_object: bool,
    pub response_array: bool,
    pub debug_log: Option<PathBuf>,
    pub xdebug_session: Option<String>,
    pub contains_file: bool,
    pub save_to: Option<PathBuf>,
}

impl BehaviorConfig {
    /// Register an attachment; a second file under the same key replaces the first
    pub fn add_file(&mut self, file: FileAttachment) {
        match self.files.iter_mut().find(|existing| existing.key == file.key) {
            Some(existing) => *existing = file,
            None => self.files.push(file),
        }
        self.contains_file = true;
    }

    /// Whether the caller asked for a structured result instead of raw content
    #[must_use]
    pub fn wants_structured(&self) -> bool {
        self.response_object || self.response_array
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_replaces_attachment() {
        let mut behavior = BehaviorConfig::default();
        behavior.add_file(FileAttachment::new("doc", "/tmp/a.txt"));
        behavior.add_file(FileAttachment::new("img", "/tmp/b.png"));
        behavior.add_file(FileAttachment::new("doc", "/tmp/c.txt"));

        assert!(behavior.contains_file);
        assert_eq!(behavior.files.len(), 2);
        assert_eq!(behavior.files[0].path, PathBuf::from("/tmp/c.txt"));
    }
}
