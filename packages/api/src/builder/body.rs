//! Request payload and file attachments
//!
//! The payload is stored as given and encoded when a terminal method runs:
//! into the query string for GET-style requests, or into the request body for
//! POST-style requests.

use std::path::PathBuf;

use cekmutasi_client::{FileAttachment, Payload, Result};
use serde::Serialize;

use crate::builder::core::RequestBuilder;

impl RequestBuilder {
    /// Set the request payload, replacing any previous one
    ///
    /// # Arguments
    /// * `data` - Fields (pairs, a JSON object) or an already-encoded string
    ///
    /// # Returns
    /// `Self` for method chaining
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    ///
    /// let response = RequestBuilder::new()
    ///     .to("https://api.example.com/search")
    ///     .with_data([("page", 2), ("limit", 50)])
    ///     .get();
    /// ```
    #[must_use]
    pub fn with_data(mut self, data: impl Into<Payload>) -> Self {
        self.behavior.data = data.into();
        self
    }

    /// Set the request payload from a serializable struct or map
    ///
    /// # Errors
    ///
    /// Fails when `fields` does not serialize to a JSON object.
    ///
    /// # Examples
    /// ```no_run
    /// use cekmutasi::RequestBuilder;
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Login<'a> {
    ///     username: &'a str,
    ///     remember: bool,
    /// }
    ///
    /// let builder = RequestBuilder::new()
    ///     .to("https://api.example.com/login")
    ///     .with_fields(&Login { username: "budi", remember: true })?;
    /// # Ok::<(), cekmutasi::Error>(())
    /// ```
    pub fn with_fields<T: Serialize + ?Sized>(self, fields: &T) -> Result<Self> {
        Ok(self.with_data(Payload::from_serialize(fields)?))
    }

    /// Attach a file under `key`; the request is sent as multipart form data
    #[must_use]
    pub fn with_file(self, key: &str, path: impl Into<PathBuf>) -> Self {
        self.attach(FileAttachment::new(key, path))
    }

    /// Attach a file with an explicit MIME type and upload name
    #[must_use]
    pub fn with_file_as(
        self,
        key: &str,
        path: impl Into<PathBuf>,
        mime_type: Option<&str>,
        file_name: Option<&str>,
    ) -> Self {
        let mut file = FileAttachment::new(key, path);
        file.mime_type = mime_type.map(str::to_string);
        file.file_name = file_name.map(str::to_string);
        self.attach(file)
    }

    /// Send the payload as multipart form data even without attachments
    #[must_use]
    pub fn contains_file(mut self) -> Self {
        self.behavior.contains_file = true;
        self
    }

    fn attach(mut self, file: FileAttachment) -> Self {
        if self.debug_enabled() {
            log::debug!("cekmutasi builder: attach {} as {}", file.path.display(), file.key);
        }
        self.behavior.add_file(file);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn data_is_replaced_not_merged() {
        let builder = RequestBuilder::new()
            .with_data([("a", 1)])
            .with_data([("b", 2)]);
        assert_eq!(builder.behavior().data, Payload::from(json!({ "b": 2 })));
    }

    #[test]
    fn attaching_marks_multipart() {
        let builder = RequestBuilder::new().with_file_as("doc", "/tmp/a.pdf", Some("application/pdf"), None);
        let behavior = builder.behavior();
        assert!(behavior.contains_file);
        assert_eq!(behavior.files[0].mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(behavior.files[0].file_name, None);
    }

    #[test]
    fn serializable_fields() {
        #[derive(Serialize)]
        struct Filter {
            status: &'static str,
            page: u32,
        }

        let builder = RequestBuilder::new()
            .with_fields(&Filter { status: "active", page: 1 })
            .expect("object payload");
        assert_eq!(builder.behavior().data.pairs(), vec![
            ("status".to_string(), "active".to_string()),
            ("page".to_string(), "1".to_string()),
        ]);
    }
}
