use mime::Mime;

use crate::message::{IntoBody, SinglePart};

/// A file attachment part
///
/// The resulting part carries a `Content-Disposition: attachment` header
/// with the given filename. Content is never sniffed; callers pick the
/// content type (generic binary in most cases).
#[derive(Debug, Clone)]
pub struct Attachment {
    filename: String,
}

impl Attachment {
    /// Creates a new attachment with the given filename
    pub fn new(filename: String) -> Self {
        Attachment { filename }
    }

    /// Build the attachment part from its content
    pub fn body<T: IntoBody>(self, content: T, content_type: Mime) -> SinglePart {
        SinglePart::builder()
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .content_type(&content_type)
            .body(content)
    }
}
