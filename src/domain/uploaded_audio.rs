/// An audio upload exactly as the client sent it.
///
/// Filename and content type are hints only; both are lower-cased on
/// construction so format detection can match them directly.
#[derive(Debug, Clone)]
pub struct UploadedAudio {
    data: Vec<u8>,
    filename: String,
    content_type: String,
}

impl UploadedAudio {
    pub fn new(data: Vec<u8>, filename: Option<&str>, content_type: Option<&str>) -> Self {
        Self {
            data,
            filename: filename.unwrap_or_default().trim().to_lowercase(),
            content_type: content_type.unwrap_or_default().trim().to_lowercase(),
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
