use std::fmt;

/// Container formats handed to the external transcoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressedCodec {
    Mp3,
    Ogg,
    Opus,
    Webm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Wav,
    Compressed(CompressedCodec),
    Unsupported,
}

const WAV_MIMES: &[&str] = &["audio/wav", "audio/x-wav", "audio/wave", "audio/vnd.wave"];
const WAV_EXTENSIONS: &[&str] = &[".wav", ".wave"];

impl CompressedCodec {
    pub const ALL: [CompressedCodec; 4] = [Self::Mp3, Self::Opus, Self::Ogg, Self::Webm];

    fn mimes(&self) -> &'static [&'static str] {
        match self {
            Self::Mp3 => &["audio/mpeg", "audio/mp3"],
            Self::Ogg => &["audio/ogg", "application/ogg"],
            Self::Opus => &["audio/opus"],
            Self::Webm => &["audio/webm", "video/webm"],
        }
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Mp3 => &[".mp3"],
            Self::Ogg => &[".ogg", ".oga"],
            Self::Opus => &[".opus"],
            Self::Webm => &[".webm"],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Ogg => "ogg",
            Self::Opus => "opus",
            Self::Webm => "webm",
        }
    }

    fn matches(&self, filename: &str, content_type: &str) -> bool {
        matches_any(filename, content_type, self.mimes(), self.extensions())
    }
}

impl AudioFormat {
    /// Classifies an upload from its declared filename and content type.
    ///
    /// WAV wins over every compressed format; nothing is guessed from the
    /// bytes themselves.
    pub fn classify(filename: &str, content_type: &str) -> Self {
        let filename = filename.trim().to_lowercase();
        let content_type = content_type.trim().to_lowercase();

        if matches_any(&filename, &content_type, WAV_MIMES, WAV_EXTENSIONS) {
            return Self::Wav;
        }

        CompressedCodec::ALL
            .into_iter()
            .find(|codec| codec.matches(&filename, &content_type))
            .map(Self::Compressed)
            .unwrap_or(Self::Unsupported)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wav => write!(f, "wav"),
            Self::Compressed(codec) => write!(f, "{}", codec.as_str()),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

fn matches_any(filename: &str, content_type: &str, mimes: &[&str], extensions: &[&str]) -> bool {
    mimes.iter().any(|m| content_type.contains(m))
        || extensions.iter().any(|ext| filename.ends_with(ext))
}
