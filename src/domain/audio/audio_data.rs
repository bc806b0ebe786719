//! Audio payload value object

use std::fmt;

/// Audio MIME types accepted at the upload boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Wav,
    Mp3,
    Webm,
    Ogg,
    M4a,
    Flac,
    Mp4,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::M4a => "audio/mp4",
            Self::Flac => "audio/flac",
            Self::Mp4 => "audio/mp4",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::M4a => "m4a",
            Self::Flac => "flac",
            Self::Mp4 => "mp4",
        }
    }

    /// Detect the MIME type from a lowercase file extension.
    ///
    /// Returns `None` for extensions outside the accepted upload set.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "wav" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "webm" => Some(Self::Webm),
            "ogg" => Some(Self::Ogg),
            "m4a" => Some(Self::M4a),
            "flac" => Some(Self::Flac),
            "mp4" => Some(Self::Mp4),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioMimeType {
    fn default() -> Self {
        Self::Wav
    }
}

/// Value object representing an audio payload.
/// Contains raw audio bytes and their MIME type.
#[derive(Debug, Clone)]
pub struct AudioData {
    data: Vec<u8>,
    mime_type: AudioMimeType,
}

impl AudioData {
    /// Create AudioData from raw bytes
    pub fn new(data: Vec<u8>, mime_type: AudioMimeType) -> Self {
        Self { data, mime_type }
    }

    /// Create AudioData from a byte slice
    pub fn from_bytes(data: &[u8], mime_type: AudioMimeType) -> Self {
        Self {
            data: data.to_vec(),
            mime_type,
        }
    }

    /// Get the raw audio data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw audio data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Get the MIME type
    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload holds no bytes at all
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_as_str() {
        assert_eq!(AudioMimeType::Wav.as_str(), "audio/wav");
        assert_eq!(AudioMimeType::Mp3.as_str(), "audio/mpeg");
        assert_eq!(AudioMimeType::Webm.as_str(), "audio/webm");
    }

    #[test]
    fn mime_type_extension() {
        assert_eq!(AudioMimeType::Wav.extension(), "wav");
        assert_eq!(AudioMimeType::Ogg.extension(), "ogg");
        assert_eq!(AudioMimeType::M4a.extension(), "m4a");
    }

    #[test]
    fn from_extension_accepts_upload_set() {
        for ext in ["wav", "mp3", "webm", "ogg", "m4a", "flac", "mp4"] {
            assert!(AudioMimeType::from_extension(ext).is_some(), "{ext}");
        }
    }

    #[test]
    fn from_extension_rejects_unknown() {
        assert!(AudioMimeType::from_extension("txt").is_none());
        assert!(AudioMimeType::from_extension("aiff").is_none());
        assert!(AudioMimeType::from_extension("").is_none());
    }

    #[test]
    fn audio_data_size() {
        let data = AudioData::new(vec![0u8; 1024], AudioMimeType::Wav);
        assert_eq!(data.size_bytes(), 1024);
        assert!(!data.is_empty());
    }

    #[test]
    fn empty_audio_data() {
        let data = AudioData::new(Vec::new(), AudioMimeType::Webm);
        assert!(data.is_empty());
    }

    #[test]
    fn human_readable_size_bytes() {
        let data = AudioData::new(vec![0u8; 500], AudioMimeType::Wav);
        assert_eq!(data.human_readable_size(), "500 B");
    }

    #[test]
    fn human_readable_size_kb() {
        let data = AudioData::new(vec![0u8; 2048], AudioMimeType::Wav);
        assert_eq!(data.human_readable_size(), "2.0 KB");
    }

    #[test]
    fn human_readable_size_mb() {
        let data = AudioData::new(vec![0u8; 2 * 1024 * 1024], AudioMimeType::Wav);
        assert_eq!(data.human_readable_size(), "2.0 MB");
    }

    #[test]
    fn from_bytes() {
        let bytes = [1u8, 2, 3, 4];
        let data = AudioData::from_bytes(&bytes, AudioMimeType::Mp3);
        assert_eq!(data.data(), &[1, 2, 3, 4]);
        assert_eq!(data.mime_type(), AudioMimeType::Mp3);
    }

    #[test]
    fn default_mime_type_is_wav() {
        assert_eq!(AudioMimeType::default(), AudioMimeType::Wav);
    }
}
