//! Certification document uploads

use std::path::Path;

/// 5 MiB
pub const MAX_CERTIFICATION_BYTES: u64 = 5 * 1024 * 1024;

pub const ALLOWED_CERTIFICATION_EXTENSIONS: [&str; 4] = ["pdf", "png", "jpg", "jpeg"];

/// Metadata of an uploaded certification file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationUpload {
    /// Original file name as sent by the client
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
}

impl CertificationUpload {
    pub fn new(file_name: impl Into<String>, size: u64) -> Self {
        Self {
            file_name: file_name.into(),
            size,
        }
    }

    /// Lowercased extension, empty when the name has none
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(CertificationUpload::new("Licence.PDF", 10).extension(), "pdf");
        assert_eq!(CertificationUpload::new("photo.final.JpEg", 10).extension(), "jpeg");
    }

    #[test]
    fn missing_extension_is_empty() {
        assert_eq!(CertificationUpload::new("README", 10).extension(), "");
        assert_eq!(CertificationUpload::new(".hidden", 10).extension(), "");
    }
}
