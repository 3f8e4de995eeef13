//! Upload rules: allowed content types and size caps per kind of file.
//!
//! Files are checked against these rules before anything is written to storage
//! or the database.

use crate::service::{AppError, ServiceResult};

const MB: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub struct UploadRule {
    /// Human-readable name used in error messages.
    pub label: &'static str,
    pub max_bytes: usize,
    /// Accepted MIME types and the file extension each one is stored under.
    pub allowed: &'static [(&'static str, &'static str)],
}

pub const RESUME: UploadRule = UploadRule {
    label: "Resume",
    max_bytes: 2 * MB,
    allowed: &[
        ("application/pdf", "pdf"),
        ("application/msword", "doc"),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "docx",
        ),
    ],
};

pub const IMAGE: UploadRule = UploadRule {
    label: "Image",
    max_bytes: 5 * MB,
    allowed: &[
        ("image/jpeg", "jpg"),
        ("image/jpg", "jpg"),
        ("image/png", "png"),
        ("image/webp", "webp"),
        ("image/gif", "gif"),
    ],
};

impl UploadRule {
    /// Checks a file and returns the extension to store it under.
    pub fn check(&self, content_type: Option<&str>, size: usize) -> ServiceResult<&'static str> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
            .ok_or_else(|| AppError::validation(format!("{} file type is missing", self.label)))?;

        let ext = self
            .allowed
            .iter()
            .find(|(m, _)| *m == mime)
            .map(|(_, ext)| *ext)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "{} type '{mime}' is not allowed",
                    self.label
                ))
            })?;

        if size == 0 {
            return Err(AppError::validation(format!("{} file is empty", self.label)));
        }
        if size > self.max_bytes {
            return Err(AppError::validation(format!(
                "{} must be at most {}MB",
                self.label,
                self.max_bytes / MB
            )));
        }
        Ok(ext)
    }
}
