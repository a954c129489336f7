use thiserror::Error;

/// Centralized error types for the application
///
/// Every failure the avatar pipeline can produce is converted to this enum
/// so handlers can turn each one into a single user-facing reply. None of
/// these are fatal to the process; a failure is always scoped to the one
/// request that triggered it.
#[derive(Error, Debug)]
pub enum AppError {
    /// A photo arrived before the user picked an avatar category
    #[error("no selection stored for user {0}")]
    SelectionMissing(i64),

    /// The chosen selection has no overlay file in the catalog
    #[error("overlay asset not found: {0}")]
    AssetNotFound(String),

    /// The user sent an attachment that is not an image
    #[error("unsupported attachment type: {0}")]
    UnsupportedAttachment(String),

    /// The submitted bytes are not a decodable raster image
    #[error("image decode error: {0}")]
    Decode(image::ImageError),

    /// PNG encoding of the composite failed
    #[error("image encode error: {0}")]
    Encode(image::ImageError),

    /// IO errors (catalog reads, CLI file access)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
