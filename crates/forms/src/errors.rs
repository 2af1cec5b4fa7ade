use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("schema parse error: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("unknown field id: {0}")]
    UnknownField(String),

    #[error("field {0} does not take file uploads")]
    NotAnUploadField(String),

    #[error("{file}: type {content_type} is not accepted by {field}")]
    UnsupportedFileType {
        field: String,
        file: String,
        content_type: String,
    },

    #[error("{file}: {size} bytes exceeds the {max_size} byte limit of {field}")]
    FileTooLarge {
        field: String,
        file: String,
        size: u64,
        max_size: u64,
    },
}
