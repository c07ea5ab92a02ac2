use std::path::PathBuf;

/// Result alias used across every Deskicons crate.
pub type IconResult<T> = Result<T, IconError>;

/// Every failure the icon tooling can report.
///
/// Each variant is a distinct failure mode so callers can tell a missing
/// desktop control apart from a refused memory copy or a name clash.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("Desktop list view not found: {reason}")]
    ControlNotFound { reason: String },

    #[error("Failed to open process {pid}: {reason}")]
    ProcessOpenFailed { pid: u32, reason: String },

    #[error("Failed to allocate {size} bytes in the remote process: {reason}")]
    RemoteAllocFailed { size: usize, reason: String },

    #[error("Failed to read remote process memory at 0x{address:X}: {reason}")]
    RemoteReadFailed { address: usize, reason: String },

    #[error("Failed to write remote process memory at 0x{address:X}: {reason}")]
    RemoteWriteFailed { address: usize, reason: String },

    #[error("Item count query returned {reply}")]
    ItemCountFailed { reply: isize },

    #[error("Failed to get text of item {index}")]
    ItemTextFailed { index: usize },

    #[error("Failed to get position of item {index}")]
    ItemPositionFailed { index: usize },

    #[error("Text of {units} UTF-16 units (plus terminator) does not fit in a buffer of {capacity}")]
    TextTooLarge { units: usize, capacity: usize },

    #[error("Requested length {length} exceeds the buffer capacity of {capacity}")]
    LengthExceedsCapacity { length: usize, capacity: usize },

    #[error("Length can't be negative (got {length})")]
    NegativeLength { length: isize },

    #[error("Duplicate icon name '{name}' at indices {first} and {second}")]
    DuplicateNameConflict {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("{resource} was already released")]
    AlreadyReleased { resource: &'static str },

    #[error("{resource} used after release")]
    UseAfterRelease { resource: &'static str },

    #[error("Layout file {}: {source}", path.display())]
    LayoutIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid layout data: {source}")]
    LayoutFormat {
        #[from]
        source: serde_json::Error,
    },
}

impl IconError {
    /// Short machine-readable code, shown next to CLI errors.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ControlNotFound { .. } => "CONTROL_NOT_FOUND",
            Self::ProcessOpenFailed { .. } => "PROCESS_OPEN_FAILED",
            Self::RemoteAllocFailed { .. } => "REMOTE_ALLOC_FAILED",
            Self::RemoteReadFailed { .. } => "REMOTE_READ_FAILED",
            Self::RemoteWriteFailed { .. } => "REMOTE_WRITE_FAILED",
            Self::ItemCountFailed { .. } => "ITEM_COUNT_FAILED",
            Self::ItemTextFailed { .. } => "ITEM_TEXT_FAILED",
            Self::ItemPositionFailed { .. } => "ITEM_POSITION_FAILED",
            Self::TextTooLarge { .. } => "TEXT_TOO_LARGE",
            Self::LengthExceedsCapacity { .. } => "LENGTH_EXCEEDS_CAPACITY",
            Self::NegativeLength { .. } => "NEGATIVE_LENGTH",
            Self::DuplicateNameConflict { .. } => "DUPLICATE_NAME_CONFLICT",
            Self::AlreadyReleased { .. } => "ALREADY_RELEASED",
            Self::UseAfterRelease { .. } => "USE_AFTER_RELEASE",
            Self::LayoutIo { .. } => "LAYOUT_IO",
            Self::LayoutFormat { .. } => "LAYOUT_FORMAT",
        }
    }
}
