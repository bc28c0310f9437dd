pub mod scan;
pub mod session;
pub mod format;

pub use scan::{ScanRecord, ScanMode, DetectedCode};
pub use session::{SessionMode, SessionState, FeedbackKind};
pub use format::{BarcodeFormat, ScannerConfig};
