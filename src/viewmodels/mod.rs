pub mod scan_session_viewmodel;

pub use scan_session_viewmodel::{ScanSessionViewModel, BrowserScanViewModel, ScanTimings};
