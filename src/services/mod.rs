pub mod history_store;
pub mod scanner_service;

pub use history_store::HistoryStore;
pub use scanner_service::{ScanEvents, ScannerService};
