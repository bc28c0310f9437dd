// Utils compartidos

pub mod constants;
pub mod storage;
pub mod timer;
pub mod clock;
pub mod barcode_ffi;

pub use constants::*;
pub use storage::{KeyValueStorage, BrowserStorage, MemoryStorage, StorageError, save_to_storage, load_from_storage};
pub use timer::{TimerScheduler, TimeoutScheduler, ManualScheduler, AutoHideTimer};
pub use clock::{Clock, BrowserClock, FixedClock};
