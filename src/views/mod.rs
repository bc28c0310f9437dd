pub mod app;
pub mod scanner;
pub mod feedback;
pub mod history;

pub use app::render_app;
pub use scanner::{render_scan_panel, PanelActions};
pub use feedback::render_feedback;
pub use history::render_history;
