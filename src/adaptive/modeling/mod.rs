pub mod state;
pub mod window;

pub use state::StateDetector;
pub use window::{RecentWindow, WindowMetrics};
