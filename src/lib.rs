// Export modules for use in tests
pub mod event_source;
pub mod main_app;
pub mod pager;
pub mod panic_handler;
pub mod query_store;
pub mod settings;
pub mod theme;
pub mod widget;
pub mod window;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the widget surface
pub use pager::{PageChange, Pager, PagerConfig, PagerError, RenderPlan};
pub use widget::{PagerStrip, StripAction, Templates};
pub use window::{PageWindow, page_window};
