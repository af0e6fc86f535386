//! Browser infrastructure for launching and tearing down Chrome sessions

mod wrapper;

pub use crate::browser_setup::{download_managed_browser, find_browser_executable};
pub use wrapper::SessionBrowser;
