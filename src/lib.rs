pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod panel;
pub mod relay;
pub mod socket;
pub mod ui;
pub mod util;

pub use panel::SyslogPanel;
pub use relay::{NotificationHandler, NotificationRelay};
