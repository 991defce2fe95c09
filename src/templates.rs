//! Web interface templates.

pub mod base;
pub mod dashboard;
pub mod metric;
pub mod navbar;
pub mod status;

pub use self::base::Base;
pub use self::dashboard::{Dashboard, DashboardView};
pub use self::navbar::NavBar;
pub use self::status::{Status, StatusView};

pub const DATE_FORMAT: &str = "%b %d, %H:%M:%S";
