pub mod catalog;
pub mod persist;
pub mod progress;
pub mod reports;

pub use catalog::load_catalog;
pub use persist::{fingerprint, save_outcome};
pub use progress::run_with_ticker;
pub use reports::{
    generate_desktop_console_report, generate_desktop_markdown_report, generate_json_report,
    generate_mobile_console_report, generate_mobile_markdown_report,
};
