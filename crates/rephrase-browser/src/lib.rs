//! Chrome automation for the QuillBot paraphrasing and humanizing tools.

mod chrome_finder;
mod chromium;
mod driver;
mod error;
mod launcher;
mod profile;
pub mod session;
pub mod site;

pub use chrome_finder::ChromeFinder;
pub use chromium::ChromiumPage;
pub use driver::{Locator, PageDriver};
pub use error::{Error, Result};
pub use launcher::ChromeLauncher;
pub use profile::ProfileManager;
pub use session::{LaunchOptions, Session, SessionConfig, SessionState, process};
