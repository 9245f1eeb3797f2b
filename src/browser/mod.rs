pub mod connection;
pub mod search_session;

pub use connection::{open_browser_page, BrowserOrigin};
pub use search_session::SearchSession;
