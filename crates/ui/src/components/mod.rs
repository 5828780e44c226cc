pub mod footer;
pub mod header;
pub mod sidebar;
pub mod transcript;

pub use footer::Footer;
pub use header::Header;
pub use sidebar::{SessionStats, Sidebar};
pub use transcript::Transcript;
