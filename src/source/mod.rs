//! Job Source Framework
//!
//! A source is the external capability that turns one query into job rows.
//! The pipeline only ever sees the `JobSource` trait; how a board is scraped
//! lives behind it.

pub mod framework;
pub mod command;

pub use framework::{JobSource, FetchRequest};
pub use command::CommandSource;
