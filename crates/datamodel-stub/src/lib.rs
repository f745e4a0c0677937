//! Generate data model stubs for FITS files.
//!
//! A stub is a reStructuredText document with a title, a summary table of
//! the file's HDUs and one section per HDU listing its header keywords. It
//! is written once and then edited by hand.

pub mod config;
pub mod error;
#[cfg(feature = "fits")]
pub mod keywords;
pub mod model;
pub mod reader;
pub mod stub;
pub mod table;
pub mod template;

pub use config::Config;
pub use error::{Error, Result};
pub use reader::HduDescription;
pub use stub::{RenderedStub, StubGenerator};
pub use template::Template;
