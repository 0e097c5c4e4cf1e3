//! Format implementations
//!
//! Each format converts between a [`screenplay_core::Script`] and a text
//! representation: Fountain and Final Draft both ways, HTML and the debug
//! dump as export only.

pub mod dump;
pub mod fdx;
pub mod fountain;
pub mod html;

pub use dump::DumpFormat;
pub use fdx::FdxFormat;
pub use fountain::{FountainFormat, FountainWriter, WriterOptions};
pub use html::{HtmlFormat, HtmlOptions, HtmlTheme};
