//! Format interoperability for screenplays
//!
//!     This crate converts a [`screenplay_core::Script`] to and from other representations. The
//!     parsing of Fountain itself lives in screenplay-core; babel adds the writers and the other
//!     formats on top of it.
//!
//!     This is a pure lib: no code here assumes a shell environment, be it printing to stdout,
//!     reading env vars or touching the file system.
//!
//! Formats
//!
//!     Every format implements the [`Format`] trait (name, file extensions, parse and/or
//!     serialize) and is discoverable through the [`FormatRegistry`].
//!
//!     - fountain: both ways. Writing is the inverse of parsing: notes and boneyards are put
//!       back inline and a repeated speaker gets `(CONT'D)`.
//!     - fdx: Final Draft XML, both ways. Read with roxmltree, written as plain text.
//!     - html: export only, built as an html5ever DOM with embedded CSS themes.
//!     - dump: export only, the element-per-line debug listing or JSON.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── transforms.rs           # String-in, string-out helpers
//!     ├── common                  # Inline emphasis shared by the renderers
//!     └── formats
//!         └── <format>
//!             ├── parser.rs       # Parser implementation
//!             ├── serializer.rs   # Serializer implementation
//!             └── mod.rs
//!
//! Testing
//!     tests
//!     └── <format>
//!         ├── <testname>.rs
//!         └── fixtures
//!             └── kitchensink.<format>
//!
//!     Rust does not discover tests in subdirectories by default, so tests/lib.rs declares
//!     each format directory as a module.

pub mod common;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;
pub mod transforms;

pub use error::FormatError;
pub use format::Format;
pub use registry::FormatRegistry;
