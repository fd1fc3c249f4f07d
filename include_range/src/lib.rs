//! Embed a byte range of a file as a compact, directly-compiled literal.
//!
//! `include_bytes!` embeds a whole file. This crate embeds an exact
//! `(offset, length)` slice of one, as a `const` or `static` of type
//! `&'static [u8]` nested in whatever modules or `impl` block you choose.
//! The source text is generated once by your build script, so the compiler
//! only ever sees a literal.
//!
//! ## How It Works
//!
//! 1.  **Build Script:** You list the ranges you want with [`EmbedRequest`] and
//!     run them through the `Config` builder (feature `build`) in `build.rs`.
//!     Each range is bounds-checked and rendered as a Rust source file in
//!     `OUT_DIR`.
//! 2.  **Macro Expansion:** The [`include_range!`] macro splices a generated
//!     file into your code by name.
//!
//! Each range is rendered in the most compact form available:
//!
//! - valid UTF-8 becomes a string literal, `"...".as_bytes()`;
//! - anything else becomes a list of integers, `&[65,0,255,]`. Lists for
//!   payloads above 1 KiB are built from a per-byte lookup table into 64 KiB
//!   chunks, so a 1 MiB payload never needs one 4 MiB buffer.
//!
//! ## Usage
//!
//! 1. Add `include_range` to your `Cargo.toml`. The `build` feature is required
//!    for build-dependencies.
//!
//! ```toml
//! [dependencies]
//! include_range = "0.1.0"
//!
//! [build-dependencies]
//! include_range = { version = "0.1.0", features = ["build"] }
//! ```
//!
//! 2. Describe the ranges in `build.rs`.
//!
//! ```ignore
//! // build.rs
//! use include_range::{Config, EmbedRequest};
//!
//! Config::new()
//!     .embed(
//!         EmbedRequest::new("assets/font.ttf")
//!             .length(12)
//!             .namespace("fonts")
//!             .member("HEADER")
//!             .modifiers("pub"),
//!     )
//!     .build()
//!     .expect("Failed to generate embeds");
//! ```
//!
//! 3. Include the generated unit, named after the source file.
//!
//! ```ignore
//! // src/main.rs
//! use include_range::include_range;
//!
//! include_range!("font");
//!
//! assert_eq!(fonts::HEADER.len(), 12);
//! ```
//!
//! A request that cannot be satisfied (missing file, range past the end of the
//! file, range larger than the configured maximum, ...) produces a
//! `cargo:warning` instead of a unit, and the corresponding `include_range!`
//! fails to compile.

// Re-export the procedural macro.
pub use include_range_macros::include_range;

mod bounds;
mod chunked;
mod diagnostic;
mod generate;
mod naming;
mod numeric;
mod request;
mod source;
mod strategy;
mod unit;
mod utf8;
mod validate;

pub use bounds::{ByteRange, DEFAULT_MAX_SIZE};
pub use chunked::{CHUNK_CAPACITY, ChunkedReader, ChunkedText};
pub use diagnostic::{Anchored, Diagnostic};
pub use generate::{Outcome, Settings, Unit, generate};
pub use naming::NameRegistry;
pub use request::EmbedRequest;
pub use strategy::{Encoded, Strategy, encode};
pub use unit::{ItemKind, OutputShape, Scope, ScopeKind};

//
// ===== BUILD-TIME CODE =====
//

#[cfg(any(feature = "build", test))]
mod build;
#[cfg(any(feature = "build", test))]
pub use build::{Config, Error, Failure, GeneratedUnit, MAX_SIZE_VAR, Report, UNIT_DIR};
