//! Site profiles: where a given site keeps its chapter list, its reading
//! text and its watermark lines.
//!
//! The pipeline only talks to the [`SiteProfile`] trait. The bundled
//! [`StyleFingerprintProfile`] covers sites that mark the reading area with
//! an inline style, and can be loaded from a profile file with
//! [`ProfileParser`].

pub mod directives;
pub mod parser;
pub mod profile;

pub use directives::{Directive, parse_directive};
pub use parser::ProfileParser;
pub use profile::{SiteProfile, StyleFingerprintProfile};
