//! Context-sensitive tokenizer for the Cooklang recipe markup language.
//!
//! Cooklang mixes free prose with inline markers (`@salt{1%tsp}`,
//! `#pot{}`, `~{10%minutes}`), line-oriented constructs (`>> key: value`,
//! `> note`, `== Section ==`) and comments (`-- …`, `[- … -]`). Most of it is
//! context-free, but a few tokens depend on what comes later on the line or
//! on where the line started. This crate scans exactly those tokens on behalf
//! of an incremental parsing engine:
//!
//! - [`Scanner`] owns the cross-call state and picks one strategy per call,
//!   restricted to the [`KindSet`] the host grammar accepts.
//! - [`Lexer`] is the cursor contract with the host; [`StrLexer`] implements
//!   it over a `&str`.
//! - [`Session`] drives a scanner over one document and supports suspending
//!   and resuming through a [`Checkpoint`].
//!
//! The crate is `no_std` and only needs `alloc`.

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod classify;

mod buffer;
mod error;
mod lexer;
mod options;
mod scanner;
mod session;
mod state;
mod token;

#[cfg(test)]
mod tests;

pub use error::ScanError;
pub use lexer::{Lexer, StrLexer};
pub use options::ScannerOptions;
pub use scanner::Scanner;
pub use session::{Checkpoint, Lexeme, Session};
pub use state::{SERIALIZED_LEN, ScannerState};
pub use token::{KindSet, Span, Token, TokenKind};
