//! Timing helpers for baking a lasagna.

#![warn(clippy::all)]
#![warn(missing_copy_implementations, missing_docs, rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn, missing_debug_implementations)]
#![cfg_attr(not(debug_assertions), deny(clippy::todo))]

mod timing;
pub use timing::*;

mod util;
pub use util::{parse_layers, parse_minutes, ParseError};
