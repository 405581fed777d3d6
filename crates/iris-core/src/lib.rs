#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod analysis;
mod error;
pub mod image;
pub mod inference;
pub mod prelude;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
