#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod error;
mod normalizer;
mod orientation;

pub use crate::config::{NormalizerConfig, NormalizerConfigBuilder, NormalizerConfigBuilderError};
pub use crate::error::{Error, Result};
pub use crate::normalizer::ImageNormalizer;
pub use crate::orientation::{Orientation, read_orientation};

/// Tracing target for image normalization.
pub const TRACING_TARGET: &str = "iris_image::normalizer";
