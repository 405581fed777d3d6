#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod data_url;
mod error;
mod source;

pub use crate::client::{AnalyzeClient, DEFAULT_BASE_URL};
pub use crate::data_url::decode_data_url;
pub use crate::error::{Error, Result};
pub use crate::source::{
    CaptureFormat, CaptureHost, CaptureSource, CapturedImage, HostError, SelectedFile,
};

/// Tracing target for capture operations.
pub const TRACING_TARGET: &str = "iris_capture";
