//! Client boundary to the video generation backend.
//!
//! The model itself is an external collaborator: an inference server that
//! takes a prompt and returns an encoded video. [`VideoGenerator`] is the
//! seam the pipeline calls; [`HttpGenerator`] is the production
//! implementation.

pub mod generator;
pub mod http;

pub use generator::{GenerateError, VideoGenerator};
pub use http::HttpGenerator;
