//! Text -> record -> JSON pipeline.

use thiserror::Error;
use tracing::debug;

use crate::api::PortSpecCodec;
use crate::record::RecordCodec;
use crate::render::{render, RenderError, RenderOptions};
use crate::{text, DecodeError, Stage};

/// First failure of a pipeline run, labelled with its stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{stage} stage: {0}", stage = .0.stage())]
    Decode(#[from] DecodeError),
    #[error("{stage} stage: {0}", stage = Stage::Render)]
    Render(#[from] RenderError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Decode(err) => err.stage(),
            PipelineError::Render(_) => Stage::Render,
        }
    }
}

/// A decode-and-render pipeline over one record codec.
#[derive(Debug, Clone, Default)]
pub struct Pipeline<C> {
    codec: C,
    options: RenderOptions,
}

impl<C: RecordCodec> Pipeline<C> {
    pub fn new(codec: C, options: RenderOptions) -> Self {
        Self { codec, options }
    }

    /// Runs all three stages on a base64 `input`. Nothing is produced unless
    /// every stage succeeds.
    pub fn run(&self, input: &str) -> Result<String, PipelineError> {
        let bytes = text::decode(input)?;
        debug!(
            codec = self.codec.id(),
            text_len = input.len(),
            bytes = bytes.len(),
            "decoded text"
        );
        let record = self.codec.decode(&bytes)?;
        Ok(render(&record, &self.options)?)
    }
}

/// Decodes a base64 `ExposedPorts` blob and renders it with default options.
pub fn decode_portspec(input: &str) -> Result<String, PipelineError> {
    Pipeline::new(PortSpecCodec, RenderOptions::default()).run(input)
}
