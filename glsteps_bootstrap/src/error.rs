//! Every way the setup sequence can fail.
//!
//! The first three variants are what the lessons treat as fatal before any GPU object exists. The
//! shader variants carry the driver's info log so it can be shown to the user as-is.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::shader::{ProgramState, ShaderStage};

pub type Result<T> = std::result::Result<T, BootstrapError>;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("windowing toolkit initialization failed: {0}")]
    SurfaceInitFailure(String),

    #[error("window/context creation failed: {0}")]
    SurfaceCreateFailure(String),

    #[error("could not resolve GPU entry points: {}", .missing.join(", "))]
    GpuResolveFailure { missing: Vec<String> },

    #[error("error compiling the {stage} shader: '{log}'")]
    ShaderCompileFailure { stage: ShaderStage, log: String },

    #[error("error linking program: '{0}'")]
    ProgramLinkFailure(String),

    #[error("error validating program: '{0}'")]
    ProgramValidateFailure(String),

    #[error("error creating shader program")]
    ProgramCreateFailure,

    #[error("cannot {step} while the program is {state}")]
    OutOfOrder { step: &'static str, state: ProgramState },

    #[error("program build already failed; {0} refused")]
    ProgramFailed(&'static str),

    #[error("malformed geometry: {0}")]
    MalformedGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not read shader source {}", .path.display())]
    ShaderSourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not present frame: {0}")]
    PresentFailure(String),
}

impl BootstrapError {
    /// Whether this error belongs to the shader program build rather than the surface or GPU.
    pub fn is_shader_failure(&self) -> bool {
        match self {
            BootstrapError::ShaderCompileFailure { .. }
            | BootstrapError::ProgramLinkFailure(_)
            | BootstrapError::ProgramValidateFailure(_)
            | BootstrapError::ProgramCreateFailure
            | BootstrapError::OutOfOrder { .. }
            | BootstrapError::ProgramFailed(_) => true,
            _ => false,
        }
    }
}
