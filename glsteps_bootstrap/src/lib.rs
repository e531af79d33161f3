//! The part of an OpenGL "first triangle" program that isn't window-toolkit boilerplate.
//!
//! A window with a current context ([`Surface`]) and a set of resolved GL entry points ([`Gpu`])
//! go into a [`GraphicsBootstrap`], which uploads geometry, builds and validates a shader program,
//! and runs the poll/clear/draw/present loop until the window is closed.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod shader;
pub mod surface;

#[cfg(test)]
mod mock;

pub use crate::bootstrap::GraphicsBootstrap;
pub use crate::config::{ClearColor, SurfaceConfig};
pub use crate::error::{BootstrapError, Result};
pub use crate::geometry::GeometryBuffer;
pub use crate::gpu::Gpu;
pub use crate::shader::{ProgramState, ShaderProgram, ShaderSource, ShaderStage};
pub use crate::surface::Surface;
