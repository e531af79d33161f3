//! Building a shader program: one vertex stage, one fragment stage, link, validate.
//!
//! The build is a one-way state machine:
//!
//! ```text
//! Created -> StageCompiled(1) -> StageCompiled(2) -> Linked -> Validated
//!    \______________\__________________\_______________\______-> Failed
//! ```
//!
//! Any step that fails, or that is attempted out of order, leaves the program `Failed` for good.
//! There is no way back: a failed program is released and never drawn with.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::error::{BootstrapError, Result};
use crate::gpu::{Gpu, ProgramId, ShaderId, VertexArrayId};

/// Size of the buffer info logs are fetched into. Anything past this is cut off.
pub const INFO_LOG_CAPACITY: usize = 1024;

const NO_DIAGNOSTIC: &str = "no diagnostic output from driver";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Where a stage's GLSL comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderSource {
    Inline(String),
    /// Read when the program is built, not before.
    File(PathBuf),
}

impl ShaderSource {
    pub fn load(&self) -> Result<Cow<'_, str>> {
        match self {
            ShaderSource::Inline(text) => Ok(Cow::Borrowed(text.as_str())),
            ShaderSource::File(path) => fs::read_to_string(path)
                .map(Cow::Owned)
                .map_err(|source| BootstrapError::ShaderSourceRead { path: path.clone(), source }),
        }
    }
}

impl From<&str> for ShaderSource {
    fn from(text: &str) -> Self {
        ShaderSource::Inline(text.to_owned())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Created,
    /// Number of stages compiled and attached so far.
    StageCompiled(u8),
    Linked,
    Validated,
    Failed,
}

impl fmt::Display for ProgramState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramState::Created => write!(f, "freshly created"),
            ProgramState::StageCompiled(n) => write!(f, "holding {} compiled stage(s)", n),
            ProgramState::Linked => write!(f, "linked"),
            ProgramState::Validated => write!(f, "validated"),
            ProgramState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug)]
pub struct ShaderProgram {
    id: ProgramId,
    state: ProgramState,
    /// Attached but not yet linked. Emptied once linking succeeds.
    stages: Vec<ShaderId>,
}

impl ShaderProgram {
    pub fn create<G: Gpu>(gpu: &mut G) -> Result<Self> {
        let id = gpu.create_program().ok_or(BootstrapError::ProgramCreateFailure)?;

        Ok(Self { id, state: ProgramState::Created, stages: Vec::with_capacity(2) })
    }

    /// Runs the whole sequence, validating against `vao` if given. On failure everything created
    /// so far is deleted again.
    pub fn build<G: Gpu>(
        gpu: &mut G,
        vertex: &str,
        fragment: &str,
        vao: Option<VertexArrayId>,
    ) -> Result<Self> {
        let mut program = Self::create(gpu)?;

        match program.run_all(gpu, vertex, fragment, vao) {
            Ok(()) => {
                info!("shader program {:?} validated", program.id);
                Ok(program)
            },
            Err(e) => {
                program.release(gpu);
                Err(e)
            }
        }
    }

    fn run_all<G: Gpu>(
        &mut self,
        gpu: &mut G,
        vertex: &str,
        fragment: &str,
        vao: Option<VertexArrayId>,
    ) -> Result<()> {
        self.compile_stage(gpu, ShaderStage::Vertex, vertex)?;
        self.compile_stage(gpu, ShaderStage::Fragment, fragment)?;
        self.link(gpu)?;
        self.validate(gpu, vao)
    }

    pub fn id(&self) -> ProgramId { self.id }

    pub fn state(&self) -> ProgramState { self.state }

    pub fn is_validated(&self) -> bool {
        self.state == ProgramState::Validated
    }

    /// Compiles `source` as `stage` and attaches it. The vertex stage has to come first.
    pub fn compile_stage<G: Gpu>(&mut self, gpu: &mut G, stage: ShaderStage, source: &str) -> Result<()> {
        let expected = match self.state {
            ProgramState::Created => ShaderStage::Vertex,
            ProgramState::StageCompiled(1) => ShaderStage::Fragment,
            ProgramState::Failed => return Err(BootstrapError::ProgramFailed("compile")),
            state => return Err(self.fail(BootstrapError::OutOfOrder { step: "compile another stage", state })),
        };

        if stage != expected {
            let step = match stage {
                ShaderStage::Vertex => "compile the vertex stage",
                ShaderStage::Fragment => "compile the fragment stage",
            };
            let state = self.state;
            return Err(self.fail(BootstrapError::OutOfOrder { step, state }));
        }

        let shader = match gpu.create_shader(stage) {
            Some(shader) => shader,
            None => {
                let log = String::from("could not create shader object");
                return Err(self.fail(BootstrapError::ShaderCompileFailure { stage, log }));
            }
        };

        gpu.shader_source(shader, source);
        gpu.compile_shader(shader);

        if !gpu.compile_status(shader) {
            let log = diagnostic(gpu.shader_info_log(shader, INFO_LOG_CAPACITY));
            gpu.delete_shader(shader);
            return Err(self.fail(BootstrapError::ShaderCompileFailure { stage, log }));
        }

        gpu.attach_shader(self.id, shader);
        self.stages.push(shader);
        self.state = ProgramState::StageCompiled(self.stages.len() as u8);
        debug!("{} stage compiled as {:?}", stage, shader);

        Ok(())
    }

    /// Links both stages into an executable. The stage objects are detached and deleted
    /// afterwards since the program no longer needs them.
    pub fn link<G: Gpu>(&mut self, gpu: &mut G) -> Result<()> {
        match self.state {
            ProgramState::StageCompiled(2) => {},
            ProgramState::Failed => return Err(BootstrapError::ProgramFailed("link")),
            state => return Err(self.fail(BootstrapError::OutOfOrder { step: "link", state })),
        }

        gpu.link_program(self.id);

        if !gpu.link_status(self.id) {
            let log = diagnostic(gpu.program_info_log(self.id, INFO_LOG_CAPACITY));
            return Err(self.fail(BootstrapError::ProgramLinkFailure(log)));
        }

        let id = self.id;
        for shader in self.stages.drain(..) {
            gpu.detach_shader(id, shader);
            gpu.delete_shader(shader);
        }

        self.state = ProgramState::Linked;
        Ok(())
    }

    /// Checks the linked program can run against the state that is currently bound. Core
    /// profiles refuse a program with no vertex array bound, so `vao` is bound for the check and
    /// unbound again afterwards.
    pub fn validate<G: Gpu>(&mut self, gpu: &mut G, vao: Option<VertexArrayId>) -> Result<()> {
        match self.state {
            ProgramState::Linked => {},
            ProgramState::Failed => return Err(BootstrapError::ProgramFailed("validate")),
            state => return Err(self.fail(BootstrapError::OutOfOrder { step: "validate", state })),
        }

        if vao.is_some() {
            gpu.bind_vertex_array(vao);
        }

        gpu.validate_program(self.id);
        let valid = gpu.validate_status(self.id);

        if vao.is_some() {
            gpu.bind_vertex_array(None);
        }

        if !valid {
            let log = diagnostic(gpu.program_info_log(self.id, INFO_LOG_CAPACITY));
            return Err(self.fail(BootstrapError::ProgramValidateFailure(log)));
        }

        self.state = ProgramState::Validated;
        Ok(())
    }

    pub fn release<G: Gpu>(mut self, gpu: &mut G) {
        for shader in self.stages.drain(..) {
            gpu.detach_shader(self.id, shader);
            gpu.delete_shader(shader);
        }

        gpu.delete_program(self.id);
    }

    fn fail(&mut self, error: BootstrapError) -> BootstrapError {
        debug!("program {:?} failed while {}: {}", self.id, self.state, error);
        self.state = ProgramState::Failed;
        error
    }
}

/// Drivers pad logs with NULs and trailing newlines, and some give nothing at all on failure.
fn diagnostic(log: String) -> String {
    let trimmed = log.trim_end_matches(|c: char| c == '\0' || c.is_whitespace());

    if trimmed.trim().is_empty() {
        String::from(NO_DIAGNOSTIC)
    } else {
        trimmed.to_owned()
    }
}
