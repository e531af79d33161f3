//! In-memory stand-ins for the window and the GPU, for tests.

use std::collections::HashMap;

use crate::config::ClearColor;
use crate::gpu::*;
use crate::shader::ShaderStage;
use crate::surface::Surface;

pub const VERTEX_SCALED: &str = "#version 330

layout (location = 0) in vec3 pos;

void main() {
    gl_Position = vec4(0.4 * pos.x, 0.4 * pos.y, pos.z, 1.0);
}
";

pub const FRAGMENT_RED: &str = "#version 330

out vec4 color;

void main() {
    color = vec4(1.0, 0.0, 0.0, 1.0);
}
";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Viewport(i32, i32, i32, i32),
    ClearColor(ClearColor),
    Clear,
    CreateVertexArray(VertexArrayId),
    BindVertexArray(Option<VertexArrayId>),
    DeleteVertexArray(VertexArrayId),
    CreateBuffer(BufferId),
    BindArrayBuffer(Option<BufferId>),
    UploadStatic(Vec<f32>),
    DeleteBuffer(BufferId),
    VertexAttrib(VertexLayoutBinding),
    CreateProgram(ProgramId),
    CreateShader(ShaderStage, ShaderId),
    CompileShader(ShaderId),
    ShaderInfoLog(ShaderId, usize),
    AttachShader(ProgramId, ShaderId),
    DetachShader(ProgramId, ShaderId),
    DeleteShader(ShaderId),
    LinkProgram(ProgramId),
    ValidateProgram(ProgramId),
    ProgramInfoLog(ProgramId, usize),
    UseProgram(Option<ProgramId>),
    DeleteProgram(ProgramId),
    DrawTriangles(i32, i32),
}

/// Records every call. Compilation fails for empty sources and for anything that doesn't look
/// like it has a `main`, the same way every time.
#[derive(Debug, Default)]
pub struct MockGpu {
    pub calls: Vec<Call>,
    pub fail_link: bool,
    pub fail_validate: bool,
    pub refuse_programs: bool,
    /// Info logs come back empty.
    pub silent_logs: bool,
    /// Validation fails unless a vertex array is bound, as on core-profile drivers.
    pub require_bound_vao: bool,
    pub(crate) bound_vao: Option<VertexArrayId>,
    pub(crate) next_name: u32,
    pub(crate) sources: HashMap<ShaderId, String>,
    pub(crate) compiled: HashMap<ShaderId, bool>,
}

impl MockGpu {
    fn name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }

    pub fn live_shaders(&self) -> usize {
        let created = self.calls.iter().filter(|c| matches!(c, Call::CreateShader(..))).count();
        let deleted = self.calls.iter().filter(|c| matches!(c, Call::DeleteShader(_))).count();
        created - deleted
    }

    /// Calls made since the last time this was called.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::replace(&mut self.calls, Vec::new())
    }

    fn compile_error(source: &str) -> Option<&'static str> {
        if source.trim().is_empty() {
            Some("0:1(1): error: syntax error, unexpected end of file")
        } else if !source.contains("void main") || source.contains("= ;") {
            Some("0:2(27): error: syntax error, unexpected ';'")
        } else {
            None
        }
    }

    fn log(&self, text: &str, capacity: usize) -> String {
        if self.silent_logs {
            return String::new();
        }

        text.chars().take(capacity).collect()
    }
}

impl Gpu for MockGpu {
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        self.calls.push(Call::Viewport(x, y, width, height));
    }

    fn clear_color(&mut self, color: ClearColor) {
        self.calls.push(Call::ClearColor(color));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let vao = VertexArrayId(self.name());
        self.calls.push(Call::CreateVertexArray(vao));
        vao
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        self.bound_vao = vao;
        self.calls.push(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayId) {
        self.calls.push(Call::DeleteVertexArray(vao));
    }

    fn create_buffer(&mut self) -> BufferId {
        let vbo = BufferId(self.name());
        self.calls.push(Call::CreateBuffer(vbo));
        vbo
    }

    fn bind_array_buffer(&mut self, vbo: Option<BufferId>) {
        self.calls.push(Call::BindArrayBuffer(vbo));
    }

    fn upload_static(&mut self, data: &[f32]) {
        self.calls.push(Call::UploadStatic(data.to_vec()));
    }

    fn delete_buffer(&mut self, vbo: BufferId) {
        self.calls.push(Call::DeleteBuffer(vbo));
    }

    fn vertex_attrib(&mut self, binding: &VertexLayoutBinding) {
        self.calls.push(Call::VertexAttrib(*binding));
    }

    fn create_program(&mut self) -> Option<ProgramId> {
        if self.refuse_programs {
            return None;
        }

        let program = ProgramId(self.name());
        self.calls.push(Call::CreateProgram(program));
        Some(program)
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId> {
        let shader = ShaderId(self.name());
        self.calls.push(Call::CreateShader(stage, shader));
        Some(shader)
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        self.sources.insert(shader, source.to_owned());
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        let ok = self.sources.get(&shader)
            .map(|src| Self::compile_error(src).is_none())
            .unwrap_or(false);
        self.compiled.insert(shader, ok);
        self.calls.push(Call::CompileShader(shader));
    }

    fn compile_status(&mut self, shader: ShaderId) -> bool {
        self.compiled.get(&shader).cloned().unwrap_or(false)
    }

    fn shader_info_log(&mut self, shader: ShaderId, capacity: usize) -> String {
        self.calls.push(Call::ShaderInfoLog(shader, capacity));
        let text = self.sources.get(&shader)
            .and_then(|src| Self::compile_error(src))
            .unwrap_or("");
        self.log(text, capacity)
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.calls.push(Call::AttachShader(program, shader));
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        self.calls.push(Call::DetachShader(program, shader));
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.calls.push(Call::DeleteShader(shader));
    }

    fn link_program(&mut self, program: ProgramId) {
        self.calls.push(Call::LinkProgram(program));
    }

    fn link_status(&mut self, _program: ProgramId) -> bool {
        !self.fail_link
    }

    fn validate_program(&mut self, program: ProgramId) {
        self.calls.push(Call::ValidateProgram(program));
    }

    fn validate_status(&mut self, _program: ProgramId) -> bool {
        !self.fail_validate && !(self.require_bound_vao && self.bound_vao.is_none())
    }

    fn program_info_log(&mut self, program: ProgramId, capacity: usize) -> String {
        self.calls.push(Call::ProgramInfoLog(program, capacity));
        let text = if self.fail_link {
            "error: could not link: fragment shader output `color` has no location"
        } else {
            "Validation failed: no vertex array object bound"
        };
        self.log(text, capacity)
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.calls.push(Call::UseProgram(program));
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.calls.push(Call::DeleteProgram(program));
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.calls.push(Call::DrawTriangles(first, count));
    }
}

/// A window that asks to close once it has presented `close_after` frames.
#[derive(Debug)]
pub struct MockSurface {
    pub size: (u32, u32),
    /// Physical pixels per logical pixel.
    pub scale: u32,
    pub close_after: u64,
    /// Size to switch to when the `n`th poll happens, counted from 1.
    pub resize_on_poll: Option<(u64, (u32, u32))>,
    pub fail_swap: bool,
    pub polls: u64,
    pub swaps: u64,
}

impl MockSurface {
    pub fn new(width: u32, height: u32, close_after: u64) -> Self {
        Self {
            size: (width, height),
            scale: 1,
            close_after,
            resize_on_poll: None,
            fail_swap: false,
            polls: 0,
            swaps: 0,
        }
    }
}

impl Surface for MockSurface {
    fn drawable_size(&self) -> (u32, u32) {
        (self.size.0 * self.scale, self.size.1 * self.scale)
    }

    fn should_close(&self) -> bool {
        self.swaps >= self.close_after
    }

    fn poll_events(&mut self) {
        self.polls += 1;

        if let Some((at, size)) = self.resize_on_poll {
            if at == self.polls {
                self.size = size;
            }
        }
    }

    fn swap_buffers(&mut self) -> Result<(), String> {
        if self.fail_swap {
            return Err(String::from("surface lost"));
        }

        self.swaps += 1;
        Ok(())
    }
}
