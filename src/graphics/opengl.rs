//! The `Gpu` trait on top of raw OpenGL calls.
//!
//! Everything here is a one-to-one wrapper around the `gl` crate's function pointers, which have
//! to be loaded from a current context first (see [`GlApi::resolve`]). Keeping the unsafe calls in
//! one place means the rest of the program can follow the setup sequence without reading any
//! pointer casts.
//!
//! If you're new to this, [Learn OpenGL](https://learnopengl.com/) walks through the same
//! window → triangle → shader progression in C++, and
//! [Rust and OpenGL from scratch](http://nercury.github.io/rust/opengl/tutorial/2018/02/09/opengl-in-rust-from-scratch-02-opengl-context.html)
//! covers wrapping it safely in Rust.

use std::ffi::c_void;
use std::marker::PhantomData;
use std::mem::size_of;

use gl;
use gl::types::*;

use bootstrap::gpu::*;
use bootstrap::{BootstrapError, ClearColor, Result, ShaderStage};

use super::utils::{info_log_buffer, info_log_to_string};

/// Entry points the setup sequence and frame loop call. If any of these didn't load, the context
/// is too old or the loader is broken and nothing below would work.
const REQUIRED: &[(&str, fn() -> bool)] = &[
    ("glViewport", gl::Viewport::is_loaded),
    ("glClearColor", gl::ClearColor::is_loaded),
    ("glClear", gl::Clear::is_loaded),
    ("glGenVertexArrays", gl::GenVertexArrays::is_loaded),
    ("glBindVertexArray", gl::BindVertexArray::is_loaded),
    ("glDeleteVertexArrays", gl::DeleteVertexArrays::is_loaded),
    ("glGenBuffers", gl::GenBuffers::is_loaded),
    ("glBindBuffer", gl::BindBuffer::is_loaded),
    ("glBufferData", gl::BufferData::is_loaded),
    ("glDeleteBuffers", gl::DeleteBuffers::is_loaded),
    ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded),
    ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded),
    ("glCreateProgram", gl::CreateProgram::is_loaded),
    ("glCreateShader", gl::CreateShader::is_loaded),
    ("glShaderSource", gl::ShaderSource::is_loaded),
    ("glCompileShader", gl::CompileShader::is_loaded),
    ("glGetShaderiv", gl::GetShaderiv::is_loaded),
    ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded),
    ("glAttachShader", gl::AttachShader::is_loaded),
    ("glDetachShader", gl::DetachShader::is_loaded),
    ("glDeleteShader", gl::DeleteShader::is_loaded),
    ("glLinkProgram", gl::LinkProgram::is_loaded),
    ("glValidateProgram", gl::ValidateProgram::is_loaded),
    ("glGetProgramiv", gl::GetProgramiv::is_loaded),
    ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded),
    ("glUseProgram", gl::UseProgram::is_loaded),
    ("glDeleteProgram", gl::DeleteProgram::is_loaded),
    ("glDrawArrays", gl::DrawArrays::is_loaded),
];

/// Proof that the GL function pointers have been loaded. Not `Send`: the pointers belong to the
/// context that is current on this thread.
pub struct GlApi {
    _current_thread: PhantomData<*const ()>,
}

impl GlApi {
    /// Loads every GL entry point through `loader` (normally the context's `get_proc_address`)
    /// and checks the ones we need came back.
    pub fn resolve<F>(loader: F) -> Result<Self>
        where F: FnMut(&'static str) -> *const c_void
    {
        gl::load_with(loader);

        let missing: Vec<String> = REQUIRED.iter()
            .filter(|(_, is_loaded)| !is_loaded())
            .map(|(name, _)| name.to_string())
            .collect();

        if !missing.is_empty() {
            return Err(BootstrapError::GpuResolveFailure { missing });
        }

        Ok(Self { _current_thread: PhantomData })
    }
}

fn stage_kind(stage: ShaderStage) -> GLenum {
    match stage {
        ShaderStage::Vertex => gl::VERTEX_SHADER,
        ShaderStage::Fragment => gl::FRAGMENT_SHADER,
    }
}

fn gl_bool(value: bool) -> GLboolean {
    if value { gl::TRUE } else { gl::FALSE }
}

impl Gpu for GlApi {
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { gl::Viewport(x, y, width, height); }
    }

    fn clear_color(&mut self, color: ClearColor) {
        unsafe { gl::ClearColor(color.r, color.g, color.b, color.a); }
    }

    fn clear(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT); }
    }

    fn create_vertex_array(&mut self) -> VertexArrayId {
        let mut vao = 0u32;
        unsafe { gl::GenVertexArrays(1, &mut vao); }
        VertexArrayId(vao)
    }

    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>) {
        unsafe { gl::BindVertexArray(vao.map_or(0, |v| v.0)); }
    }

    fn delete_vertex_array(&mut self, vao: VertexArrayId) {
        unsafe { gl::DeleteVertexArrays(1, &vao.0); }
    }

    fn create_buffer(&mut self) -> BufferId {
        let mut vbo = 0u32;
        unsafe { gl::GenBuffers(1, &mut vbo); }
        BufferId(vbo)
    }

    fn bind_array_buffer(&mut self, vbo: Option<BufferId>) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, vbo.map_or(0, |b| b.0)); }
    }

    fn upload_static(&mut self, data: &[f32]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                (data.len() * size_of::<f32>()) as GLsizeiptr,
                data.as_ptr() as *const c_void,
                gl::STATIC_DRAW
            );
        }
    }

    fn delete_buffer(&mut self, vbo: BufferId) {
        unsafe { gl::DeleteBuffers(1, &vbo.0); }
    }

    fn vertex_attrib(&mut self, binding: &VertexLayoutBinding) {
        unsafe {
            gl::VertexAttribPointer(
                binding.slot,
                binding.components,
                gl::FLOAT,
                gl_bool(binding.normalized),
                binding.stride,
                binding.offset as *const c_void
            );
            gl::EnableVertexAttribArray(binding.slot);
        }
    }

    fn create_program(&mut self) -> Option<ProgramId> {
        match unsafe { gl::CreateProgram() } {
            0 => None,
            id => Some(ProgramId(id)),
        }
    }

    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId> {
        match unsafe { gl::CreateShader(stage_kind(stage)) } {
            0 => None,
            id => Some(ShaderId(id)),
        }
    }

    fn shader_source(&mut self, shader: ShaderId, source: &str) {
        // Passing the length means the source doesn't need a trailing NUL.
        let code = source.as_ptr() as *const GLchar;
        let length = source.len() as GLint;
        unsafe { gl::ShaderSource(shader.0, 1, &code, &length); }
    }

    fn compile_shader(&mut self, shader: ShaderId) {
        unsafe { gl::CompileShader(shader.0); }
    }

    fn compile_status(&mut self, shader: ShaderId) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader.0, gl::COMPILE_STATUS, &mut success); }
        success != 0
    }

    fn shader_info_log(&mut self, shader: ShaderId, capacity: usize) -> String {
        let mut buf = info_log_buffer(capacity);
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(shader.0, buf.len() as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
        }
        info_log_to_string(&buf, written)
    }

    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::AttachShader(program.0, shader.0); }
    }

    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId) {
        unsafe { gl::DetachShader(program.0, shader.0); }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { gl::DeleteShader(shader.0); }
    }

    fn link_program(&mut self, program: ProgramId) {
        unsafe { gl::LinkProgram(program.0); }
    }

    fn link_status(&mut self, program: ProgramId) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program.0, gl::LINK_STATUS, &mut success); }
        success != 0
    }

    fn validate_program(&mut self, program: ProgramId) {
        unsafe { gl::ValidateProgram(program.0); }
    }

    fn validate_status(&mut self, program: ProgramId) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program.0, gl::VALIDATE_STATUS, &mut success); }
        success != 0
    }

    fn program_info_log(&mut self, program: ProgramId, capacity: usize) -> String {
        let mut buf = info_log_buffer(capacity);
        let mut written: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(program.0, buf.len() as GLsizei, &mut written, buf.as_mut_ptr() as *mut GLchar);
        }
        info_log_to_string(&buf, written)
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        unsafe { gl::UseProgram(program.map_or(0, |p| p.0)); }
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { gl::DeleteProgram(program.0); }
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count); }
    }
}
