//! The slice of the OpenGL API the setup sequence calls, as a trait.
//!
//! Each method is a thin stand-in for one or two `gl*` calls. Object names are wrapped in
//! newtypes so a buffer can't be passed where a program is expected; a name of 0 means "nothing"
//! to OpenGL, so the `bind_*`/`use_*` methods take an `Option` instead.

use crate::config::ClearColor;
use crate::shader::ShaderStage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u32);

/// How the flat float array in a vertex buffer maps onto a shader input. Mirrors the arguments of
/// [glVertexAttribPointer](http://docs.gl/gl3/glVertexAttribPointer), minus the type, which is
/// always `GL_FLOAT` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayoutBinding {
    /// `layout (location = N)` in the vertex shader.
    pub slot: u32,
    pub components: i32,
    pub normalized: bool,
    /// In bytes. 0 means tightly packed.
    pub stride: i32,
    /// In bytes from the start of the buffer.
    pub offset: usize,
}

impl VertexLayoutBinding {
    /// Slot 0, three floats per vertex, tightly packed, starting at the first float.
    pub const POSITION: VertexLayoutBinding = VertexLayoutBinding {
        slot: 0,
        components: 3,
        normalized: false,
        stride: 0,
        offset: 0,
    };
}

pub trait Gpu {
    fn viewport(&mut self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&mut self, color: ClearColor);
    /// Clears the colour target only.
    fn clear(&mut self);

    fn create_vertex_array(&mut self) -> VertexArrayId;
    fn bind_vertex_array(&mut self, vao: Option<VertexArrayId>);
    fn delete_vertex_array(&mut self, vao: VertexArrayId);

    fn create_buffer(&mut self) -> BufferId;
    fn bind_array_buffer(&mut self, vbo: Option<BufferId>);
    /// Uploads `data` to the bound array buffer with static usage.
    fn upload_static(&mut self, data: &[f32]);
    fn delete_buffer(&mut self, vbo: BufferId);
    /// Records `binding` against the bound array buffer and enables its slot.
    fn vertex_attrib(&mut self, binding: &VertexLayoutBinding);

    /// `None` if the driver handed back 0.
    fn create_program(&mut self) -> Option<ProgramId>;
    fn create_shader(&mut self, stage: ShaderStage) -> Option<ShaderId>;
    fn shader_source(&mut self, shader: ShaderId, source: &str);
    fn compile_shader(&mut self, shader: ShaderId);
    fn compile_status(&mut self, shader: ShaderId) -> bool;
    /// At most `capacity` bytes of the shader's info log.
    fn shader_info_log(&mut self, shader: ShaderId, capacity: usize) -> String;
    fn attach_shader(&mut self, program: ProgramId, shader: ShaderId);
    fn detach_shader(&mut self, program: ProgramId, shader: ShaderId);
    fn delete_shader(&mut self, shader: ShaderId);

    fn link_program(&mut self, program: ProgramId);
    fn link_status(&mut self, program: ProgramId) -> bool;
    fn validate_program(&mut self, program: ProgramId);
    fn validate_status(&mut self, program: ProgramId) -> bool;
    /// At most `capacity` bytes of the program's info log.
    fn program_info_log(&mut self, program: ProgramId, capacity: usize) -> String;
    fn use_program(&mut self, program: Option<ProgramId>);
    fn delete_program(&mut self, program: ProgramId);

    /// `glDrawArrays(GL_TRIANGLES, first, count)`: every 3 vertices make one triangle.
    fn draw_triangles(&mut self, first: i32, count: i32);
}
