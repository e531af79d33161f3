use log::{info, trace};

use crate::config::ClearColor;
use crate::error::{BootstrapError, Result};
use crate::geometry::GeometryBuffer;
use crate::gpu::Gpu;
use crate::shader::{ShaderProgram, ShaderSource};
use crate::surface::Surface;

/// Owns everything one lesson needs: the window, the resolved GPU entry points, and at most one
/// geometry buffer and one validated program.
///
/// Setup goes `new` → `upload_geometry` → `build_program` → `run` → `shutdown`. Geometry and
/// program are both optional; with neither, each frame is just a clear.
pub struct GraphicsBootstrap<S: Surface, G: Gpu> {
    surface: S,
    gpu: G,
    clear_color: ClearColor,
    viewport: (u32, u32),
    geometry: Option<GeometryBuffer>,
    program: Option<ShaderProgram>,
    frames: u64,
}

impl<S: Surface, G: Gpu> GraphicsBootstrap<S, G> {
    /// Takes a surface whose context is already current and a `gpu` resolved against that
    /// context, then sizes the viewport to the drawable.
    pub fn new(surface: S, gpu: G, clear_color: ClearColor) -> Result<Self> {
        let (width, height) = surface.drawable_size();
        if width == 0 || height == 0 {
            return Err(BootstrapError::SurfaceCreateFailure(format!(
                "drawable is {}x{} pixels", width, height
            )));
        }

        let mut bootstrap = Self {
            surface,
            gpu,
            clear_color,
            viewport: (0, 0),
            geometry: None,
            program: None,
            frames: 0,
        };
        bootstrap.set_viewport((width, height));

        Ok(bootstrap)
    }

    pub fn surface(&self) -> &S { &self.surface }

    pub fn gpu(&self) -> &G { &self.gpu }

    pub fn viewport(&self) -> (u32, u32) { self.viewport }

    pub fn clear_color(&self) -> ClearColor { self.clear_color }

    pub fn geometry(&self) -> Option<&GeometryBuffer> { self.geometry.as_ref() }

    pub fn program(&self) -> Option<&ShaderProgram> { self.program.as_ref() }

    pub fn frames(&self) -> u64 { self.frames }

    /// Replaces (and releases) any geometry uploaded earlier.
    pub fn upload_geometry(&mut self, positions: &[f32]) -> Result<()> {
        let geometry = GeometryBuffer::upload(&mut self.gpu, positions)?;
        info!("uploaded {} triangle(s)", geometry.triangle_count());

        if let Some(old) = self.geometry.replace(geometry) {
            old.release(&mut self.gpu);
        }

        Ok(())
    }

    /// Builds a program from both sources, validating it against the uploaded geometry if there
    /// is any. Only a validated program is kept; on error nothing changes and the error is handed
    /// back for the caller to act on.
    pub fn build_program(&mut self, vertex: &ShaderSource, fragment: &ShaderSource) -> Result<()> {
        let vertex = vertex.load()?;
        let fragment = fragment.load()?;

        let vao = self.geometry.as_ref().map(GeometryBuffer::vertex_array);
        let program = ShaderProgram::build(&mut self.gpu, &vertex, &fragment, vao)?;

        if let Some(old) = self.program.replace(program) {
            old.release(&mut self.gpu);
        }

        Ok(())
    }

    /// One pass of the loop: poll, clear, draw, present. Returns whether a draw call was issued.
    pub fn frame(&mut self) -> Result<bool> {
        self.surface.poll_events();

        let size = self.surface.drawable_size();
        if size != self.viewport && size.0 > 0 && size.1 > 0 {
            self.set_viewport(size);
        }

        self.gpu.clear_color(self.clear_color);
        self.gpu.clear();

        let drew = self.draw();

        self.surface.swap_buffers().map_err(BootstrapError::PresentFailure)?;
        self.frames += 1;
        trace!("frame {} presented (drew: {})", self.frames, drew);

        Ok(drew)
    }

    /// Runs frames until the window asks to close. Returns how many frames were presented.
    pub fn run(&mut self) -> Result<u64> {
        info!("entering frame loop");
        let start = self.frames;

        while !self.surface.should_close() {
            self.frame()?;
        }

        let presented = self.frames - start;
        info!("close requested after {} frame(s)", presented);
        Ok(presented)
    }

    /// Deletes the program and geometry and hands the window and GPU back. Dropping the surface
    /// destroys the window.
    pub fn shutdown(mut self) -> (S, G) {
        if let Some(program) = self.program.take() {
            program.release(&mut self.gpu);
        }

        if let Some(geometry) = self.geometry.take() {
            geometry.release(&mut self.gpu);
        }

        (self.surface, self.gpu)
    }

    fn set_viewport(&mut self, (width, height): (u32, u32)) {
        self.gpu.viewport(0, 0, width as i32, height as i32);
        self.viewport = (width, height);
        info!("viewport set to {}x{}", width, height);
    }

    fn draw(&mut self) -> bool {
        let (program, geometry) = match (&self.program, &self.geometry) {
            (Some(program), Some(geometry)) if program.is_validated() => (program, geometry),
            _ => return false,
        };

        let count = geometry.drawn_vertex_count();
        if count == 0 {
            return false;
        }

        self.gpu.use_program(Some(program.id()));
        self.gpu.bind_vertex_array(Some(geometry.vertex_array()));

        self.gpu.draw_triangles(0, count as i32);

        self.gpu.bind_vertex_array(None);
        self.gpu.use_program(None);

        true
    }
}
