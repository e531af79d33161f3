use std::panic;

use glutin::dpi::LogicalSize;
use glutin::event::{Event, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::platform::desktop::EventLoopExtDesktop;
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, CreationError, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use log::{debug, info};

use bootstrap::{BootstrapError, Result, Surface, SurfaceConfig};

use crate::graphics::GlApi;

/// A glutin window whose OpenGL context is current on the thread that opened it.
///
/// glutin wants to own the main loop through `EventLoop::run`, which never returns. Instead the
/// event loop is pumped with `run_return` once per frame, exiting as soon as the queued events
/// have been handled, so the frame loop can poll it like a GLFW window.
pub struct GlWindow {
    events: EventLoop<()>,
    context: WindowedContext<PossiblyCurrent>,
    close_requested: bool,
}

impl GlWindow {
    pub fn open(config: &SurfaceConfig) -> Result<Self> {
        config.validate()?;

        // The platform backends panic instead of returning an error when there's no display to
        // connect to.
        let events = panic::catch_unwind(EventLoop::new).map_err(|cause| {
            let reason = cause.downcast_ref::<String>().cloned()
                .or_else(|| cause.downcast_ref::<&str>().map(|s| s.to_string()))
                .unwrap_or_else(|| String::from("no usable display"));
            BootstrapError::SurfaceInitFailure(reason)
        })?;

        let window = WindowBuilder::new()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        let profile = if config.core_profile { GlProfile::Core } else { GlProfile::Compatibility };

        let context = ContextBuilder::new()
            .with_gl(GlRequest::Specific(Api::OpenGl, config.gl_version))
            .with_gl_profile(profile)
            .with_vsync(config.vsync)
            .build_windowed(window, &events)
            .map_err(classify_creation_error)?;

        let context = unsafe { context.make_current() }.map_err(|(_, e)| {
            BootstrapError::SurfaceCreateFailure(format!("could not make context current: {}", e))
        })?;

        info!(
            "opened {}x{} window '{}' with an OpenGL {}.{} {} context",
            config.width, config.height, config.title,
            config.gl_version.0, config.gl_version.1,
            if config.core_profile { "core" } else { "compatibility" }
        );

        Ok(Self { events, context, close_requested: false })
    }

    /// Loads the GL function pointers from this window's context.
    pub fn resolve_gpu(&self) -> Result<GlApi> {
        let context = &self.context;
        let gpu = GlApi::resolve(|symbol| context.get_proc_address(symbol))?;
        info!("resolved OpenGL entry points");
        Ok(gpu)
    }
}

fn classify_creation_error(e: CreationError) -> BootstrapError {
    match e {
        CreationError::NoBackendAvailable(_) => BootstrapError::SurfaceInitFailure(e.to_string()),
        _ => BootstrapError::SurfaceCreateFailure(e.to_string()),
    }
}

impl Surface for GlWindow {
    fn drawable_size(&self) -> (u32, u32) {
        let size = self.context.window().inner_size();
        (size.width, size.height)
    }

    fn should_close(&self) -> bool {
        self.close_requested
    }

    fn poll_events(&mut self) {
        let context = &self.context;
        let close_requested = &mut self.close_requested;

        self.events.run_return(|event, _, control_flow| {
            *control_flow = ControlFlow::Poll;

            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => *close_requested = true,
                    WindowEvent::Resized(size) => context.resize(size),
                    _ => {}
                },
                Event::MainEventsCleared => *control_flow = ControlFlow::Exit,
                _ => {}
            }
        });
    }

    fn swap_buffers(&mut self) -> std::result::Result<(), String> {
        self.context.swap_buffers().map_err(|e| e.to_string())
    }
}

impl Drop for GlWindow {
    fn drop(&mut self) {
        debug!("destroying window");
    }
}
