//! The lessons themselves: what to set up before the frame loop starts.

use log::info;

use bootstrap::{ClearColor, GraphicsBootstrap, Result, ShaderSource, SurfaceConfig};

use crate::interface::window::GlWindow;

pub const DEFAULT_VERTEX_SHADER: &str = include_str!("graphics/shaders/triangle.vert");
pub const DEFAULT_FRAGMENT_SHADER: &str = include_str!("graphics/shaders/triangle.frag");

/// One triangle filling the whole viewport before the vertex shader scales it down. The centre of
/// the screen is (0, 0).
#[rustfmt::skip]
pub const TRIANGLE: [f32; 9] = [
    -1.0, -1.0, 0.0,
     1.0, -1.0, 0.0,
     0.0,  1.0, 0.0,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lesson {
    /// An empty window cleared to a solid colour every frame.
    Window,
    /// A triangle drawn with a vertex and a fragment shader.
    Triangle,
}

impl Lesson {
    pub fn default_clear_color(self) -> ClearColor {
        match self {
            Lesson::Window => ClearColor::RED,
            Lesson::Triangle => ClearColor::BLACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LessonConfig {
    pub lesson: Lesson,
    pub surface: SurfaceConfig,
    pub clear_color: ClearColor,
    pub vertex: ShaderSource,
    pub fragment: ShaderSource,
    pub log_filter: Option<String>,
}

impl LessonConfig {
    pub fn new(lesson: Lesson) -> Self {
        Self {
            lesson,
            surface: SurfaceConfig::default(),
            clear_color: lesson.default_clear_color(),
            vertex: ShaderSource::from(DEFAULT_VERTEX_SHADER),
            fragment: ShaderSource::from(DEFAULT_FRAGMENT_SHADER),
            log_filter: None,
        }
    }
}

/// Opens the window, sets the lesson up and runs it until the window is closed. Returns the
/// number of frames presented.
///
/// Whatever was created is released before returning, whether setup succeeded or not.
pub fn run(config: &LessonConfig) -> Result<u64> {
    let window = GlWindow::open(&config.surface)?;
    let gpu = window.resolve_gpu()?;
    let mut bootstrap = GraphicsBootstrap::new(window, gpu, config.clear_color)?;
    info!("clearing to {} each frame", bootstrap.clear_color());

    let setup = match config.lesson {
        Lesson::Window => Ok(()),
        Lesson::Triangle => {
            info!("setting up the triangle lesson");
            bootstrap.upload_geometry(&TRIANGLE)
                .and_then(|_| bootstrap.build_program(&config.vertex, &config.fragment))
        }
    };

    let result = setup.and_then(|_| bootstrap.run());
    bootstrap.shutdown();

    result
}
