pub mod opengl;
mod utils;

pub use self::opengl::GlApi;
