/// A window with a current OpenGL context, polled rather than driven by callbacks.
///
/// Creation, making the context current and tearing the window down belong to the implementor's
/// constructor and `Drop`; the setup sequence only needs what happens after that.
pub trait Surface {
    /// Size of the default framebuffer in physical pixels. Under display scaling this is not the
    /// size the window was requested at.
    fn drawable_size(&self) -> (u32, u32);

    fn should_close(&self) -> bool;

    /// Handles everything queued since the last call and returns without waiting for more.
    fn poll_events(&mut self);

    /// Shows the back buffer.
    fn swap_buffers(&mut self) -> Result<(), String>;
}
