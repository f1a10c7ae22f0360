use crate::driver::{GlDriver, Viewport};
use crate::error::Result;
use crate::gl::Gl;

impl<D: GlDriver> Gl<D> {
    /// Sets the viewport, skipping the native call when the rectangle does
    /// not change.
    pub fn set_viewport(&mut self, viewport: Viewport) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.viewport() == Some(viewport) {
            return Ok(());
        }
        driver.set_viewport(viewport);
        ctx.cache.set_viewport(viewport);
        Ok(())
    }

    /// The viewport last set through this context, if any.
    pub fn viewport(&self) -> Result<Option<Viewport>> {
        Ok(self.require_current()?.cache.viewport())
    }
}
