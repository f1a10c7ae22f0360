use crate::driver::{BufferTarget, GlDriver};
use crate::error::Result;
use crate::gl::Gl;
use crate::handle::Buffer;

impl<D: GlDriver> Gl<D> {
    /// Binds `buffer` to `target`. The native call is skipped when the cache
    /// already records this buffer as bound there.
    pub fn bind_buffer(&mut self, buffer: &Buffer, target: BufferTarget) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(buffer)?;
        if ctx.cache.buffer(target) == Some(buffer.uid()) {
            return Ok(());
        }
        driver.bind_buffer(target, Some(buffer.name()));
        ctx.cache.set_buffer(target, Some(buffer.uid()));
        Ok(())
    }

    /// Unbinds whatever is bound to `target`; does nothing when the cache
    /// already shows the slot empty.
    pub fn unbind_buffer(&mut self, target: BufferTarget) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.buffer(target).is_none() {
            return Ok(());
        }
        driver.bind_buffer(target, None);
        ctx.cache.set_buffer(target, None);
        Ok(())
    }

    /// Whether `buffer` is the one bound to `target`.
    pub fn is_buffer_bound(&self, buffer: &Buffer, target: BufferTarget) -> Result<bool> {
        let ctx = self.require_owned(buffer)?;
        Ok(ctx.cache.buffer(target) == Some(buffer.uid()))
    }

    /// Whether anything is bound to `target`.
    pub fn is_buffer_target_bound(&self, target: BufferTarget) -> Result<bool> {
        Ok(self.require_current()?.cache.buffer(target).is_some())
    }
}
