//! Framebuffer binding. The read and draw slots are tracked independently;
//! the complete bind drives both with a single native call.

use crate::driver::{FramebufferSlot, FramebufferTarget, GlDriver};
use crate::error::Result;
use crate::gl::Gl;
use crate::handle::Framebuffer;

impl<D: GlDriver> Gl<D> {
    /// Binds `framebuffer` to both the read and the draw slot. Elided only
    /// when both slots already hold it; a single native complete bind is
    /// issued otherwise.
    pub fn bind_framebuffer(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(framebuffer)?;
        let uid = Some(framebuffer.uid());
        if ctx.cache.framebuffer(FramebufferSlot::Read) == uid
            && ctx.cache.framebuffer(FramebufferSlot::Draw) == uid
        {
            return Ok(());
        }
        driver.bind_framebuffer(FramebufferTarget::ReadDraw, Some(framebuffer.name()));
        ctx.cache.set_framebuffer(FramebufferSlot::Read, uid);
        ctx.cache.set_framebuffer(FramebufferSlot::Draw, uid);
        Ok(())
    }

    /// Binds `framebuffer` to the read slot only.
    pub fn bind_read_framebuffer(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        self.bind_framebuffer_slot(framebuffer, FramebufferSlot::Read)
    }

    /// Binds `framebuffer` to the draw slot only.
    pub fn bind_draw_framebuffer(&mut self, framebuffer: &Framebuffer) -> Result<()> {
        self.bind_framebuffer_slot(framebuffer, FramebufferSlot::Draw)
    }

    fn bind_framebuffer_slot(
        &mut self,
        framebuffer: &Framebuffer,
        slot: FramebufferSlot,
    ) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(framebuffer)?;
        if ctx.cache.framebuffer(slot) == Some(framebuffer.uid()) {
            return Ok(());
        }
        driver.bind_framebuffer(slot_target(slot), Some(framebuffer.name()));
        ctx.cache.set_framebuffer(slot, Some(framebuffer.uid()));
        Ok(())
    }

    /// Unbinds both framebuffer slots; does nothing when both are already
    /// empty.
    pub fn unbind_framebuffer(&mut self) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.framebuffer(FramebufferSlot::Read).is_none()
            && ctx.cache.framebuffer(FramebufferSlot::Draw).is_none()
        {
            return Ok(());
        }
        driver.bind_framebuffer(FramebufferTarget::ReadDraw, None);
        ctx.cache.set_framebuffer(FramebufferSlot::Read, None);
        ctx.cache.set_framebuffer(FramebufferSlot::Draw, None);
        Ok(())
    }

    pub fn unbind_read_framebuffer(&mut self) -> Result<()> {
        self.unbind_framebuffer_slot(FramebufferSlot::Read)
    }

    pub fn unbind_draw_framebuffer(&mut self) -> Result<()> {
        self.unbind_framebuffer_slot(FramebufferSlot::Draw)
    }

    fn unbind_framebuffer_slot(&mut self, slot: FramebufferSlot) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.framebuffer(slot).is_none() {
            return Ok(());
        }
        driver.bind_framebuffer(slot_target(slot), None);
        ctx.cache.set_framebuffer(slot, None);
        Ok(())
    }

    /// Whether `framebuffer` is bound to `slot`.
    pub fn is_framebuffer_bound(
        &self,
        framebuffer: &Framebuffer,
        slot: FramebufferSlot,
    ) -> Result<bool> {
        let ctx = self.require_owned(framebuffer)?;
        Ok(ctx.cache.framebuffer(slot) == Some(framebuffer.uid()))
    }

    /// Whether anything is bound to `slot`.
    pub fn is_framebuffer_slot_bound(&self, slot: FramebufferSlot) -> Result<bool> {
        Ok(self.require_current()?.cache.framebuffer(slot).is_some())
    }
}

fn slot_target(slot: FramebufferSlot) -> FramebufferTarget {
    match slot {
        FramebufferSlot::Read => FramebufferTarget::Read,
        FramebufferSlot::Draw => FramebufferTarget::Draw,
    }
}
