//! Per-context mirror of native binding state.
//!
//! Each context owns one [`BindingCache`]. The bind operations on
//! [`Gl`](crate::Gl) are its only readers and writers; they consult it before
//! issuing a native call and skip the call when it would not change anything.
//!
//! Invariant: while a context is current, its cache equals the true native
//! binding state of that context. Slots store uids and never own anything; the
//! object itself stays owned by its handle. The one place the mirror can go
//! stale is deleting an object that some cache still records as bound, see the
//! notes on [`Gl::delete_buffer`](crate::Gl::delete_buffer).

use crate::driver::{BufferTarget, FramebufferSlot, TextureTarget, Viewport};
use crate::ident::Uid;

/// Combined texture unit count mirrored by the cache.
pub const MAX_TEXTURE_UNITS: usize = 32;

#[derive(Debug)]
pub(crate) struct BindingCache {
    buffers: [Option<Uid>; BufferTarget::COUNT],
    read_framebuffer: Option<Uid>,
    draw_framebuffer: Option<Uid>,
    program: Option<Uid>,
    vertex_array: Option<Uid>,
    active_unit: u32,
    units: [Option<(Uid, TextureTarget)>; MAX_TEXTURE_UNITS],
    viewport: Option<Viewport>,
}

impl BindingCache {
    /// A fresh context starts with nothing bound and unit 0 active, which is
    /// exactly the native default state.
    pub(crate) fn new() -> Self {
        BindingCache {
            buffers: [None; BufferTarget::COUNT],
            read_framebuffer: None,
            draw_framebuffer: None,
            program: None,
            vertex_array: None,
            active_unit: 0,
            units: [None; MAX_TEXTURE_UNITS],
            viewport: None,
        }
    }

    pub(crate) fn buffer(&self, target: BufferTarget) -> Option<Uid> {
        self.buffers[target.index()]
    }

    pub(crate) fn set_buffer(&mut self, target: BufferTarget, uid: Option<Uid>) {
        self.buffers[target.index()] = uid;
    }

    pub(crate) fn framebuffer(&self, slot: FramebufferSlot) -> Option<Uid> {
        match slot {
            FramebufferSlot::Read => self.read_framebuffer,
            FramebufferSlot::Draw => self.draw_framebuffer,
        }
    }

    pub(crate) fn set_framebuffer(&mut self, slot: FramebufferSlot, uid: Option<Uid>) {
        match slot {
            FramebufferSlot::Read => self.read_framebuffer = uid,
            FramebufferSlot::Draw => self.draw_framebuffer = uid,
        }
    }

    pub(crate) fn program(&self) -> Option<Uid> {
        self.program
    }

    pub(crate) fn set_program(&mut self, uid: Option<Uid>) {
        self.program = uid;
    }

    pub(crate) fn vertex_array(&self) -> Option<Uid> {
        self.vertex_array
    }

    pub(crate) fn set_vertex_array(&mut self, uid: Option<Uid>) {
        self.vertex_array = uid;
    }

    pub(crate) fn active_unit(&self) -> u32 {
        self.active_unit
    }

    pub(crate) fn set_active_unit(&mut self, unit: u32) {
        debug_assert!((unit as usize) < MAX_TEXTURE_UNITS);
        self.active_unit = unit;
    }

    pub(crate) fn unit(&self, unit: u32) -> Option<(Uid, TextureTarget)> {
        self.units[unit as usize]
    }

    pub(crate) fn set_unit(&mut self, unit: u32, bound: Option<(Uid, TextureTarget)>) {
        self.units[unit as usize] = bound;
    }

    pub(crate) fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub(crate) fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_slots_are_independent() {
        let mut cache = BindingCache::new();
        let uid = Uid::next();

        cache.set_buffer(BufferTarget::Array, Some(uid));
        assert_eq!(cache.buffer(BufferTarget::Array), Some(uid));
        for target in BufferTarget::ALL {
            if target != BufferTarget::Array {
                assert_eq!(cache.buffer(target), None);
            }
        }
    }

    #[test]
    fn framebuffer_slots_are_independent() {
        let mut cache = BindingCache::new();
        let uid = Uid::next();

        cache.set_framebuffer(FramebufferSlot::Draw, Some(uid));
        assert_eq!(cache.framebuffer(FramebufferSlot::Draw), Some(uid));
        assert_eq!(cache.framebuffer(FramebufferSlot::Read), None);
    }

    #[test]
    fn texture_units_track_uid_and_target() {
        let mut cache = BindingCache::new();
        let uid = Uid::next();

        cache.set_unit(3, Some((uid, TextureTarget::CubeMap)));
        assert_eq!(cache.unit(3), Some((uid, TextureTarget::CubeMap)));
        assert_eq!(cache.unit(0), None);
        assert_eq!(cache.active_unit(), 0);
    }
}
