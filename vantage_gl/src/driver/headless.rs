//! In-memory driver used for headless runs and tests.
//!
//! [`HeadlessDriver`] models the pieces of native behavior the layer above
//! depends on: name allocation with reuse after deletion, per-context binding
//! state, share-group object namespaces, and deletion detaching objects from
//! the deleting context's binding points. It also counts every native call it
//! receives so tests can verify that redundant calls are elided.

use super::{
    BindingPoint, BufferTarget, DriverErrorCode, FramebufferSlot, FramebufferTarget, GlDriver,
    ObjectKind, RawContext, RawName, ShaderStage, SurfaceId, TextureTarget, Viewport,
};
use std::collections::{HashMap, HashSet};
use std::num::NonZeroU32;
use vantage_utils::debug_panic;

/// Counts of native calls issued.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallCounters {
    pub make_current: usize,
    pub create_object: usize,
    pub delete_object: usize,
    pub bind_buffer: usize,
    pub active_texture: usize,
    pub bind_texture: usize,
    pub use_program: usize,
    pub bind_vertex_array: usize,
    pub bind_framebuffer: usize,
    pub set_viewport: usize,
}

/// Name allocation for one object kind within one namespace.
///
/// Freed names are handed out again LIFO, the pattern real drivers commonly
/// show and the reason the layer above pairs names with uids.
#[derive(Debug, Default)]
struct NamePool {
    next: u32,
    free: Vec<u32>,
    live: HashSet<u32>,
}

impl NamePool {
    fn alloc(&mut self) -> RawName {
        let raw = match self.free.pop() {
            Some(name) => name,
            None => {
                self.next += 1;
                self.next
            }
        };
        self.live.insert(raw);
        NonZeroU32::new(raw).expect("name pool allocates from 1")
    }

    fn release(&mut self, name: RawName) {
        if self.live.remove(&name.get()) {
            self.free.push(name.get());
        }
    }
}

#[derive(Debug, Default)]
struct KindPools {
    buffers: NamePool,
    textures: NamePool,
    programs: NamePool,
    shaders: NamePool,
    framebuffers: NamePool,
    vertex_arrays: NamePool,
}

impl KindPools {
    fn pool(&mut self, kind: ObjectKind) -> &mut NamePool {
        match kind {
            ObjectKind::Buffer => &mut self.buffers,
            ObjectKind::Texture => &mut self.textures,
            ObjectKind::Program => &mut self.programs,
            ObjectKind::Shader => &mut self.shaders,
            ObjectKind::Framebuffer => &mut self.framebuffers,
            ObjectKind::VertexArray => &mut self.vertex_arrays,
        }
    }

    fn is_live(&self, kind: ObjectKind, name: RawName) -> bool {
        let pool = match kind {
            ObjectKind::Buffer => &self.buffers,
            ObjectKind::Texture => &self.textures,
            ObjectKind::Program => &self.programs,
            ObjectKind::Shader => &self.shaders,
            ObjectKind::Framebuffer => &self.framebuffers,
            ObjectKind::VertexArray => &self.vertex_arrays,
        };
        pool.live.contains(&name.get())
    }
}

#[derive(Debug, Default)]
struct Bindings {
    buffers: HashMap<BufferTarget, RawName>,
    textures: HashMap<(u32, TextureTarget), RawName>,
    active_unit: u32,
    program: Option<RawName>,
    vertex_array: Option<RawName>,
    read_framebuffer: Option<RawName>,
    draw_framebuffer: Option<RawName>,
    viewport: Option<Viewport>,
}

#[derive(Debug)]
struct NativeContext {
    group: u32,
    exclusive: KindPools,
    bindings: Bindings,
    surface: Option<SurfaceId>,
}

#[derive(Debug, Default)]
struct ShareGroup {
    contexts: usize,
    shared: KindPools,
}

#[derive(Debug, Default)]
pub struct HeadlessDriver {
    contexts: HashMap<u32, NativeContext>,
    groups: HashMap<u32, ShareGroup>,
    current: Option<u32>,
    next_context: u32,
    next_group: u32,
    counters: CallCounters,
    fail_next_alloc: Option<DriverErrorCode>,
}

impl HeadlessDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counters(&self) -> &CallCounters {
        &self.counters
    }

    pub fn reset_counters(&mut self) {
        self.counters = CallCounters::default();
    }

    /// Makes the next object allocation fail with `code`, for error-path tests.
    pub fn fail_next_allocation(&mut self, code: DriverErrorCode) {
        self.fail_next_alloc = Some(code);
    }

    /// The surface the current context is bound to, if any.
    pub fn current_surface(&self) -> Option<SurfaceId> {
        self.contexts.get(&self.current?)?.surface
    }

    /// Whether `name` is a live object of `kind` as seen by the current context.
    pub fn is_live(&self, kind: ObjectKind, name: RawName) -> bool {
        let Some(ctx) = self.current.and_then(|id| self.contexts.get(&id)) else {
            return false;
        };
        if kind.is_shared() {
            self.groups
                .get(&ctx.group)
                .is_some_and(|group| group.shared.is_live(kind, name))
        } else {
            ctx.exclusive.is_live(kind, name)
        }
    }

    fn bindings_mut(&mut self) -> Option<&mut Bindings> {
        let id = self.current?;
        Some(&mut self.contexts.get_mut(&id)?.bindings)
    }

    /// Detaches a deleted object from the deleting context's binding points,
    /// like the native API. Other contexts in the share group keep whatever
    /// they had bound.
    fn scrub(bindings: &mut Bindings, kind: ObjectKind, name: RawName) {
        match kind {
            ObjectKind::Buffer => bindings.buffers.retain(|_, bound| *bound != name),
            ObjectKind::Texture => bindings.textures.retain(|_, bound| *bound != name),
            ObjectKind::Program => {
                if bindings.program == Some(name) {
                    bindings.program = None;
                }
            }
            ObjectKind::VertexArray => {
                if bindings.vertex_array == Some(name) {
                    bindings.vertex_array = None;
                }
            }
            ObjectKind::Framebuffer => {
                if bindings.read_framebuffer == Some(name) {
                    bindings.read_framebuffer = None;
                }
                if bindings.draw_framebuffer == Some(name) {
                    bindings.draw_framebuffer = None;
                }
            }
            ObjectKind::Shader => {}
        }
    }
}

impl GlDriver for HeadlessDriver {
    fn create_context(&mut self, share: Option<RawContext>) -> Result<RawContext, DriverErrorCode> {
        let group = match share {
            Some(ctx) => {
                let Some(shared) = self.contexts.get(&ctx.0) else {
                    return Err(DriverErrorCode::InvalidValue);
                };
                shared.group
            }
            None => {
                self.next_group += 1;
                self.groups.insert(self.next_group, ShareGroup::default());
                self.next_group
            }
        };
        self.groups
            .get_mut(&group)
            .expect("share group exists")
            .contexts += 1;

        self.next_context += 1;
        self.contexts.insert(
            self.next_context,
            NativeContext {
                group,
                exclusive: KindPools::default(),
                bindings: Bindings::default(),
                surface: None,
            },
        );
        Ok(RawContext(self.next_context))
    }

    fn destroy_context(&mut self, ctx: RawContext) {
        let Some(removed) = self.contexts.remove(&ctx.0) else {
            return;
        };
        if self.current == Some(ctx.0) {
            self.current = None;
        }
        if let Some(group) = self.groups.get_mut(&removed.group) {
            group.contexts -= 1;
            // Shared objects die with the last context of the group.
            if group.contexts == 0 {
                self.groups.remove(&removed.group);
            }
        }
    }

    fn make_current(&mut self, ctx: RawContext, surface: SurfaceId) -> Result<(), DriverErrorCode> {
        self.counters.make_current += 1;
        let Some(native) = self.contexts.get_mut(&ctx.0) else {
            return Err(DriverErrorCode::InvalidValue);
        };
        native.surface = Some(surface);
        self.current = Some(ctx.0);
        Ok(())
    }

    fn clear_current(&mut self) {
        self.current = None;
    }

    fn create_object(&mut self, kind: ObjectKind) -> Result<RawName, DriverErrorCode> {
        self.counters.create_object += 1;
        if let Some(code) = self.fail_next_alloc.take() {
            return Err(code);
        }
        let Some(id) = self.current else {
            return Err(DriverErrorCode::InvalidOperation);
        };
        let ctx = self.contexts.get_mut(&id).expect("current context exists");
        let pool = if kind.is_shared() {
            self.groups
                .get_mut(&ctx.group)
                .expect("share group exists")
                .shared
                .pool(kind)
        } else {
            ctx.exclusive.pool(kind)
        };
        Ok(pool.alloc())
    }

    fn create_shader(&mut self, _stage: ShaderStage) -> Result<RawName, DriverErrorCode> {
        self.create_object(ObjectKind::Shader)
    }

    fn delete_object(&mut self, kind: ObjectKind, name: RawName) {
        self.counters.delete_object += 1;
        let Some(id) = self.current else {
            debug_panic!("delete_object called with no current context");
            return;
        };
        let ctx = self.contexts.get_mut(&id).expect("current context exists");
        let pool = if kind.is_shared() {
            self.groups
                .get_mut(&ctx.group)
                .expect("share group exists")
                .shared
                .pool(kind)
        } else {
            ctx.exclusive.pool(kind)
        };
        pool.release(name);
        Self::scrub(&mut ctx.bindings, kind, name);
    }

    fn bind_buffer(&mut self, target: BufferTarget, name: Option<RawName>) {
        self.counters.bind_buffer += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("bind_buffer called with no current context");
            return;
        };
        match name {
            Some(name) => {
                bindings.buffers.insert(target, name);
            }
            None => {
                bindings.buffers.remove(&target);
            }
        }
    }

    fn active_texture(&mut self, unit: u32) {
        self.counters.active_texture += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("active_texture called with no current context");
            return;
        };
        bindings.active_unit = unit;
    }

    fn bind_texture(&mut self, target: TextureTarget, name: Option<RawName>) {
        self.counters.bind_texture += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("bind_texture called with no current context");
            return;
        };
        let unit = bindings.active_unit;
        match name {
            Some(name) => {
                bindings.textures.insert((unit, target), name);
            }
            None => {
                bindings.textures.remove(&(unit, target));
            }
        }
    }

    fn use_program(&mut self, name: Option<RawName>) {
        self.counters.use_program += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("use_program called with no current context");
            return;
        };
        bindings.program = name;
    }

    fn bind_vertex_array(&mut self, name: Option<RawName>) {
        self.counters.bind_vertex_array += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("bind_vertex_array called with no current context");
            return;
        };
        bindings.vertex_array = name;
    }

    fn bind_framebuffer(&mut self, target: FramebufferTarget, name: Option<RawName>) {
        self.counters.bind_framebuffer += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("bind_framebuffer called with no current context");
            return;
        };
        if matches!(target, FramebufferTarget::Read | FramebufferTarget::ReadDraw) {
            bindings.read_framebuffer = name;
        }
        if matches!(target, FramebufferTarget::Draw | FramebufferTarget::ReadDraw) {
            bindings.draw_framebuffer = name;
        }
    }

    fn set_viewport(&mut self, viewport: Viewport) {
        self.counters.set_viewport += 1;
        let Some(bindings) = self.bindings_mut() else {
            debug_panic!("set_viewport called with no current context");
            return;
        };
        bindings.viewport = Some(viewport);
    }

    fn bound_name(&self, point: BindingPoint) -> Option<RawName> {
        let bindings = &self.contexts.get(&self.current?)?.bindings;
        match point {
            BindingPoint::Buffer(target) => bindings.buffers.get(&target).copied(),
            BindingPoint::Texture { unit, target } => {
                bindings.textures.get(&(unit, target)).copied()
            }
            BindingPoint::Program => bindings.program,
            BindingPoint::VertexArray => bindings.vertex_array,
            BindingPoint::Framebuffer(FramebufferSlot::Read) => bindings.read_framebuffer,
            BindingPoint::Framebuffer(FramebufferSlot::Draw) => bindings.draw_framebuffer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver_with_context() -> (HeadlessDriver, RawContext) {
        let mut driver = HeadlessDriver::new();
        let ctx = driver.create_context(None).unwrap();
        driver.make_current(ctx, SurfaceId(0)).unwrap();
        (driver, ctx)
    }

    #[test]
    fn names_are_reused_after_deletion() {
        let (mut driver, _) = driver_with_context();
        let first = driver.create_object(ObjectKind::Buffer).unwrap();
        driver.delete_object(ObjectKind::Buffer, first);
        let second = driver.create_object(ObjectKind::Buffer).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn deletion_detaches_from_current_bindings() {
        let (mut driver, _) = driver_with_context();
        let name = driver.create_object(ObjectKind::Buffer).unwrap();
        driver.bind_buffer(BufferTarget::Array, Some(name));
        driver.delete_object(ObjectKind::Buffer, name);
        assert_eq!(driver.bound_name(BindingPoint::Buffer(BufferTarget::Array)), None);
    }

    #[test]
    fn shared_kinds_use_one_namespace_per_group() {
        let mut driver = HeadlessDriver::new();
        let a = driver.create_context(None).unwrap();
        let b = driver.create_context(Some(a)).unwrap();

        driver.make_current(a, SurfaceId(0)).unwrap();
        let first = driver.create_object(ObjectKind::Buffer).unwrap();
        driver.make_current(b, SurfaceId(0)).unwrap();
        let second = driver.create_object(ObjectKind::Buffer).unwrap();

        assert_ne!(first, second);
        assert!(driver.is_live(ObjectKind::Buffer, first));
    }

    #[test]
    fn exclusive_kinds_use_one_namespace_per_context() {
        let mut driver = HeadlessDriver::new();
        let a = driver.create_context(None).unwrap();
        let b = driver.create_context(Some(a)).unwrap();

        driver.make_current(a, SurfaceId(0)).unwrap();
        let first = driver.create_object(ObjectKind::VertexArray).unwrap();
        driver.make_current(b, SurfaceId(0)).unwrap();
        let second = driver.create_object(ObjectKind::VertexArray).unwrap();

        // Separate per-context pools start at the same name.
        assert_eq!(first, second);
    }

    #[test]
    fn forced_allocation_failure() {
        let (mut driver, _) = driver_with_context();
        driver.fail_next_allocation(DriverErrorCode::OutOfMemory);
        assert_eq!(
            driver.create_object(ObjectKind::Texture),
            Err(DriverErrorCode::OutOfMemory)
        );
        assert!(driver.create_object(ObjectKind::Texture).is_ok());
    }
}
