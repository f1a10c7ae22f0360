//! The session object owning the driver, the contexts and the current-context
//! state.
//!
//! [`Gl`] replaces the hidden thread-local "current context" pointer found in
//! classic GL wrappers with explicit state: whoever holds the session decides
//! what is current, and every operation that needs a context goes through the
//! session. Run one `Gl` per thread of control; the `&mut self` API makes
//! concurrent use of a single session impossible without external
//! synchronization, which matches the native API's threading rules.

use crate::context::{Context, ContextDesc, ContextId};
use crate::driver::{DriverErrorCode, GlDriver, ObjectKind, ShaderStage, SurfaceId};
use crate::error::{DriverErr, NoCurrentContextErr, NotOwnedErr, Result};
use crate::handle::{
    Buffer, Framebuffer, GlKind, GlObject, Program, Shader, ShaderKind, Texture, VertexArray,
};
use slotmap::SlotMap;
use snafu::{OptionExt, ensure};
use tracing::{debug, trace};

pub struct Gl<D: GlDriver> {
    driver: D,
    contexts: SlotMap<ContextId, Context>,
    current: Option<ContextId>,
}

impl<D: GlDriver> Gl<D> {
    pub fn new(driver: D) -> Self {
        Gl {
            driver,
            contexts: SlotMap::with_key(),
            current: None,
        }
    }

    /// Read access to the driver, e.g. for native state queries.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    // ------------------------------------------------------------------
    // Context lifecycle and current-context management
    // ------------------------------------------------------------------

    /// Creates a context. With [`ContextDesc::share_with`] the new context
    /// joins that context's share group; a dead share target is reported as a
    /// driver failure, which is how native APIs surface it too.
    pub fn create_context(&mut self, desc: ContextDesc) -> Result<ContextId> {
        let share = match desc.share_with {
            Some(id) => {
                let ctx = self.contexts.get(id).context(DriverErr {
                    code: DriverErrorCode::InvalidValue,
                })?;
                Some((ctx.raw(), ctx.share_group()))
            }
            None => None,
        };

        let raw = self
            .driver
            .create_context(share.map(|(raw, _)| raw))
            .map_err(|code| DriverErr { code }.build())?;

        let ctx = Context::new(raw, share.map(|(_, group)| group));
        debug!(uid = %ctx.uid(), share_group = %ctx.share_group(), "created context");
        Ok(self.contexts.insert(ctx))
    }

    /// Destroys a context. Destroying the current context leaves the session
    /// with no current context. Unknown ids are ignored.
    pub fn destroy_context(&mut self, id: ContextId) {
        let Some(ctx) = self.contexts.remove(id) else {
            return;
        };
        if self.current == Some(id) {
            self.driver.clear_current();
            self.current = None;
        }
        self.driver.destroy_context(ctx.raw());
        debug!(uid = %ctx.uid(), "destroyed context");
    }

    /// Makes `id` the session's current context, bound to `surface`. The
    /// context's cache is left untouched: it still mirrors the binding state
    /// the context had when it was last current, which is exactly what the
    /// driver restores.
    pub fn make_current(&mut self, id: ContextId, surface: SurfaceId) -> Result<()> {
        let ctx = self.contexts.get(id).context(DriverErr {
            code: DriverErrorCode::ContextLost,
        })?;
        self.driver
            .make_current(ctx.raw(), surface)
            .map_err(|code| DriverErr { code }.build())?;
        self.current = Some(id);
        trace!(uid = %ctx.uid(), "context made current");
        Ok(())
    }

    /// Leaves the session with no current context.
    pub fn clear_current(&mut self) {
        if self.current.take().is_some() {
            self.driver.clear_current();
        }
    }

    pub fn current(&self) -> Option<ContextId> {
        self.current
    }

    pub fn is_current(&self, id: ContextId) -> bool {
        self.current == Some(id)
    }

    pub fn context(&self, id: ContextId) -> Option<&Context> {
        self.contexts.get(id)
    }

    // ------------------------------------------------------------------
    // Validation guards
    // ------------------------------------------------------------------

    /// Existence guard: the current context, or `NoCurrentContext`.
    pub(crate) fn require_current(&self) -> Result<&Context> {
        let id = self.current.context(NoCurrentContextErr)?;
        Ok(&self.contexts[id])
    }

    pub(crate) fn require_current_mut(&mut self) -> Result<(&mut Context, &mut D)> {
        let id = self.current.context(NoCurrentContextErr)?;
        Ok((&mut self.contexts[id], &mut self.driver))
    }

    /// Ownership guard: existence first, then the current context must be
    /// allowed to use `obj` per its ownership stamp.
    pub(crate) fn require_owned<K: GlKind>(&self, obj: &GlObject<K>) -> Result<&Context> {
        let ctx = self.require_current()?;
        ensure!(
            ctx.can_use(obj.ownership()),
            NotOwnedErr {
                kind: K::KIND,
                uid: obj.uid()
            }
        );
        Ok(ctx)
    }

    pub(crate) fn require_owned_mut<K: GlKind>(
        &mut self,
        obj: &GlObject<K>,
    ) -> Result<(&mut Context, &mut D)> {
        let id = self.current.context(NoCurrentContextErr)?;
        let ctx = &mut self.contexts[id];
        ensure!(
            ctx.can_use(obj.ownership()),
            NotOwnedErr {
                kind: K::KIND,
                uid: obj.uid()
            }
        );
        Ok((ctx, &mut self.driver))
    }

    // ------------------------------------------------------------------
    // Object lifecycle
    // ------------------------------------------------------------------

    fn create_object<K: GlKind>(&mut self) -> Result<GlObject<K>> {
        let owner = self.require_current()?.stamp(K::SHARED);
        let name = self
            .driver
            .create_object(K::KIND)
            .map_err(|code| DriverErr { code }.build())?;
        let obj = GlObject::new(name, owner);
        trace!(kind = ?K::KIND, uid = %obj.uid(), name = name.get(), "created object");
        Ok(obj)
    }

    fn delete_object<K: GlKind>(&mut self, obj: GlObject<K>) -> Result<()> {
        self.require_owned(&obj)?;
        let uid = obj.uid();
        let name = obj.into_raw();
        self.driver.delete_object(K::KIND, name);
        trace!(kind = ?K::KIND, uid = %uid, name = name.get(), "deleted object");
        Ok(())
    }

    pub fn create_buffer(&mut self) -> Result<Buffer> {
        self.create_object()
    }

    pub fn create_texture(&mut self) -> Result<Texture> {
        self.create_object()
    }

    pub fn create_program(&mut self) -> Result<Program> {
        self.create_object()
    }

    pub fn create_shader(&mut self, stage: ShaderStage) -> Result<Shader> {
        let owner = self.require_current()?.stamp(ShaderKind::SHARED);
        let name = self
            .driver
            .create_shader(stage)
            .map_err(|code| DriverErr { code }.build())?;
        let obj = GlObject::new(name, owner);
        trace!(kind = ?ObjectKind::Shader, uid = %obj.uid(), name = name.get(), ?stage, "created object");
        Ok(obj)
    }

    pub fn create_framebuffer(&mut self) -> Result<Framebuffer> {
        self.create_object()
    }

    pub fn create_vertex_array(&mut self) -> Result<VertexArray> {
        self.create_object()
    }

    /// Deletes a buffer. Requires a current context that owns it; on rejection
    /// the handle is dropped and its native name leaks.
    ///
    /// Deleting an object that some cache still records as bound leaves that
    /// cache slot stale: the driver has detached the object, the slot still
    /// names its uid, and the next bind or unbind on the slot may be elided
    /// incorrectly until the slot is driven to a new value. This layer accepts
    /// that staleness rather than keeping a registry of every context that
    /// could see the object.
    pub fn delete_buffer(&mut self, buffer: Buffer) -> Result<()> {
        self.delete_object(buffer)
    }

    /// Deletes a texture. See [`delete_buffer`](Self::delete_buffer) for the
    /// stale-cache caveat.
    pub fn delete_texture(&mut self, texture: Texture) -> Result<()> {
        self.delete_object(texture)
    }

    /// Deletes a program. See [`delete_buffer`](Self::delete_buffer) for the
    /// stale-cache caveat.
    pub fn delete_program(&mut self, program: Program) -> Result<()> {
        self.delete_object(program)
    }

    pub fn delete_shader(&mut self, shader: Shader) -> Result<()> {
        self.delete_object(shader)
    }

    /// Deletes a framebuffer. See [`delete_buffer`](Self::delete_buffer) for
    /// the stale-cache caveat.
    pub fn delete_framebuffer(&mut self, framebuffer: Framebuffer) -> Result<()> {
        self.delete_object(framebuffer)
    }

    /// Deletes a vertex array. See [`delete_buffer`](Self::delete_buffer) for
    /// the stale-cache caveat.
    pub fn delete_vertex_array(&mut self, vertex_array: VertexArray) -> Result<()> {
        self.delete_object(vertex_array)
    }
}
