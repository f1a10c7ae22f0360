//! Move-only handles for native GL objects.
//!
//! A [`GlObject`] couples the driver's reusable name with a process-unique
//! [`Uid`] and an [`Ownership`] stamp naming who may use it. The kind of object
//! lives in the type parameter, so a buffer handle cannot be passed where a
//! texture handle is expected, and whether a kind is shareable across contexts
//! is decided by its marker type rather than checked ad hoc per call site.
//!
//! Handles are move-only. There is no way to duplicate one, so the "moved-from
//! handle must never be used" rule of the underlying API is enforced by the
//! compiler instead of a runtime sentinel. Deletion goes through
//! [`Gl::delete_buffer`](crate::Gl::delete_buffer) and friends because the
//! native delete call needs a current context that owns the object; a handle
//! that is dropped without being deleted leaks its native name and logs a
//! warning.

use crate::driver::{ObjectKind, RawName};
use crate::ident::Uid;
use std::fmt;
use std::marker::PhantomData;
use tracing::warn;

/// Who may use an object: every context of a share group, or one exact context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ownership {
    /// Usable by every context whose share group carries this uid.
    ShareGroup(Uid),
    /// Usable only by the context with this uid.
    Exclusive(Uid),
}

/// Marker trait tying a handle type to its native object kind.
pub trait GlKind {
    const KIND: ObjectKind;
    /// Whether the native API shares this kind across a share group.
    const SHARED: bool;
}

macro_rules! gl_kind {
    ($(#[$doc:meta])* $marker:ident, $kind:ident, shared: $shared:expr) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $marker;

        impl GlKind for $marker {
            const KIND: ObjectKind = ObjectKind::$kind;
            const SHARED: bool = $shared;
        }
    };
}

gl_kind!(BufferKind, Buffer, shared: true);
gl_kind!(TextureKind, Texture, shared: true);
gl_kind!(ProgramKind, Program, shared: true);
gl_kind!(ShaderKind, Shader, shared: true);
gl_kind!(FramebufferKind, Framebuffer, shared: false);
gl_kind!(VertexArrayKind, VertexArray, shared: false);

pub type Buffer = GlObject<BufferKind>;
pub type Texture = GlObject<TextureKind>;
pub type Program = GlObject<ProgramKind>;
pub type Shader = GlObject<ShaderKind>;
pub type Framebuffer = GlObject<FramebufferKind>;
pub type VertexArray = GlObject<VertexArrayKind>;

/// An exclusively owned native object of kind `K`.
pub struct GlObject<K: GlKind> {
    name: RawName,
    uid: Uid,
    owner: Ownership,
    _kind: PhantomData<K>,
}

impl<K: GlKind> GlObject<K> {
    pub(crate) fn new(name: RawName, owner: Ownership) -> Self {
        GlObject {
            name,
            uid: Uid::next(),
            owner,
            _kind: PhantomData,
        }
    }

    /// The native name. Only meaningful to the driver that allocated it.
    pub fn name(&self) -> RawName {
        self.name
    }

    /// The process-unique identity of this object.
    pub fn uid(&self) -> Uid {
        self.uid
    }

    pub fn ownership(&self) -> Ownership {
        self.owner
    }

    /// Consumes the handle without running the leak warning, handing the
    /// native name back for deletion.
    pub(crate) fn into_raw(self) -> RawName {
        let name = self.name;
        std::mem::forget(self);
        name
    }
}

impl<K: GlKind> fmt::Debug for GlObject<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlObject")
            .field("kind", &K::KIND)
            .field("name", &self.name.get())
            .field("uid", &self.uid)
            .field("owner", &self.owner)
            .finish()
    }
}

impl<K: GlKind> Drop for GlObject<K> {
    fn drop(&mut self) {
        warn!(
            kind = ?K::KIND,
            uid = %self.uid,
            name = self.name.get(),
            "object dropped without being deleted; its native name leaks"
        );
    }
}
