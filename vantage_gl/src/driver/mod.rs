//! The boundary to the native graphics API.
//!
//! [`GlDriver`] is the exact surface this layer consumes from the platform:
//! create and delete native objects, bind them to targets, query what is bound,
//! and switch the current native context. Nothing in the crate reaches the
//! native API except through this trait, which is also what makes the binding
//! layer testable without a GPU (see [`headless`]).
//!
//! All calls are synchronous. Calls that touch binding state implicitly target
//! whichever native context is current, mirroring how the real API dispatches.

pub mod headless;

pub use headless::HeadlessDriver;

use std::num::NonZeroU32;

/// A native object name handed out by the driver.
///
/// Names are only unique among live objects of one kind and may be reused
/// after deletion; they carry no generation information of their own.
pub type RawName = NonZeroU32;

/// Opaque id of a native driver context.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawContext(pub u32);

/// Opaque id of a native output surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Native error codes surfaced by the driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DriverErrorCode {
    OutOfMemory,
    InvalidEnum,
    InvalidOperation,
    InvalidValue,
    ContextLost,
}

/// The kinds of native objects this layer manages.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Buffer,
    Texture,
    Program,
    Shader,
    Framebuffer,
    VertexArray,
}

impl ObjectKind {
    /// Whether the native API shares this kind across a share group.
    pub fn is_shared(self) -> bool {
        !matches!(self, ObjectKind::Framebuffer | ObjectKind::VertexArray)
    }
}

/// Buffer binding targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    Array,
    ElementArray,
    CopyRead,
    CopyWrite,
    PixelPack,
    PixelUnpack,
    TransformFeedback,
    Uniform,
}

impl BufferTarget {
    pub const COUNT: usize = 8;

    pub const ALL: [BufferTarget; Self::COUNT] = [
        BufferTarget::Array,
        BufferTarget::ElementArray,
        BufferTarget::CopyRead,
        BufferTarget::CopyWrite,
        BufferTarget::PixelPack,
        BufferTarget::PixelUnpack,
        BufferTarget::TransformFeedback,
        BufferTarget::Uniform,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Texture binding targets.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    D2,
    D3,
    D2Array,
    CubeMap,
}

/// The two framebuffer binding slots tracked by a context.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FramebufferSlot {
    Read,
    Draw,
}

/// Native framebuffer bind targets. `ReadDraw` is the "complete" bind that
/// drives both slots with one call.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FramebufferTarget {
    Read,
    Draw,
    ReadDraw,
}

/// Shader stages the driver can create shader objects for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
    Compute,
}

/// A viewport rectangle in window coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A queryable native binding point of the current context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BindingPoint {
    Buffer(BufferTarget),
    Texture { unit: u32, target: TextureTarget },
    Program,
    VertexArray,
    Framebuffer(FramebufferSlot),
}

/// Synchronous boundary to the native graphics API.
///
/// One implementation models one driver connection carrying any number of
/// native contexts. Binding calls target the current context; the layer above
/// guarantees a context is current before issuing them.
pub trait GlDriver {
    /// Creates a native context, sharing objects with `share` when given.
    fn create_context(&mut self, share: Option<RawContext>) -> Result<RawContext, DriverErrorCode>;

    /// Destroys a native context. Objects exclusive to it die with it.
    fn destroy_context(&mut self, ctx: RawContext);

    /// Makes `ctx` current, bound to the given output surface.
    fn make_current(&mut self, ctx: RawContext, surface: SurfaceId) -> Result<(), DriverErrorCode>;

    /// Leaves no context current.
    fn clear_current(&mut self);

    /// Allocates a native object of `kind` in the current context's namespace.
    fn create_object(&mut self, kind: ObjectKind) -> Result<RawName, DriverErrorCode>;

    /// Allocates a native shader object for `stage`.
    fn create_shader(&mut self, stage: ShaderStage) -> Result<RawName, DriverErrorCode>;

    /// Schedules deletion of a native object. The name may be reused afterwards.
    fn delete_object(&mut self, kind: ObjectKind, name: RawName);

    fn bind_buffer(&mut self, target: BufferTarget, name: Option<RawName>);

    fn active_texture(&mut self, unit: u32);

    /// Binds to `target` on the currently active texture unit.
    fn bind_texture(&mut self, target: TextureTarget, name: Option<RawName>);

    fn use_program(&mut self, name: Option<RawName>);

    fn bind_vertex_array(&mut self, name: Option<RawName>);

    fn bind_framebuffer(&mut self, target: FramebufferTarget, name: Option<RawName>);

    fn set_viewport(&mut self, viewport: Viewport);

    /// Queries the true native binding state of the current context.
    fn bound_name(&self, point: BindingPoint) -> Option<RawName>;
}
