//! GL object identity, ownership and binding-state tracking.
//!
//! This crate is the layer between the Vantage renderer and the native
//! graphics API. It decides *whether* a command may be issued and whether a
//! binding call is needed at all; it does not issue draw commands itself.
//!
//! Three ideas carry the whole crate:
//!
//! * Every object and context gets a process-unique [`Uid`] on top of the
//!   driver's reusable native name, so nothing in this layer can confuse a
//!   recycled name with the object that used to wear it.
//! * Handles are move-only and stamped with who may use them: shareable kinds
//!   (buffers, textures, programs, shaders) with their share group, the rest
//!   (framebuffers, vertex arrays) with their exact creating context. One
//!   centralized check rejects use from anywhere else.
//! * Each context mirrors its own binding state in a cache, and bind calls
//!   that would not change anything are skipped.
//!
//! The session object [`Gl`] holds the driver, the contexts and the current
//! context; there is no hidden thread-local state. Run one session per thread
//! of control.
//!
//! ```
//! use vantage_gl::driver::HeadlessDriver;
//! use vantage_gl::{BufferTarget, ContextDesc, Gl, SurfaceId};
//!
//! fn main() -> vantage_gl::Result<()> {
//!     let mut gl = Gl::new(HeadlessDriver::new());
//!
//!     let ctx = gl.create_context(ContextDesc::default())?;
//!     gl.make_current(ctx, SurfaceId(0))?;
//!
//!     let buffer = gl.create_buffer()?;
//!     gl.bind_buffer(&buffer, BufferTarget::Array)?;
//!     assert!(gl.is_buffer_bound(&buffer, BufferTarget::Array)?);
//!
//!     // Already bound: this is a pure cache hit, no native call.
//!     gl.bind_buffer(&buffer, BufferTarget::Array)?;
//!
//!     gl.delete_buffer(buffer)?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod context;
pub mod driver;
pub mod error;
pub mod gl;
pub mod handle;
pub mod ident;
mod ops;

pub use cache::MAX_TEXTURE_UNITS;
pub use context::{Context, ContextDesc, ContextId};
pub use driver::{
    BindingPoint, BufferTarget, DriverErrorCode, FramebufferSlot, FramebufferTarget, GlDriver,
    ObjectKind, RawContext, RawName, ShaderStage, SurfaceId, TextureTarget, Viewport,
};
pub use error::{GlError, Result};
pub use gl::Gl;
pub use handle::{
    Buffer, Framebuffer, GlObject, Ownership, Program, Shader, Texture, VertexArray,
};
pub use ident::Uid;
