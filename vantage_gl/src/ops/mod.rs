//! Binding operations, one module per resource kind.
//!
//! Every operation follows the same contract: existence guard, ownership guard
//! where a handle is involved, cache consult, native call only when the cache
//! disagrees, cache update. The `is_*` queries are pure cache reads.

mod buffer;
mod framebuffer;
mod program;
mod texture;
mod vertex_array;
mod viewport;
