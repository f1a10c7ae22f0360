use crate::driver::GlDriver;
use crate::error::Result;
use crate::gl::Gl;
use crate::handle::VertexArray;

impl<D: GlDriver> Gl<D> {
    /// Binds `vertex_array`, skipping the native call when it is already
    /// bound.
    pub fn bind_vertex_array(&mut self, vertex_array: &VertexArray) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(vertex_array)?;
        if ctx.cache.vertex_array() == Some(vertex_array.uid()) {
            return Ok(());
        }
        driver.bind_vertex_array(Some(vertex_array.name()));
        ctx.cache.set_vertex_array(Some(vertex_array.uid()));
        Ok(())
    }

    /// Unbinds the vertex array, if any is bound.
    pub fn unbind_vertex_array(&mut self) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.vertex_array().is_none() {
            return Ok(());
        }
        driver.bind_vertex_array(None);
        ctx.cache.set_vertex_array(None);
        Ok(())
    }

    /// Whether `vertex_array` is the bound vertex array.
    pub fn is_vertex_array_bound(&self, vertex_array: &VertexArray) -> Result<bool> {
        let ctx = self.require_owned(vertex_array)?;
        Ok(ctx.cache.vertex_array() == Some(vertex_array.uid()))
    }

    /// Whether any vertex array is bound.
    pub fn is_any_vertex_array_bound(&self) -> Result<bool> {
        Ok(self.require_current()?.cache.vertex_array().is_some())
    }
}
