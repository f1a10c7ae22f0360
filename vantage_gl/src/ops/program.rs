use crate::driver::GlDriver;
use crate::error::Result;
use crate::gl::Gl;
use crate::handle::Program;

impl<D: GlDriver> Gl<D> {
    /// Makes `program` the active program, skipping the native call when it
    /// already is.
    pub fn use_program(&mut self, program: &Program) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(program)?;
        if ctx.cache.program() == Some(program.uid()) {
            return Ok(());
        }
        driver.use_program(Some(program.name()));
        ctx.cache.set_program(Some(program.uid()));
        Ok(())
    }

    /// Deactivates the active program, if any.
    pub fn clear_program(&mut self) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        if ctx.cache.program().is_none() {
            return Ok(());
        }
        driver.use_program(None);
        ctx.cache.set_program(None);
        Ok(())
    }

    /// Whether `program` is the active program.
    pub fn is_program_used(&self, program: &Program) -> Result<bool> {
        let ctx = self.require_owned(program)?;
        Ok(ctx.cache.program() == Some(program.uid()))
    }

    /// Whether any program is active.
    pub fn is_any_program_used(&self) -> Result<bool> {
        Ok(self.require_current()?.cache.program().is_some())
    }
}
