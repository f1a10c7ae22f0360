//! Texture binding. Texture slots are per texture unit, and the unit a bind
//! applies to is itself a piece of native state (the active unit), so the
//! unit-qualified operations may have to switch units first. That switch is
//! tracked and elided like any other binding call.
//!
//! The cache remembers one (texture, target) pair per unit. Binding a
//! different target on the same unit replaces that pair even though the
//! native binding under the previous target still holds, the same acceptance
//! as stale slots after deletion (see
//! [`Gl::delete_buffer`](crate::Gl::delete_buffer)).

use crate::cache::MAX_TEXTURE_UNITS;
use crate::driver::{DriverErrorCode, GlDriver, TextureTarget};
use crate::error::{DriverErr, Result};
use crate::gl::Gl;
use crate::handle::Texture;
use snafu::ensure;

fn check_unit(unit: u32) -> Result<()> {
    ensure!(
        (unit as usize) < MAX_TEXTURE_UNITS,
        DriverErr {
            code: DriverErrorCode::InvalidValue
        }
    );
    Ok(())
}

impl<D: GlDriver> Gl<D> {
    /// Switches the active texture unit, eliding the call when `unit` is
    /// already active.
    pub fn set_active_texture(&mut self, unit: u32) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        check_unit(unit)?;
        if ctx.cache.active_unit() == unit {
            return Ok(());
        }
        driver.active_texture(unit);
        ctx.cache.set_active_unit(unit);
        Ok(())
    }

    /// The currently active texture unit.
    pub fn active_texture(&self) -> Result<u32> {
        Ok(self.require_current()?.cache.active_unit())
    }

    /// Binds `texture` to `target` on whatever unit is currently active.
    pub fn bind_texture(&mut self, texture: &Texture, target: TextureTarget) -> Result<()> {
        let unit = self.require_current()?.cache.active_unit();
        self.bind_texture_at(unit, texture, target)
    }

    /// Binds `texture` to `target` on `unit`, switching the active unit when
    /// needed. Elided when the unit already holds this texture under this
    /// target.
    pub fn bind_texture_at(
        &mut self,
        unit: u32,
        texture: &Texture,
        target: TextureTarget,
    ) -> Result<()> {
        let (ctx, driver) = self.require_owned_mut(texture)?;
        check_unit(unit)?;
        if ctx.cache.unit(unit) == Some((texture.uid(), target)) {
            return Ok(());
        }
        if ctx.cache.active_unit() != unit {
            driver.active_texture(unit);
            ctx.cache.set_active_unit(unit);
        }
        driver.bind_texture(target, Some(texture.name()));
        ctx.cache.set_unit(unit, Some((texture.uid(), target)));
        Ok(())
    }

    /// Unbinds the texture on the active unit, if any.
    pub fn unbind_texture(&mut self) -> Result<()> {
        let unit = self.require_current()?.cache.active_unit();
        self.unbind_texture_at(unit)
    }

    /// Unbinds the texture on `unit`, if any. The native unbind goes to the
    /// target the cache recorded at bind time.
    pub fn unbind_texture_at(&mut self, unit: u32) -> Result<()> {
        let (ctx, driver) = self.require_current_mut()?;
        check_unit(unit)?;
        let Some((_, target)) = ctx.cache.unit(unit) else {
            return Ok(());
        };
        if ctx.cache.active_unit() != unit {
            driver.active_texture(unit);
            ctx.cache.set_active_unit(unit);
        }
        driver.bind_texture(target, None);
        ctx.cache.set_unit(unit, None);
        Ok(())
    }

    /// Whether `texture` is bound on the active unit.
    pub fn is_texture_bound(&self, texture: &Texture) -> Result<bool> {
        let ctx = self.require_owned(texture)?;
        let unit = ctx.cache.active_unit();
        Ok(ctx.cache.unit(unit).map(|(uid, _)| uid) == Some(texture.uid()))
    }

    /// Whether `texture` is bound on `unit`.
    pub fn is_texture_bound_at(&self, unit: u32, texture: &Texture) -> Result<bool> {
        let ctx = self.require_owned(texture)?;
        check_unit(unit)?;
        Ok(ctx.cache.unit(unit).map(|(uid, _)| uid) == Some(texture.uid()))
    }

    /// Whether any texture is bound on `unit`.
    pub fn is_texture_unit_bound(&self, unit: u32) -> Result<bool> {
        let ctx = self.require_current()?;
        check_unit(unit)?;
        Ok(ctx.cache.unit(unit).is_some())
    }
}
