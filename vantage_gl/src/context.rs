//! Logical GL contexts.
//!
//! A [`Context`] represents one connection to the driver. It carries its own
//! uid, the uid of its share group, and the [binding cache](crate::cache) that
//! mirrors what is bound while it is current. Contexts live inside a
//! [`Gl`](crate::Gl) session and are addressed by [`ContextId`].

use crate::cache::BindingCache;
use crate::driver::RawContext;
use crate::handle::Ownership;
use crate::ident::Uid;
use bon::Builder;
use slotmap::new_key_type;

new_key_type! {
    /// Key of a context within a [`Gl`](crate::Gl) session.
    pub struct ContextId;
}

/// Descriptor for creating a context.
#[derive(Debug, Clone, Default, Builder)]
pub struct ContextDesc {
    /// Context to share objects with. The new context joins its share group;
    /// without it the context forms a share group of its own.
    pub share_with: Option<ContextId>,
}

pub struct Context {
    uid: Uid,
    share_group: Uid,
    raw: RawContext,
    pub(crate) cache: BindingCache,
}

impl Context {
    pub(crate) fn new(raw: RawContext, share_group: Option<Uid>) -> Self {
        let uid = Uid::next();
        Context {
            uid,
            share_group: share_group.unwrap_or(uid),
            raw,
            cache: BindingCache::new(),
        }
    }

    pub fn uid(&self) -> Uid {
        self.uid
    }

    /// Uid shared by every context this one shares objects with. Equals
    /// [`uid`](Self::uid) for a context created without sharing.
    pub fn share_group(&self) -> Uid {
        self.share_group
    }

    pub(crate) fn raw(&self) -> RawContext {
        self.raw
    }

    /// The one ownership check every object kind goes through: share-group
    /// stamped objects are usable by the whole group, exclusive objects only
    /// by their exact creator.
    pub fn can_use(&self, owner: Ownership) -> bool {
        match owner {
            Ownership::ShareGroup(group) => group == self.share_group,
            Ownership::Exclusive(context) => context == self.uid,
        }
    }

    /// The ownership stamp for an object created under this context.
    pub(crate) fn stamp(&self, shared: bool) -> Ownership {
        if shared {
            Ownership::ShareGroup(self.share_group)
        } else {
            Ownership::Exclusive(self.uid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_group_when_not_sharing() {
        let ctx = Context::new(RawContext(1), None);
        assert_eq!(ctx.share_group(), ctx.uid());
    }

    #[test]
    fn ownership_check_distinguishes_stamps() {
        let group = Uid::next();
        let ctx = Context::new(RawContext(1), Some(group));

        assert!(ctx.can_use(Ownership::ShareGroup(group)));
        assert!(!ctx.can_use(Ownership::ShareGroup(Uid::next())));
        assert!(ctx.can_use(Ownership::Exclusive(ctx.uid())));
        assert!(!ctx.can_use(Ownership::Exclusive(group)));
    }
}
