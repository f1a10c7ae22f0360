//! Error types for the object and binding layer.
//!
//! Every failure here is either a violated precondition (no current context,
//! object used outside its sharing scope) or a native driver failure. All of
//! them are surfaced immediately; nothing in this layer retries or repairs
//! state behind the caller's back.

use crate::driver::{DriverErrorCode, ObjectKind};
use crate::ident::Uid;
use snafu::Snafu;

pub type Result<T, E = GlError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(context(suffix(Err)), visibility(pub(crate)))]
pub enum GlError {
    /// An operation that needs a current context ran without one.
    #[snafu(display("no context is current on this session"))]
    NoCurrentContext,

    /// An object was used from a context outside its sharing scope.
    #[snafu(display("{kind:?} object {uid} is not visible to the current context"))]
    NotOwned { kind: ObjectKind, uid: Uid },

    /// The native driver reported a failure.
    #[snafu(display("driver error: {code:?}"))]
    Driver { code: DriverErrorCode },
}
