mod logging;

pub use logging::init_logging;

pub use tracing;

/// Panics in debug builds, logs an error in release builds.
#[macro_export]
macro_rules! debug_panic {
    ($($arg:tt)*) => {
        if cfg!(debug_assertions) {
            panic!($($arg)*);
        } else {
            $crate::tracing::error!($($arg)*);
        }
    };
}
