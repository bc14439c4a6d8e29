//! Library-level log macros.
//!
//! With the `logging` feature these are the `tracing` macros; without it they
//! expand to nothing. The crate never installs a subscriber itself.
//!
//! ```rust,ignore
//! use crate::logging::{debug, warn};
//!
//! debug!(token = token, "store handle issued");
//! warn!(error = %err, "batch delete failed");
//! ```

#[cfg(feature = "logging")]
mod imp {
    pub(crate) use tracing::{debug, error, info, trace, warn};
}

#[cfg(not(feature = "logging"))]
mod imp {
    macro_rules! discard {
        ($($arg:tt)*) => {};
    }

    pub(crate) use discard as debug;
    pub(crate) use discard as error;
    pub(crate) use discard as info;
    pub(crate) use discard as trace;
    pub(crate) use discard as warn;
}

#[allow(unused_imports)]
pub(crate) use imp::{debug, error, info, trace, warn};
