//! Hunt Session - the flows a client screen calls into
//!
//! A [`HuntSession`] owns the catalog, the chapter gate, the local store and
//! the sync client. It is built explicitly and passed to whoever needs it;
//! there is no global instance.

mod error;
mod session;

pub use error::{Error, Result};
pub use session::{HuntSession, LoginOutcome, ScanOutcome};
