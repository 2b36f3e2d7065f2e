//! Error handling for archive operations
//!
//! Every decoder and store reports failures through [`WolfError`], built with
//! thiserror. Structural errors inside one unit are also collected per store
//! as [`UnitFailure`](crate::UnitFailure) records.

pub use crate::common::Result;
pub use crate::common::WolfError;
