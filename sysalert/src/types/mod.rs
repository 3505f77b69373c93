//! Data types flowing through a disk check

mod mail;
mod partition;
mod threshold;
mod usage;

pub use mail::*;
pub use partition::*;
pub use threshold::*;
pub use usage::*;
