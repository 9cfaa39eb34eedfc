//! Incremental net benefit formula core.

pub mod inb;

pub use inb::combine::*;
pub use inb::cost::*;
pub use inb::formula::*;
