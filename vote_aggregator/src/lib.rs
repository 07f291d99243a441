#[macro_use]
extern crate serde;

mod action;
mod assemble;
mod error;
mod lookup;
mod serde_hex;
mod tally;
mod transaction;
mod witness;

pub use action::*;
pub use assemble::*;
pub use error::*;
pub use lookup::*;
pub use serde_hex::*;
pub use tally::*;
pub use transaction::*;
pub use witness::*;

#[cfg(test)]
mod tests;
