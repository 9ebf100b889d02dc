#![cfg_attr(feature = "nightly", feature(test))]
#[cfg(feature = "nightly")]
extern crate test;

pub mod msg_opt;
pub mod ops;
mod sync;

pub use msg_opt::{Message, MsgOpt, MsgOptError};
