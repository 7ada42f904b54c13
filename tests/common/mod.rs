#![allow(dead_code)]

mod mocks;
mod test_utils;

pub use mocks::*;
pub use test_utils::*;
