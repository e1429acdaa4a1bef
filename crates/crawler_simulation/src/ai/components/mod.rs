//! AI components

pub mod brain;

#[cfg(test)]
mod brain_tests;

pub use brain::*;
