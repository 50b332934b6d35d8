//! Core simulation primitives

pub mod round;
