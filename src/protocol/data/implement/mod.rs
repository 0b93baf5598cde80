//! Codec trait implementations for core/std types.

mod collection;
mod primitive;
mod string;
mod tuple;

pub(crate) use string::*;
