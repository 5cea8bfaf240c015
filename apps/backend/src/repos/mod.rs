//! Repository layer: domain models over the adapter query functions.

pub mod games;
