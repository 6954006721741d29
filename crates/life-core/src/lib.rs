//! Distributed toroidal life engine.
//!
//! A fixed binary grid evolves under the B3/S23 neighbor rule, with
//! rows statically partitioned across SPMD workers that exchange
//! boundary rows over a logical ring each step.

pub mod engine;
pub mod grid;
pub mod halo;
pub mod partition;
pub mod raster;
pub mod runtime;
pub mod stencil;
pub mod timing;
