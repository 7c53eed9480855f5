//! Shared foundational types for the hwsim circuit simulator.
//!
//! Every signal, latch, function and parameter name is interned once into an
//! [`Interner`] and passed around as a cheap [`Ident`].

#![warn(missing_docs)]

pub mod ident;

pub use ident::{Ident, Interner, PRIME};
