//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings exposing the generator handle to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: only the consumer-facing draws and state I/O
//! 2. **Simple types**: names as strings, state as text
//! 3. **Safe errors**: every `RngError` becomes a Python exception

pub mod rng;
