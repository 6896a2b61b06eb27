//! pico-maps CLI library — command implementations shared by the `pico`
//! binary and its integration tests.

pub mod commands;
