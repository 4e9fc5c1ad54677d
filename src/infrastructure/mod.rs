//! Gateway adapters: the HTTP backend client and an in-process test double.

pub mod http;
pub mod in_memory;
