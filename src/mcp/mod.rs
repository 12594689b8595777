// src/mcp/mod.rs
pub mod envelope;
pub mod handler;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod stdio;
pub mod tools;
