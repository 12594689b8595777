// src/solafon/services/mod.rs
//
// One async function per tool. Arguments arrive already parsed and
// validated by the tool registry.

pub mod bot;
pub mod developer;
pub mod wallet;
