// src/solafon/mod.rs

pub mod client;
pub use client::SolafonClient;

pub mod models;
pub mod services;
