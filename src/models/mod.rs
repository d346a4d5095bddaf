// src/models/mod.rs

pub mod filter;
pub mod interaction;
pub mod item;
pub mod view;
