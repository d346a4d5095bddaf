// src/handlers/mod.rs

pub mod catalog;
pub mod interaction;
pub mod views;
