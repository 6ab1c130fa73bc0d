//! Command handlers for the termimage binary

pub mod show;
