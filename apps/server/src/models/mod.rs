//! Request payload models for the case API

pub mod case_input;

pub use case_input::{CasePatch, NewCase};
