//! Data models for calling backend entities

mod call;

pub use call::*;
