#![forbid(unsafe_code)]

pub mod decision;
pub mod risk;
