#[macro_use]
mod tracy;

pub mod codegen;
pub mod type_store;
