pub mod bootstrap;
pub mod chunk;
pub mod module;
