pub mod bootstrap_locator;
pub mod chunk_loader;
pub mod dependency_scanner;
pub mod module_container;
