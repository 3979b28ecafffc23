pub mod debundle_options;
pub mod module_override;
