pub mod chunk_id;
pub mod dependency;
pub mod module_id;
pub mod module_tree;
pub mod output;
pub mod raw_idx;
