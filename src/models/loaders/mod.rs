pub mod anchor_loader;

pub use anchor_loader::load_anchor_file;
