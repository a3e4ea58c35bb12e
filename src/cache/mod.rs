pub mod entry;
pub mod refresher;
pub mod registry;
