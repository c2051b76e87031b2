pub mod completion;
pub mod inventory;
pub mod menu_codec;
pub mod menu_editor;
pub mod menu_generation;
pub mod menu_render;
pub mod metrics;
