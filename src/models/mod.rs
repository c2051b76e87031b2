pub mod ingredient;
pub mod menu;
