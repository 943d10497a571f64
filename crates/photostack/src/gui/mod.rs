pub mod app;
pub mod stack;
pub mod theme;
