pub mod input;
pub mod layout;
pub mod save;
pub mod sprite;
pub mod time;
