pub mod db;
pub mod game;
pub mod settings;
