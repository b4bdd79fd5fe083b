pub mod config;
pub mod controller;
pub mod events;
pub mod gesture;
pub mod input;
pub mod script;
pub mod stage;
pub mod ticker;
pub mod tasks {
    pub mod runtime;
}
