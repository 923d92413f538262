// Parley - multi-persona chat orchestrator
// Library exports

pub mod backend;
pub mod config;
pub mod conversation;
pub mod orchestrator;
pub mod personas;
pub mod server;
