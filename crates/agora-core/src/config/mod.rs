//! Configuration loading for the Agora integration

mod loader;

pub use loader::AgoraConfig;
