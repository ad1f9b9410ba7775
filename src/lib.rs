//! PlantAI CLI
//!
//! 植物写真を推論サーバーに送り、病害診断または植物同定の結果を表示する

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod predict;
pub mod report;
pub mod transport;
