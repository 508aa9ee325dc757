pub mod configuration;
pub mod controller;
pub mod data_capture;
pub mod encoding;
pub mod error_handling;
pub mod location;
pub mod network;
pub mod pipeline;
pub mod storage;
pub mod web_interface;
