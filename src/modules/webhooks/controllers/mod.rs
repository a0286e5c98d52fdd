pub mod receiver_controller;
pub mod webhook_controller;

pub use receiver_controller::configure as configure_receiver;
pub use webhook_controller::configure;
