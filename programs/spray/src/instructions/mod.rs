#![allow(ambiguous_glob_reexports)]

pub mod distribute_native;
pub mod distribute_token;
pub mod initialize_protocol;
pub mod pause_protocol;
pub mod quote;
pub mod transfer_control;
pub mod update_protocol_config;

pub use distribute_native::*;
pub use distribute_token::*;
pub use initialize_protocol::*;
pub use pause_protocol::*;
pub use quote::*;
pub use transfer_control::*;
pub use update_protocol_config::*;
