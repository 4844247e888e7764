//! API通信

pub mod gateway;
