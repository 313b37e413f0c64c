#![allow(dead_code)]

pub mod monitor;
pub mod server;
