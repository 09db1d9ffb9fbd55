//! Feedback controllers

pub mod bang_bang;
pub mod pid;

pub use bang_bang::BangBang;
pub use pid::Pid;
