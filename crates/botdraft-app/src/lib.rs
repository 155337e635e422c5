// Draft session layer: configuration, the paced draft loop, and the message
// types a front end talks to it with.

pub mod app;
pub mod config;
pub mod protocol;
