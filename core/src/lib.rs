pub mod network;
pub mod scanner;
