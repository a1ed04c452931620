pub mod channel;
pub mod resolver;
