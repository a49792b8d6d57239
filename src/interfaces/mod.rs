pub mod http;
pub mod shell;
