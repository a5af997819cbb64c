pub mod command_handlers;
pub mod session;

pub use session::run_session;
