// Presentation layer: the HTML form and its HTTP routes.

pub mod page;
pub mod server;

pub use page::Outcome;
pub use server::{router, serve, AppState};
