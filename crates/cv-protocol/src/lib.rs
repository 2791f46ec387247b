pub mod chat;
pub mod contact;
pub mod theme;
pub mod webhook;

pub use chat::*;
pub use contact::*;
pub use theme::*;
pub use webhook::*;
