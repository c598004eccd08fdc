pub mod chat;
pub mod responder;

pub use chat::{ChatMessage, ChatSession, Role};
pub use responder::{ResponseProvider, SimulatedResponder};
