//! Core types: user, chat, message and payload, handler response, and Handler trait.

mod chat;
mod handler;
mod message;
mod payload;
mod response;
mod user;

pub use chat::Chat;
pub use handler::{Handler, ToCoreMessage, ToCoreUser};
pub use message::Message;
pub use payload::MessagePayload;
pub use response::HandlerResponse;
pub use user::User;
