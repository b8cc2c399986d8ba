pub mod api;
pub mod chat_message;
