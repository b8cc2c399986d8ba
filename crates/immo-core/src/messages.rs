//! Fixed strings shared by the proxy and the chat client.

/// Route served by the proxy and called by the chat client.
pub const CHAT_PATH: &str = "/api/chat";

/// Liveness route.
pub const HEALTH_PATH: &str = "/health";

/// Id of the greeting every session starts with.
pub const WELCOME_ID: &str = "welcome";

pub const WELCOME: &str = "Bonjour! Je suis votre assistant immobilier J'achète en Algérie. Comment puis-je vous aider aujourd'hui?";

/// Assistant turn appended when the proxy call fails for any reason.
pub const APOLOGY: &str = "Désolé, une erreur s'est produite. Réessayez plus tard.";

/// Shown while a reply is pending.
pub const TYPING_INDICATOR: &str = "Assistant en train d'écrire…";

pub const INPUT_PLACEHOLDER: &str = "Posez votre question...";

/// Public error body for a blank message (HTTP 400).
pub const EMPTY_MESSAGE_ERROR: &str = "Empty message";

/// Public error body for any upstream or internal failure (HTTP 500).
pub const CONTACT_FAILURE_ERROR: &str = "Failed to contact assistant.";
