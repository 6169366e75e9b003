// Adapters layer: concrete implementations for external systems.
// Local file storage lives next to the CLI config in src/config/cli.rs.

pub mod gemini;

pub use gemini::{GeminiChatSession, GeminiClient};
