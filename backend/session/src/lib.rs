pub mod fallback;
pub mod session;

pub use fallback::{classify, SimulatedResponder, TypingCadence};
pub use session::ConversationSession;
