pub mod client;
pub mod mock;
pub mod sse;

pub use client::OpenAiCompatClient;
pub use mock::MockBackend;
pub use sse::consume_sse_stream;
