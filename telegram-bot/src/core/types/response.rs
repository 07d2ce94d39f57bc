//! Handler chain result type.

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body (e.g. an error message was already sent).
    Stop,
    /// Not for this handler, try next.
    Ignore,
    /// Stop the chain and attach the reply text that was sent.
    Reply(String),
}

impl HandlerResponse {
    /// Variant name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            HandlerResponse::Continue => "Continue",
            HandlerResponse::Stop => "Stop",
            HandlerResponse::Ignore => "Ignore",
            HandlerResponse::Reply(_) => "Reply",
        }
    }
}
