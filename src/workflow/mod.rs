pub mod extract_ctx;
pub mod extract_flow;

pub use extract_ctx::ExtractCtx;
pub use extract_flow::{ExtractFlow, ExtractResult};
