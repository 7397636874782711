pub mod record_ctx;
pub mod submit_flow;

pub use record_ctx::RecordCtx;
pub use submit_flow::SubmitFlow;
