pub mod invoker;
pub mod pipeline;
