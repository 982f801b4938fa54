//! The individual pipeline stage components.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory;
pub mod writeback;

pub use decode::Decode;
pub use execute::Execute;
pub use fetch::Fetch;
pub use memory::Memory;
pub use writeback::Writeback;
