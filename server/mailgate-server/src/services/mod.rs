pub mod enrollment;
pub mod send_pipeline;
pub mod sendbox;
pub mod stores;

pub use send_pipeline::{SendMailRequest, SendPipeline};
pub use stores::{AuditStore, BlocklistSettings, BlocklistSource, LedgerStore, MailDispatcher};
