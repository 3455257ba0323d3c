//! HTTP clients for the analytics backend and ML service, plus local session
//! persistence.

pub mod backend;
pub mod chat;
pub mod config;
pub mod error;
pub mod ml;
pub(crate) mod retry;
pub mod session;
pub mod store;
pub(crate) mod transport;

pub use backend::BackendClient;
pub use chat::ChatReply;
pub use config::ClientConfig;
pub use error::{ClientError, StoreError};
pub use ml::MlClient;
pub use session::{restore_session, RestoredSession, SessionStore};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
