pub mod session;
pub mod store;

pub use session::{Session, SessionState};
pub use store::StateStore;
