pub mod responses;
pub mod session;
pub mod user;

pub use responses::*;
pub use session::{Session, StorageKey};
pub use user::UserProfile;
