pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::MessageRepository;

pub mod mock;
pub use mock::MockMessageRepository;
