pub mod category;
pub mod post;
pub mod user;

pub use category::Category;
pub use post::{Post, PostDraft};
pub use user::User;
