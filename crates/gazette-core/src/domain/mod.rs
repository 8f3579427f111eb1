//! Domain entities.

mod article;
mod category;
mod order;
mod user;

pub use article::{Article, DEFAULT_PHOTO_URL};
pub use category::Category;
pub use order::{ArticleOrder, SortKey};
pub use user::User;
