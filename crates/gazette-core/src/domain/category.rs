use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category entity - groups articles. Deleting a category removes its
/// articles (cascade at the store level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub title: String,
}

impl Category {
    /// Create a new category with a generated ID.
    pub fn new(title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
        }
    }
}
