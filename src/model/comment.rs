use serde::Serialize;

use crate::shaping::pagination::Page;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: u64,
    pub author_id: u64,
    pub text: String,
    pub created_at: String,
    pub updated_at: String,
}

pub type CommentsPage = Page<Comment>;
