use chrono::{DateTime, Utc};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub style: String,
    pub content: String,
    pub date_published: DateTime<Utc>,
}

/// An article that passed create validation but has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub style: String,
    pub content: String,
}
