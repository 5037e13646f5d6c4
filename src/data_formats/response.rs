use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::models::Article;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ArticleResponse {
    pub id: i64,
    pub title: String,
    pub style: String,
    pub content: String,
    pub date_published: String,
}

impl ArticleResponse {
    pub fn new(
        Article {
            id,
            title,
            style,
            content,
            date_published,
        }: Article,
    ) -> Self {
        ArticleResponse {
            id,
            title,
            style,
            content,
            date_published: date_published.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    pub fn location(&self) -> String {
        format!("/articles/{}", self.id)
    }
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        ArticleResponse::new(article)
    }
}
