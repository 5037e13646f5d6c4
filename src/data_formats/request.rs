use serde::{Deserialize, Serialize};

use crate::{errors::RequestError, models::NewArticle};

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct CreateArticleRequest {
    pub title: Option<String>,
    pub style: Option<String>,
    pub content: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default)]
#[serde(default)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub style: Option<String>,
    pub content: Option<String>,
}

impl CreateArticleRequest {
    /// Checks `title`, `content` and `style` in that order and reports the
    /// first one that is absent or null. Empty strings are accepted.
    pub fn validate(self) -> Result<NewArticle, RequestError> {
        let CreateArticleRequest {
            title,
            style,
            content,
        } = self;
        let title = title.ok_or(RequestError::MissingField("title"))?;
        let content = content.ok_or(RequestError::MissingField("content"))?;
        let style = style.ok_or(RequestError::MissingField("style"))?;
        Ok(NewArticle {
            title,
            style,
            content,
        })
    }
}

impl UpdateArticleRequest {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.style.is_none() && self.content.is_none()
    }
}
