use sqlx::{Sqlite, SqlitePool};

use crate::data_formats::UpdateArticleRequest;
use crate::errors::RequestError;
use crate::models::{Article, NewArticle};

use super::QueryBuilder;

pub async fn list_articles_in_db(pool: &SqlitePool) -> Result<Vec<Article>, RequestError> {
    let articles = sqlx::query_as::<Sqlite, Article>(
        r#"
        SELECT id, title, style, content, date_published FROM articles
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(articles)
}

pub async fn get_article_by_id_in_db(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<Article>, RequestError> {
    let article = sqlx::query_as::<Sqlite, Article>(
        r#"
        SELECT id, title, style, content, date_published FROM articles
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(article)
}

pub async fn create_article_in_db(
    pool: &SqlitePool,
    NewArticle {
        title,
        style,
        content,
    }: NewArticle,
) -> Result<Article, RequestError> {
    let article = sqlx::query_as::<Sqlite, Article>(
        r#"
        INSERT INTO articles (title, style, content)
        VALUES ($1, $2, $3)
        RETURNING id, title, style, content, date_published
        "#,
    )
    .bind(title)
    .bind(style)
    .bind(content)
    .fetch_one(pool)
    .await?;
    Ok(article)
}

/// Writes only the supplied fields. A request with no recognised field
/// leaves the row untouched and never reaches the database.
pub async fn update_article_in_db(
    pool: &SqlitePool,
    id: i64,
    request: UpdateArticleRequest,
) -> Result<(), RequestError> {
    if request.is_empty() {
        return Ok(());
    }

    let UpdateArticleRequest {
        title,
        style,
        content,
    } = request;
    let (query, params) = QueryBuilder::new(String::from("UPDATE articles SET "), Some(", "))
        .add_param("title", title)
        .add_param("style", style)
        .add_param("content", content)
        .build();

    let query = format!("{query} WHERE id = ?");
    let mut update = sqlx::query(&query);
    for param in params {
        update = update.bind(param);
    }
    update.bind(id).execute(pool).await?;
    Ok(())
}

pub async fn delete_article_in_db(pool: &SqlitePool, id: i64) -> Result<(), RequestError> {
    sqlx::query(
        r#"
        DELETE FROM articles WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;
    Ok(())
}
