#![allow(dead_code)]

use std::net::TcpListener;

use blogful::{init_db, make_router, run_app, AppState, ArticleResponse, Environment};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn insert_articles(&self, articles: &[ArticleResponse]) {
        for article in articles {
            sqlx::query(
                "INSERT INTO articles (id, title, style, content, date_published) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(article.id)
            .bind(&article.title)
            .bind(&article.style)
            .bind(&article.content)
            .bind(&article.date_published)
            .execute(&self.pool)
            .await
            .expect("Failed to insert fixture article");
        }
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_in(Environment::Development).await
}

pub async fn spawn_app_in(environment: Environment) -> TestApp {
    let pool = init_db("sqlite::memory:")
        .await
        .expect("Failed to set up test database");
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());
    let router = make_router(AppState::new(pool.clone(), environment));
    tokio::spawn(run_app(router, listener));

    TestApp {
        address,
        pool,
        client: reqwest::Client::new(),
    }
}

pub fn make_articles_array() -> Vec<ArticleResponse> {
    vec![
        ArticleResponse {
            id: 1,
            title: "First test post!".to_string(),
            style: "How-to".to_string(),
            content: "Lorem ipsum dolor sit amet, consectetur adipisicing elit.".to_string(),
            date_published: "2029-01-22T16:28:32.615Z".to_string(),
        },
        ArticleResponse {
            id: 2,
            title: "Second test post!".to_string(),
            style: "News".to_string(),
            content: "Cum, exercitationem cupiditate dignissimos est perspiciatis.".to_string(),
            date_published: "2100-05-22T16:28:32.615Z".to_string(),
        },
        ArticleResponse {
            id: 3,
            title: "Third test post!".to_string(),
            style: "Listicle".to_string(),
            content: "Possimus, voluptate? Necessitatibus est perspiciatis.".to_string(),
            date_published: "1919-12-22T16:28:32.615Z".to_string(),
        },
        ArticleResponse {
            id: 4,
            title: "Fourth test post!".to_string(),
            style: "Story".to_string(),
            content: "Natus consequuntur deserunt commodi, nobis qui inventore.".to_string(),
            date_published: "1919-12-22T16:28:32.615Z".to_string(),
        },
    ]
}
