use crate::constants;
use crate::dao::KeyValueStore;
use crate::model::article::Article;
use anyhow::Result;

/// 按分数从高到低取一页文章, 页码从 1 开始
pub async fn get_articles<S: KeyValueStore>(
    store: &S,
    page: usize,
    order: &str,
) -> Result<Vec<Article>> {
    get_articles_paged(store, page, order, constants::ARTICLES_PER_PAGE).await
}

pub async fn get_articles_paged<S: KeyValueStore>(
    store: &S,
    page: usize,
    order: &str,
    per_page: usize,
) -> Result<Vec<Article>> {
    let start = page.saturating_sub(1) * per_page;
    let end = start + per_page - 1;
    // 超出范围时 zrevrange 返回空, 不算错误
    let keys = store
        .zrevrange(order, start as isize, end as isize)
        .await?;

    let mut articles = Vec::with_capacity(keys.len());
    for key in keys {
        let fields = store.hgetall(key.as_str()).await?;
        articles.push(Article::from_fields(key.as_str(), fields));
    }
    Ok(articles)
}
