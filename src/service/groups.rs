use crate::constants;
use crate::dao::KeyValueStore;
use crate::model::article::Article;
use crate::service::ranking;
use anyhow::Result;

pub fn group_key(group: &str) -> String {
    format!("{}{}", constants::GROUP_PREFIX, group)
}

/// 把文章加入若干群组, 集合语义, 重复添加无副作用
pub async fn add_groups<S: KeyValueStore>(
    store: &S,
    article_id: i64,
    groups: &[&str],
) -> Result<()> {
    let article = Article::key(article_id);
    for group in groups {
        store
            .sadd(group_key(group).as_str(), article.as_str())
            .await?;
    }
    Ok(())
}

pub async fn get_group_articles<S: KeyValueStore>(
    store: &S,
    group: &str,
    page: usize,
    order: &str,
) -> Result<Vec<Article>> {
    get_group_articles_paged(store, group, page, order, constants::ARTICLES_PER_PAGE).await
}

/// 按指定顺序取群组里的一页文章
///
/// 每个 (顺序, 群组) 对应一个派生键, 比如 "score:tech". 派生键
/// 不存在时才重算: 群组集合与全局排序求交集, 同一文章取两边
/// 分数的最大值, 结果缓存 60 秒. 两个并发的未命中会各算一遍并
/// 互相覆盖, 算出来的内容相同, 不加锁
pub async fn get_group_articles_paged<S: KeyValueStore>(
    store: &S,
    group: &str,
    page: usize,
    order: &str,
    per_page: usize,
) -> Result<Vec<Article>> {
    let key = format!("{}{}", order, group);
    if !store.exists(key.as_str()).await? {
        let members = group_key(group);
        store
            .zinterstore_max(key.as_str(), &[members.as_str(), order])
            .await?;
        store
            .expire(key.as_str(), constants::GROUP_CACHE_EXPIRE)
            .await?;
    }
    ranking::get_articles_paged(store, page, key.as_str(), per_page).await
}
