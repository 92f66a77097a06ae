use crate::constants;
use crate::dao::KeyValueStore;
use crate::model::article::Article;
use anyhow::Result;

/// 发布一篇文章, 返回新分配的文章 id
///
/// 作者自动算一票: votes 从 1 开始, score: 里的初始分数是
/// 发布时间加上一票的权重. 同一作者重复发布会得到两篇独立的文章
pub async fn post_article<S: KeyValueStore>(
    store: &S,
    user: &str,
    title: &str,
    link: &str,
) -> Result<i64> {
    let article_id = store.incr(constants::ARTICLE_COUNTER).await?;

    // 先把作者记进已投票名单, 过期时间与投票窗口一致
    let voted = Article::voted_key(article_id);
    store.sadd(voted.as_str(), user).await?;
    store
        .expire(voted.as_str(), constants::VOTED_SET_EXPIRE)
        .await?;

    let now = chrono::Utc::now().timestamp();
    let article = Article {
        id: Article::key(article_id),
        title: title.to_string(),
        link: link.to_string(),
        user: user.to_string(),
        posted: now,
        votes: 1,
    };
    store
        .hset_multiple(article.id.as_str(), article.to_fields().as_slice())
        .await?;

    store
        .zadd(
            constants::SCORE_KEY,
            article.id.as_str(),
            (now + constants::VOTE_SCORE) as f64,
        )
        .await?;
    store
        .zadd(constants::TIME_KEY, article.id.as_str(), now as f64)
        .await?;

    Ok(article_id)
}
