use crate::constants;
use crate::dao::KeyValueStore;
use crate::model::article::Article;
use crate::types::outcome::{RejectReason, VoteOutcome};
use anyhow::Result;

/// 给文章投一票, 每个用户对每篇文章最多一票
///
/// time: 里查不到或发布超过一周的文章不接受投票. 去重靠 voted
/// 集合的原子 sadd: 只有本次真正插入了成员才改分数和票数, 同一
/// 用户并发投票也不会重复计票. 分数和票数这两次自增之间没有
/// 事务, 短暂不一致可以接受
pub async fn article_vote<S: KeyValueStore>(
    store: &S,
    user: &str,
    article: &str,
) -> Result<VoteOutcome> {
    let posted = match store.zscore(constants::TIME_KEY, article).await? {
        Some(t) => t,
        None => return Ok(VoteOutcome::Rejected(RejectReason::UnknownArticle)),
    };
    let cutoff = chrono::Utc::now().timestamp() - constants::ONE_WEEK_IN_SECONDS;
    if posted < cutoff as f64 {
        return Ok(VoteOutcome::Rejected(RejectReason::VotingClosed));
    }

    let voted = Article::voted_key_of(article);
    if !store.sadd(voted.as_str(), user).await? {
        return Ok(VoteOutcome::Rejected(RejectReason::AlreadyVoted));
    }

    store
        .zincrby(constants::SCORE_KEY, article, constants::VOTE_SCORE as f64)
        .await?;
    store.hincrby(article, "votes", 1).await?;
    Ok(VoteOutcome::Accepted)
}
