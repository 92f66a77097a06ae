use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// 排序引擎依赖的存储原语, 核心逻辑只通过这个接口访问存储
///
/// sorted set 的语义与 redis 一致: 按分数升序, 同分按成员字典序,
/// 区间查询的下标是闭区间, 负数下标从末尾倒数
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn incr(&self, key: &str) -> Result<i64>;

    /// 返回 true 表示成员是新插入的 (投票去重依赖这一步的原子性)
    async fn sadd(&self, key: &str, member: &str) -> Result<bool>;
    async fn sismember(&self, key: &str, member: &str) -> Result<bool>;

    async fn expire(&self, key: &str, seconds: usize) -> Result<()>;
    async fn exists(&self, key: &str) -> Result<bool>;

    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()>;
    async fn zincrby(&self, key: &str, member: &str, delta: f64) -> Result<f64>;
    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>>;
    async fn zrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>>;
    async fn zrevrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>>;

    /// 对输入键求交集并以 MAX 聚合写入 dest, 普通集合的成员分数按 1 计
    async fn zinterstore_max(&self, dest: &str, keys: &[&str]) -> Result<()>;

    async fn hset_multiple(&self, key: &str, items: &[(String, String)]) -> Result<()>;
    async fn hgetall(&self, key: &str) -> Result<BTreeMap<String, String>>;
    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64>;
}
