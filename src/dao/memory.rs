use crate::dao::kv::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// 内存版的 KeyValueStore, 测试和本地运行用, 不需要 redis
///
/// 过期是惰性的: 访问某个键时才检查它的 deadline
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    counters: HashMap<String, i64>,
    sets: HashMap<String, HashSet<String>>,
    zsets: HashMap<String, HashMap<String, f64>>,
    hashes: HashMap<String, BTreeMap<String, String>>,
    deadlines: HashMap<String, Instant>,
}

impl Inner {
    fn purge(&mut self, key: &str) {
        if let Some(deadline) = self.deadlines.get(key) {
            if Instant::now() >= *deadline {
                self.drop_key(key);
            }
        }
    }

    fn drop_key(&mut self, key: &str) {
        self.counters.remove(key);
        self.sets.remove(key);
        self.zsets.remove(key);
        self.hashes.remove(key);
        self.deadlines.remove(key);
    }

    // 同分时按成员字典序, 与 redis 的 zset 排序一致
    fn sorted_members(&self, key: &str) -> Vec<String> {
        let mut items: Vec<(String, f64)> = match self.zsets.get(key) {
            Some(zset) => zset.iter().map(|(m, s)| (m.clone(), *s)).collect(),
            None => return vec![],
        };
        items.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        items.into_iter().map(|(m, _)| m).collect()
    }

    fn member_score(&self, key: &str, member: &str) -> Option<f64> {
        if let Some(zset) = self.zsets.get(key) {
            return zset.get(member).copied();
        }
        // 普通集合参与 zinterstore 时成员分数按 1 计
        match self.sets.get(key) {
            Some(set) if set.contains(member) => Some(1.0),
            _ => None,
        }
    }

    fn members_of(&self, key: &str) -> Option<Vec<String>> {
        if let Some(zset) = self.zsets.get(key) {
            return Some(zset.keys().cloned().collect());
        }
        self.sets.get(key).map(|s| s.iter().cloned().collect())
    }
}

// redis 的区间下标: 闭区间, 负数从末尾倒数, 越界截断
fn rank_range(l: isize, r: isize, len: usize) -> Option<(usize, usize)> {
    let len = len as isize;
    let mut l = if l < 0 { len + l } else { l };
    let mut r = if r < 0 { len + r } else { r };
    if l < 0 {
        l = 0;
    }
    if r >= len {
        r = len - 1;
    }
    if l > r || l >= len {
        return None;
    }
    Some((l as usize, r as usize))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 立刻让某个键过期, 测试里用来模拟 TTL 走完
    pub fn expire_now(&self, key: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.drop_key(key);
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let counter = inner.counters.entry(key.to_string()).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let set = inner.sets.entry(key.to_string()).or_default();
        Ok(set.insert(member.to_string()))
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        Ok(inner
            .sets
            .get(key)
            .map(|s| s.contains(member))
            .unwrap_or(false))
    }

    async fn expire(&self, key: &str, seconds: usize) -> Result<()> {
        if seconds == 0 {
            return Ok(());
        }
        let mut inner = self.inner.lock().unwrap();
        inner.deadlines.insert(
            key.to_string(),
            Instant::now() + Duration::from_secs(seconds as u64),
        );
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        Ok(inner.counters.contains_key(key)
            || inner.sets.contains_key(key)
            || inner.zsets.contains_key(key)
            || inner.hashes.contains_key(key))
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let zset = inner.zsets.entry(key.to_string()).or_default();
        zset.insert(member.to_string(), score);
        Ok(())
    }

    async fn zincrby(&self, key: &str, member: &str, delta: f64) -> Result<f64> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let zset = inner.zsets.entry(key.to_string()).or_default();
        let score = zset.entry(member.to_string()).or_insert(0.0);
        *score += delta;
        Ok(*score)
    }

    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        Ok(inner.zsets.get(key).and_then(|z| z.get(member).copied()))
    }

    async fn zrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let members = inner.sorted_members(key);
        Ok(match rank_range(l, r, members.len()) {
            Some((l, r)) => members[l..=r].to_vec(),
            None => vec![],
        })
    }

    async fn zrevrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let mut members = inner.sorted_members(key);
        members.reverse();
        Ok(match rank_range(l, r, members.len()) {
            Some((l, r)) => members[l..=r].to_vec(),
            None => vec![],
        })
    }

    async fn zinterstore_max(&self, dest: &str, keys: &[&str]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        for key in keys {
            inner.purge(key);
        }
        let mut result: HashMap<String, f64> = HashMap::new();
        if let Some((first, rest)) = keys.split_first() {
            for member in inner.members_of(first).unwrap_or_default() {
                let mut max = match inner.member_score(first, &member) {
                    Some(s) => s,
                    None => continue,
                };
                let mut in_all = true;
                for key in rest {
                    match inner.member_score(key, &member) {
                        Some(s) if s > max => max = s,
                        Some(_) => {}
                        None => {
                            in_all = false;
                            break;
                        }
                    }
                }
                if in_all {
                    result.insert(member, max);
                }
            }
        }
        inner.drop_key(dest);
        inner.zsets.insert(dest.to_string(), result);
        Ok(())
    }

    async fn hset_multiple(&self, key: &str, items: &[(String, String)]) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (field, value) in items {
            hash.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut inner = self.inner.lock().unwrap();
        inner.purge(key);
        let hash = inner.hashes.entry(key.to_string()).or_default();
        let value = hash
            .get(field)
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(0)
            + delta;
        hash.insert(field.to_string(), value.to_string());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sadd_reports_newness() {
        let store = MemoryStore::new();
        assert!(store.sadd("voted:1", "alice").await.unwrap());
        assert!(!store.sadd("voted:1", "alice").await.unwrap());
        assert!(store.sadd("voted:1", "bob").await.unwrap());
    }

    #[tokio::test]
    async fn zrevrange_orders_by_score_then_member() {
        let store = MemoryStore::new();
        store.zadd("z", "a", 2.0).await.unwrap();
        store.zadd("z", "b", 3.0).await.unwrap();
        store.zadd("z", "c", 2.0).await.unwrap();
        let all = store.zrevrange("z", 0, -1).await.unwrap();
        assert_eq!(all, vec!["b", "c", "a"]);
        let page = store.zrevrange("z", 1, 2).await.unwrap();
        assert_eq!(page, vec!["c", "a"]);
        assert!(store.zrevrange("z", 5, 9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn zinterstore_max_over_set_and_zset() {
        let store = MemoryStore::new();
        store.sadd("group:tech", "article:1").await.unwrap();
        store.sadd("group:tech", "article:2").await.unwrap();
        store.zadd("score:", "article:1", 100.0).await.unwrap();
        store.zadd("score:", "article:3", 300.0).await.unwrap();
        store
            .zinterstore_max("score:tech", &["group:tech", "score:"])
            .await
            .unwrap();
        let members = store.zrevrange("score:tech", 0, -1).await.unwrap();
        assert_eq!(members, vec!["article:1"]);
        assert_eq!(store.zscore("score:tech", "article:1").await.unwrap(), Some(100.0));
    }

    #[tokio::test]
    async fn expire_now_drops_key() {
        let store = MemoryStore::new();
        store.sadd("voted:1", "alice").await.unwrap();
        store.expire("voted:1", 60).await.unwrap();
        assert!(store.exists("voted:1").await.unwrap());
        store.expire_now("voted:1");
        assert!(!store.exists("voted:1").await.unwrap());
        // 过期后再加算新插入
        assert!(store.sadd("voted:1", "alice").await.unwrap());
    }

    #[tokio::test]
    async fn hincrby_counts_from_string_fields() {
        let store = MemoryStore::new();
        store
            .hset_multiple("article:1", &[("votes".to_string(), "1".to_string())])
            .await
            .unwrap();
        assert_eq!(store.hincrby("article:1", "votes", 1).await.unwrap(), 2);
        let all = store.hgetall("article:1").await.unwrap();
        assert_eq!(all.get("votes").map(String::as_str), Some("2"));
    }
}
