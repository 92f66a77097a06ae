use crate::constants;
use crate::dao::kv::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use mobc_redis::{
    mobc::Pool,
    redis,
    redis::{aio::Connection, AsyncCommands, Client},
    RedisConnectionManager,
};
use std::collections::BTreeMap;

pub struct RedisStore {
    pool: Pool<RedisConnectionManager>,
}

impl RedisStore {
    pub fn open(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let manager = RedisConnectionManager::new(client);
        let pool = Pool::builder()
            .max_open(constants::REDIS_POOL_SIZE)
            .build(manager);
        Ok(Self { pool })
    }

    async fn conn(&self) -> Result<mobc_redis::mobc::Connection<RedisConnectionManager>> {
        Ok(self.pool.get().await?)
    }

    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.conn().await?;
        let res: String = redis::cmd("PING")
            .query_async(&mut conn as &mut Connection)
            .await?;
        println!("redis : {}", res);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.incr(key, 1).await?)
    }

    async fn sadd(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        let added: i64 = conn.sadd(key, member).await?;
        Ok(added == 1)
    }

    async fn sismember(&self, key: &str, member: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.sismember(key, member).await?)
    }

    async fn expire(&self, key: &str, seconds: usize) -> Result<()> {
        if seconds == 0 {
            return Ok(());
        }
        let mut conn = self.conn().await?;
        Ok(conn.expire(key, seconds).await?)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.conn().await?;
        Ok(conn.exists(key).await?)
    }

    async fn zadd(&self, key: &str, member: &str, score: f64) -> Result<()> {
        let mut conn = self.conn().await?;
        Ok(conn.zadd(key, member, score).await?)
    }

    async fn zincrby(&self, key: &str, member: &str, delta: f64) -> Result<f64> {
        let mut conn = self.conn().await?;
        Ok(conn.zincr(key, member, delta).await?)
    }

    async fn zscore(&self, key: &str, member: &str) -> Result<Option<f64>> {
        let mut conn = self.conn().await?;
        Ok(conn.zscore(key, member).await?)
    }

    async fn zrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrange(key, l, r).await?)
    }

    async fn zrevrange(&self, key: &str, l: isize, r: isize) -> Result<Vec<String>> {
        let mut conn = self.conn().await?;
        Ok(conn.zrevrange(key, l, r).await?)
    }

    async fn zinterstore_max(&self, dest: &str, keys: &[&str]) -> Result<()> {
        let mut conn = self.conn().await?;
        let mut cmd = redis::cmd("ZINTERSTORE");
        cmd.arg(dest).arg(keys.len());
        for key in keys {
            cmd.arg(*key);
        }
        cmd.arg("AGGREGATE").arg("MAX");
        cmd.query_async::<_, ()>(&mut conn as &mut Connection).await?;
        Ok(())
    }

    async fn hset_multiple(&self, key: &str, items: &[(String, String)]) -> Result<()> {
        let mut conn = self.conn().await?;
        let _: () = conn.hset_multiple(key, items).await?;
        Ok(())
    }

    async fn hgetall(&self, key: &str) -> Result<BTreeMap<String, String>> {
        let mut conn = self.conn().await?;
        Ok(conn.hgetall(key).await?)
    }

    async fn hincrby(&self, key: &str, field: &str, delta: i64) -> Result<i64> {
        let mut conn = self.conn().await?;
        Ok(conn.hincr(key, field, delta).await?)
    }
}
