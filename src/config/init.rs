use crate::config::env;
use crate::dao::redis_db::RedisStore;

pub async fn init() -> anyhow::Result<RedisStore> {
    dotenv::dotenv().ok();
    let store = RedisStore::open(env::redis_url().as_str())?;
    store.ping().await?;
    Ok(store)
}
