// 键前缀
pub const ARTICLE_COUNTER: &str = "article:";
pub const SCORE_KEY: &str = "score:";
pub const TIME_KEY: &str = "time:";
pub const VOTED_PREFIX: &str = "voted:";
pub const GROUP_PREFIX: &str = "group:";

pub const ONE_WEEK_IN_SECONDS: i64 = 7 * 86400;

// 一票等于 432 秒的新鲜度 (86400 / 200)
pub const VOTE_SCORE: i64 = 432;

pub const ARTICLES_PER_PAGE: usize = 25;

// 群组排序结果的缓存时间
pub const GROUP_CACHE_EXPIRE: usize = 60;

// voted 集合的过期时间与投票窗口共用一个常量, 防止两者漂移
pub const VOTED_SET_EXPIRE: usize = ONE_WEEK_IN_SECONDS as usize;

pub const REDIS_POOL_SIZE: u64 = 10;
