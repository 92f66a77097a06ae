use crate::constants;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Article {
    pub id: String, // 组合键, 形如 "article:7"
    pub title: String,
    pub link: String,
    pub user: String, // 作者
    pub posted: i64,  // 发布时间, Unix 秒
    pub votes: i64,
}

impl Article {
    pub fn key(id: i64) -> String {
        format!("{}{}", constants::ARTICLE_COUNTER, id)
    }

    pub fn voted_key(id: i64) -> String {
        format!("{}{}", constants::VOTED_PREFIX, id)
    }

    /// "article:7" 对应的 voted 集合键 "voted:7"
    pub fn voted_key_of(article_key: &str) -> String {
        let id = article_key
            .split_once(':')
            .map(|(_, id)| id)
            .unwrap_or(article_key);
        format!("{}{}", constants::VOTED_PREFIX, id)
    }

    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            ("title".to_string(), self.title.clone()),
            ("link".to_string(), self.link.clone()),
            ("user".to_string(), self.user.clone()),
            ("posted".to_string(), self.posted.to_string()),
            ("votes".to_string(), self.votes.to_string()),
        ]
    }

    pub fn from_fields(key: &str, mut fields: BTreeMap<String, String>) -> Self {
        let mut take = |name: &str| fields.remove(name).unwrap_or_default();
        Self {
            id: key.to_string(),
            title: take("title"),
            link: take("link"),
            user: take("user"),
            posted: take("posted").parse().unwrap_or_default(),
            votes: take("votes").parse().unwrap_or_default(),
        }
    }
}
