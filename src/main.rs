use rust_vote::dao::KeyValueStore;
use rust_vote::model::article::Article;
use rust_vote::service::{groups, publisher, ranking, voting};
use rust_vote::{config, constants};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = config::init::init().await?;

    let article_id =
        publisher::post_article(&store, "username", "A title", "http://www.google.com").await?;
    println!("We posted a new article with id: {}", article_id);
    let key = Article::key(article_id);
    println!("Its HASH looks like:");
    for (field, value) in store.hgetall(key.as_str()).await? {
        println!("  {}: {}", field, value);
    }
    println!();

    let outcome = voting::article_vote(&store, "other_user", key.as_str()).await?;
    let article = Article::from_fields(key.as_str(), store.hgetall(key.as_str()).await?);
    println!(
        "We voted for the article ({:?}), it now has votes: {}",
        outcome, article.votes
    );

    println!("The currently highest-scoring articles are:");
    let articles = ranking::get_articles(&store, 1, constants::SCORE_KEY).await?;
    print_articles(&articles);

    groups::add_groups(&store, article_id, &["new-group"]).await?;
    println!("We added the article to a new group, other articles include:");
    let articles = groups::get_group_articles(&store, "new-group", 1, constants::SCORE_KEY).await?;
    print_articles(&articles);

    Ok(())
}

fn print_articles(articles: &[Article]) {
    for article in articles {
        match serde_json::to_string_pretty(article) {
            Ok(s) => println!("{}", s),
            Err(e) => println!("  {:?} ({})", article, e),
        }
    }
}
