use crate::models::Article;

use super::codec::{parse_dataset, DataError};

/// Condition article dataset compiled into the binary.
const ARTICLE_JSON: &str = include_str!("../../assets/article.json");

/// Load every condition article in bundled order.
pub fn load_articles() -> Result<Vec<Article>, DataError> {
    parse_dataset("article", ARTICLE_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_articles_parse_with_full_field_set() {
        let articles = load_articles().expect("bundled article.json must parse");
        assert!(!articles.is_empty());
        let asthma = articles
            .iter()
            .find(|article| article.name == "Asthma")
            .expect("asthma article present");
        assert!(!asthma.definition.is_empty());
        assert!(asthma.symptoms.iter().any(|s| s.contains("Wheezing")));
        assert!(!asthma.prevention_strategy.is_empty());
    }
}
