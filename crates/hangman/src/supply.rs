//! Word supply: where round words come from.
//!
//! The service asks a [`WordSupply`] for one word per round and, when a
//! difficulty+category bucket runs low on fresh words, asks it to
//! replenish in the background. [`InMemoryWordSupply`] is the built-in
//! implementation; a host with a database implements the trait itself.

use std::future::Future;

use hangman_protocol::{Category, Difficulty, Word};
use rand::seq::IndexedRandom;
use tokio::sync::Mutex;

use crate::words;

/// Errors from a [`WordSupply`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SupplyError {
    /// Nothing matched the request. The service never substitutes a word;
    /// the host may retry later.
    #[error("no {difficulty} word available in {category}")]
    NoWordAvailable {
        difficulty: Difficulty,
        category: Category,
    },

    /// The backing store could not be reached.
    #[error("word supply unavailable: {0}")]
    Unavailable(String),
}

/// Source of round words.
///
/// `Send + Sync + 'static` because the service shares one supply across
/// every round and calls [`replenish`](Self::replenish) from a spawned task.
pub trait WordSupply: Send + Sync + 'static {
    /// One word matching the difficulty and category, skipping any whose
    /// text appears in `exclude`.
    ///
    /// # Errors
    /// [`SupplyError::NoWordAvailable`] when nothing matches.
    fn request(
        &self,
        difficulty: Difficulty,
        category: Category,
        exclude: &[String],
    ) -> impl Future<Output = Result<Word, SupplyError>> + Send;

    /// How many fresh words the bucket still holds.
    fn available(
        &self,
        difficulty: Difficulty,
        category: Category,
    ) -> impl Future<Output = Result<usize, SupplyError>> + Send;

    /// Tops the bucket back up. Returns how many words became fresh.
    fn replenish(
        &self,
        difficulty: Difficulty,
        category: Category,
    ) -> impl Future<Output = Result<usize, SupplyError>> + Send;
}

// ---------------------------------------------------------------------------
// InMemoryWordSupply
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct PoolEntry {
    word: Word,
    /// Not served since it was added or last recycled.
    fresh: bool,
    served: u32,
}

impl PoolEntry {
    fn in_bucket(&self, difficulty: Difficulty, category: Category) -> bool {
        self.word.difficulty() == difficulty && self.word.category() == category
    }
}

/// A word pool held in memory.
///
/// Requests prefer fresh words, then the least-served ones, breaking ties
/// at random. Replenishing recycles every served word in the bucket back
/// to fresh.
#[derive(Debug, Default)]
pub struct InMemoryWordSupply {
    pool: Mutex<Vec<PoolEntry>>,
}

impl InMemoryWordSupply {
    /// An empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// A pool holding the built-in word list: six words for every playable
    /// category at every difficulty.
    pub fn seeded() -> Self {
        let words = words::seed_words().filter_map(|(category, difficulty, text)| {
            Word::new(text, category, difficulty).ok()
        });
        Self::from_words(words)
    }

    pub fn from_words(words: impl IntoIterator<Item = Word>) -> Self {
        let pool = words
            .into_iter()
            .map(|word| PoolEntry {
                word,
                fresh: true,
                served: 0,
            })
            .collect();
        Self {
            pool: Mutex::new(pool),
        }
    }

    /// Adds a fresh word.
    pub fn with_word(mut self, word: Word) -> Self {
        self.pool.get_mut().push(PoolEntry {
            word,
            fresh: true,
            served: 0,
        });
        self
    }

    /// Total words in the pool, fresh or not.
    pub async fn len(&self) -> usize {
        self.pool.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pool.lock().await.is_empty()
    }
}

impl WordSupply for InMemoryWordSupply {
    async fn request(
        &self,
        difficulty: Difficulty,
        category: Category,
        exclude: &[String],
    ) -> Result<Word, SupplyError> {
        let mut pool = self.pool.lock().await;

        let eligible: Vec<usize> = pool
            .iter()
            .enumerate()
            .filter(|(_, e)| e.in_bucket(difficulty, category))
            .filter(|(_, e)| !exclude.iter().any(|x| x.eq_ignore_ascii_case(e.word.text())))
            .map(|(i, _)| i)
            .collect();

        let best = eligible
            .iter()
            .map(|&i| (!pool[i].fresh, pool[i].served))
            .min();
        let candidates: Vec<usize> = eligible
            .into_iter()
            .filter(|&i| Some((!pool[i].fresh, pool[i].served)) == best)
            .collect();

        let Some(&index) = candidates.choose(&mut rand::rng()) else {
            tracing::debug!(%difficulty, %category, excluded = exclude.len(), "no word available");
            return Err(SupplyError::NoWordAvailable {
                difficulty,
                category,
            });
        };

        let entry = &mut pool[index];
        entry.fresh = false;
        entry.served += 1;
        tracing::debug!(%difficulty, %category, served = entry.served, "word served");
        Ok(entry.word.clone())
    }

    async fn available(
        &self,
        difficulty: Difficulty,
        category: Category,
    ) -> Result<usize, SupplyError> {
        let pool = self.pool.lock().await;
        Ok(pool
            .iter()
            .filter(|e| e.fresh && e.in_bucket(difficulty, category))
            .count())
    }

    async fn replenish(
        &self,
        difficulty: Difficulty,
        category: Category,
    ) -> Result<usize, SupplyError> {
        let mut pool = self.pool.lock().await;
        let mut recycled = 0;
        for entry in pool
            .iter_mut()
            .filter(|e| !e.fresh && e.in_bucket(difficulty, category))
        {
            entry.fresh = true;
            recycled += 1;
        }
        tracing::info!(%difficulty, %category, recycled, "word pool replenished");
        Ok(recycled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str) -> Word {
        Word::new(text, Category::Food, Difficulty::Easy).unwrap()
    }

    fn supply(texts: &[&str]) -> InMemoryWordSupply {
        InMemoryWordSupply::from_words(texts.iter().map(|t| word(t)))
    }

    #[tokio::test]
    async fn test_request_returns_word_from_bucket() {
        let s = supply(&["RICE", "SOUP"]).with_word(
            Word::new("CAT", Category::Animals, Difficulty::Easy).unwrap(),
        );

        let w = s.request(Difficulty::Easy, Category::Food, &[]).await.unwrap();

        assert_eq!(w.category(), Category::Food);
        assert!(w.text() == "RICE" || w.text() == "SOUP");
    }

    #[tokio::test]
    async fn test_request_serves_each_fresh_word_before_repeating() {
        let s = supply(&["RICE", "SOUP", "CAKE"]);
        let mut seen = Vec::new();
        for _ in 0..3 {
            seen.push(
                s.request(Difficulty::Easy, Category::Food, &[])
                    .await
                    .unwrap()
                    .text()
                    .to_string(),
            );
        }
        seen.sort();
        assert_eq!(seen, vec!["CAKE", "RICE", "SOUP"]);
    }

    #[tokio::test]
    async fn test_request_honours_exclude_list() {
        let s = supply(&["RICE", "SOUP"]);

        let w = s
            .request(Difficulty::Easy, Category::Food, &["rice".to_string()])
            .await
            .unwrap();

        assert_eq!(w.text(), "SOUP");
    }

    #[tokio::test]
    async fn test_request_empty_bucket_is_no_word_available() {
        let s = supply(&["RICE"]);

        let err = s
            .request(Difficulty::Hard, Category::Food, &[])
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SupplyError::NoWordAvailable {
                difficulty: Difficulty::Hard,
                category: Category::Food,
            }
        );
    }

    #[tokio::test]
    async fn test_available_counts_fresh_words_only() {
        let s = supply(&["RICE", "SOUP"]);
        assert_eq!(s.available(Difficulty::Easy, Category::Food).await, Ok(2));

        s.request(Difficulty::Easy, Category::Food, &[]).await.unwrap();

        assert_eq!(s.available(Difficulty::Easy, Category::Food).await, Ok(1));
    }

    #[tokio::test]
    async fn test_replenish_recycles_served_words() {
        let s = supply(&["RICE", "SOUP"]);
        s.request(Difficulty::Easy, Category::Food, &[]).await.unwrap();
        s.request(Difficulty::Easy, Category::Food, &[]).await.unwrap();
        assert_eq!(s.available(Difficulty::Easy, Category::Food).await, Ok(0));

        let recycled = s.replenish(Difficulty::Easy, Category::Food).await.unwrap();

        assert_eq!(recycled, 2);
        assert_eq!(s.available(Difficulty::Easy, Category::Food).await, Ok(2));
    }

    #[tokio::test]
    async fn test_seeded_has_every_bucket() {
        let s = InMemoryWordSupply::seeded();
        assert_eq!(s.len().await, 8 * 3 * 6);
        for category in Category::PLAYABLE {
            for difficulty in Difficulty::ALL {
                assert_eq!(s.available(difficulty, category).await, Ok(6));
            }
        }
    }
}
