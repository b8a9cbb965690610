//! Hint content generators.
//!
//! These are pure functions of the word, the letters guessed so far and
//! an injected RNG. Charging for a hint (slots, used types, time bonus)
//! is the round's job, not theirs.

use std::collections::BTreeSet;

use hangman_protocol::{Category, HintPayload, HintType, LengthBucket, Word};
use rand::Rng;
use rand::seq::IndexedRandom;

const VOWELS: &[char] = &['A', 'E', 'I', 'O', 'U'];

/// Sub-category clues, three per category.
pub fn clues_for(category: Category) -> &'static [&'static str; 3] {
    match category {
        Category::Animals => &["It might be your pet!", "Found in the wild", "Could be a farm animal"],
        Category::Science => &["Think laboratory", "Belongs in a textbook", "Used in experiments"],
        Category::Arts => &["Found in museums", "Used by creators", "Part of culture"],
        Category::Sports => &["Used in games", "Athletes need this", "Found on fields"],
        Category::Food => &["Might be in your kitchen", "Could be tasty", "Found in restaurants"],
        Category::Geography => &["Check your maps", "Part of the landscape", "Natural feature"],
        Category::Business => &["Think commerce", "Found in offices", "Part of trade"],
        Category::Health => &["Related to wellness", "Medical term", "Body system"],
        Category::Challenge => &["Try to beat this!", "Special word", "Friend's challenge"],
    }
}

/// Picks one clue for the category, uniformly. Ignores guessed letters.
pub fn category_clue<R: Rng + ?Sized>(category: Category, rng: &mut R) -> &'static str {
    let clues = clues_for(category);
    clues[rng.random_range(0..clues.len())]
}

/// Picks an unguessed letter of the word.
///
/// Unguessed vowels are preferred; if none remain, any unguessed letter.
/// Each distinct letter in the eligible set is equally likely. Returns
/// `None` when every letter of the word has been guessed.
pub fn reveal_letter<R: Rng + ?Sized>(
    word: &Word,
    guessed: &BTreeSet<char>,
    rng: &mut R,
) -> Option<char> {
    let unguessed: Vec<char> = word
        .distinct_letters()
        .into_iter()
        .filter(|l| !guessed.contains(l))
        .collect();

    let vowels: Vec<char> = unguessed
        .iter()
        .copied()
        .filter(|l| VOWELS.contains(l))
        .collect();

    let pool = if vowels.is_empty() { &unguessed } else { &vowels };
    pool.choose(rng).copied()
}

/// The word with guessed letters shown and `_` elsewhere, space separated.
///
/// `CAT` with `{A}` guessed renders as `_ A _`.
pub fn word_pattern(word: &Word, guessed: &BTreeSet<char>) -> String {
    let mut out = String::with_capacity(word.len() * 2);
    for (i, letter) in word.letters().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(if guessed.contains(&letter) { letter } else { '_' });
    }
    out
}

/// Builds the payload for a hint of the given type.
///
/// `None` means there is nothing to give (only possible for a letter
/// reveal on a fully guessed word); the caller refunds the charge.
pub fn generate<R: Rng + ?Sized>(
    hint: HintType,
    word: &Word,
    guessed: &BTreeSet<char>,
    rng: &mut R,
) -> Option<HintPayload> {
    match hint {
        HintType::CategoryReveal => Some(HintPayload::Category {
            clue: category_clue(word.category(), rng).to_string(),
        }),
        HintType::LetterReveal => {
            reveal_letter(word, guessed, rng).map(|letter| HintPayload::Letter { letter })
        }
        HintType::PatternReveal => Some(HintPayload::Pattern {
            pattern: word_pattern(word, guessed),
            bucket: LengthBucket::for_len(word.len()),
        }),
    }
}
