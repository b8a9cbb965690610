//! Built-in word list used to seed [`InMemoryWordSupply`](crate::InMemoryWordSupply).
//!
//! Easy words are short, hard words are long; each playable category has
//! six per difficulty.

use hangman_protocol::{Category, Difficulty};

struct Shelf {
    category: Category,
    easy: [&'static str; 6],
    medium: [&'static str; 6],
    hard: [&'static str; 6],
}

static SHELVES: [Shelf; 8] = [
    Shelf {
        category: Category::Animals,
        easy: ["CAT", "DOG", "LION", "BEAR", "FROG", "GOAT"],
        medium: ["GIRAFFE", "PANTHER", "DOLPHIN", "OSTRICH", "BUFFALO", "HAMSTER"],
        hard: ["CHIMPANZEE", "RHINOCEROS", "CROCODILE", "ARMADILLO", "PORCUPINE", "SALAMANDER"],
    },
    Shelf {
        category: Category::Science,
        easy: ["ATOM", "CELL", "GENE", "ACID", "MASS", "WAVE"],
        medium: ["PROTON", "NEUTRON", "ENZYME", "PLASMA", "ISOTOPE", "CATALYST"],
        hard: ["CHROMOSOME", "PHOTOSYNTHESIS", "THERMODYNAMICS", "MITOCHONDRIA", "ELECTROMAGNET", "HYPOTHESIS"],
    },
    Shelf {
        category: Category::Arts,
        easy: ["POEM", "SONG", "DRAW", "CLAY", "OPERA", "DANCE"],
        medium: ["CANVAS", "PALETTE", "MOSAIC", "BALLET", "SONNET", "FRESCO"],
        hard: ["RENAISSANCE", "IMPRESSIONISM", "CHOREOGRAPHY", "SYMPHONY", "CALLIGRAPHY", "WATERCOLOR"],
    },
    Shelf {
        category: Category::Sports,
        easy: ["GOLF", "BALL", "SWIM", "POLO", "RACE", "SKI"],
        medium: ["TENNIS", "SOCCER", "HOCKEY", "CRICKET", "BOXING", "ARCHERY"],
        hard: ["BADMINTON", "GYMNASTICS", "TRIATHLON", "DECATHLON", "VOLLEYBALL", "SNOWBOARDING"],
    },
    Shelf {
        category: Category::Food,
        easy: ["RICE", "CAKE", "SOUP", "PEAR", "BREAD", "TACO"],
        medium: ["NOODLE", "BURRITO", "PRETZEL", "AVOCADO", "LASAGNA", "MUFFIN"],
        hard: ["CROISSANT", "GUACAMOLE", "RATATOUILLE", "BRUSCHETTA", "POMEGRANATE", "CASSEROLE"],
    },
    Shelf {
        category: Category::Geography,
        easy: ["HILL", "LAKE", "RIVER", "DUNE", "CAVE", "ISLE"],
        medium: ["CANYON", "GLACIER", "VOLCANO", "PLATEAU", "ISLAND", "TUNDRA"],
        hard: ["ARCHIPELAGO", "PENINSULA", "ESCARPMENT", "LONGITUDE", "TRIBUTARY", "MEDITERRANEAN"],
    },
    Shelf {
        category: Category::Business,
        easy: ["CASH", "DEAL", "LOAN", "SALE", "FIRM", "BANK"],
        medium: ["PROFIT", "BUDGET", "MARKET", "INVOICE", "CAPITAL", "MERGER"],
        hard: ["ENTREPRENEUR", "DIVIDEND", "INVESTMENT", "PARTNERSHIP", "BANKRUPTCY", "ACQUISITION"],
    },
    Shelf {
        category: Category::Health,
        easy: ["DIET", "NAP", "PULSE", "SLEEP", "YOGA", "HEART"],
        medium: ["VITAMIN", "FITNESS", "PROTEIN", "IMMUNE", "THERAPY", "STRETCH"],
        hard: ["METABOLISM", "CARDIOVASCULAR", "NUTRITIONIST", "PHYSIOTHERAPY", "VACCINATION", "CHOLESTEROL"],
    },
];

/// Every built-in word with its category and difficulty.
pub(crate) fn seed_words() -> impl Iterator<Item = (Category, Difficulty, &'static str)> {
    SHELVES.iter().flat_map(|shelf| {
        let easy = shelf.easy.iter().map(move |w| (shelf.category, Difficulty::Easy, *w));
        let medium = shelf.medium.iter().map(move |w| (shelf.category, Difficulty::Medium, *w));
        let hard = shelf.hard.iter().map(move |w| (shelf.category, Difficulty::Hard, *w));
        easy.chain(medium).chain(hard)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_protocol::Word;

    #[test]
    fn test_seed_words_cover_every_playable_bucket() {
        for category in Category::PLAYABLE {
            for difficulty in Difficulty::ALL {
                let count = seed_words()
                    .filter(|(c, d, _)| *c == category && *d == difficulty)
                    .count();
                assert_eq!(count, 6, "{category}/{difficulty}");
            }
        }
    }

    #[test]
    fn test_seed_words_are_valid() {
        for (category, difficulty, text) in seed_words() {
            assert!(Word::new(text, category, difficulty).is_ok(), "{text}");
        }
    }
}
