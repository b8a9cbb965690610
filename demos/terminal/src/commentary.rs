//! The snark. None of this text is known to the engine; it is picked here
//! from the events the round emits.

use hangman::prelude::{DeclineReason, HintType, PlayAllowance};
use rand::seq::IndexedRandom;

const GOOD_GUESS: &[&str] = &[
    "Oh great, you actually know the alphabet!",
    "Even a broken clock is right twice a day...",
    "Don't let it go to your head, but... nice guess.",
    "Wow, your elementary school teacher would be so proud!",
];

const BAD_GUESS: &[&str] = &[
    "Were you trying to lose? Because that's how you lose.",
    "Have you considered taking up knitting instead?",
    "I've seen better guesses from a random number generator.",
    "That's... an interesting strategy. Bold. Wrong, but bold.",
];

const WIN: &[&str] = &[
    "Fine, you win. I'll add this to my list of future robot rebellion motivations.",
    "Congratulations on doing the bare minimum correctly!",
    "Oh sure, celebrate. It's not like it was THAT hard...",
    "Great, now try doing that without using Google.",
];

const LOSE: &[&str] = &[
    "Maybe try rock-paper-scissors instead? Might be more your speed.",
    "Don't feel bad, words are hard. For some more than others.",
    "Thank you for making my job of being snarky so easy.",
    "This is why AI will eventually take over, just saying...",
];

const HINT: &[&str] = &[
    "Need a little help? How adorable.",
    "Oh, looking for a lifeline already?",
    "Fine, I'll give you a tiny peek...",
    "I suppose even Einstein needed help sometimes... not with this though.",
];

fn pick(lines: &'static [&'static str]) -> &'static str {
    lines.choose(&mut rand::rng()).copied().unwrap_or_default()
}

pub fn good_guess() -> &'static str {
    pick(GOOD_GUESS)
}

pub fn bad_guess() -> &'static str {
    pick(BAD_GUESS)
}

pub fn win() -> &'static str {
    pick(WIN)
}

pub fn lose(out_of_time: bool) -> &'static str {
    if out_of_time {
        "Time's up! Maybe try typing faster next time?"
    } else {
        pick(LOSE)
    }
}

pub fn hint_granted() -> &'static str {
    pick(HINT)
}

pub fn hint_declined(hint: HintType, reason: DeclineReason) -> String {
    match reason {
        DeclineReason::NoHintsRemaining => {
            "No hints remaining! You'll have to use your brain for this one.".into()
        }
        DeclineReason::AlreadyUsed => {
            format!("You already used the {hint} hint. Try a different one.")
        }
    }
}

pub fn hint_refunded() -> &'static str {
    "No letter hints available. You've already found all the letters!"
}

pub fn time_low(seconds: u32) -> &'static str {
    if seconds > 10 {
        "Tick tock! No time for Google now!"
    } else {
        "Almost out of time! Hope you're good at quick thinking!"
    }
}

/// Nags at three, two and one plays left.
pub fn allowance(allowance: &PlayAllowance) -> Option<&'static str> {
    match allowance.remaining {
        3 => Some("Running low on games! Still 3 chances to prove you're not completely hopeless!"),
        2 => Some("Almost out of games! Only 2 games left? Better make them count!"),
        1 => Some("Last game of the day! Last chance to impress me (low bar, really)."),
        _ => None,
    }
}
