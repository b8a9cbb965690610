//! Snarky Hangman in a terminal.
//!
//! ```text
//! cargo run -p hangman-terminal            # play as a guest
//! cargo run -p hangman-terminal -- alice   # play as player P-1 (daily limit applies)
//! ```

mod commentary;

use hangman::prelude::*;
use hangman_session::TokenProvider;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

type Input = Lines<BufReader<Stdin>>;

const SHARE_BASE_URL: &str = "https://snarky-hangman.example/play";

#[tokio::main]
async fn main() -> Result<(), HangmanError> {
    hangman::init_tracing();

    let identities = TokenProvider::new()
        .with_player("alice", PlayerId(1))
        .with_player("bob", PlayerId(2));
    let token = std::env::args().nth(1);
    let identity = identities.resolve(token.as_deref()).await?;

    let service = GameService::in_memory(GameConfig::default());
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    println!("Snarky Hangman. You are {identity}. Try not to embarrass yourself.");

    loop {
        println!();
        println!("Pick a difficulty (easy, medium, hard), `challenge <id>`, or `quit`:");
        let Some(line) = next_line(&mut input).await else {
            break;
        };
        let line = line.trim();

        let started = if line == "quit" {
            break;
        } else if let Some(id) = line.strip_prefix("challenge ") {
            let id = ChallengeId(id.trim().to_string());
            service.accept_challenge(identity.clone(), &id).await
        } else {
            match line.parse::<Difficulty>() {
                Ok(difficulty) => service.start_round(identity.clone(), difficulty).await,
                Err(e) => {
                    println!("{e}");
                    continue;
                }
            }
        };

        let started = match started {
            Ok(started) => started,
            Err(e) => {
                println!("Can't start a round: {e}");
                if e.is_retryable() {
                    println!("Give it a moment and try again.");
                }
                continue;
            }
        };
        tracing::debug!(round_id = %started.handle.round_id(), "playing round");
        if let Some(nag) = started.allowance.as_ref().and_then(commentary::allowance) {
            println!("{nag}");
        }

        let Some(snapshot) = play(started, &mut input).await? else {
            break;
        };

        if snapshot.is_won() {
            println!("Share a challenge with a friend? (y/n)");
            if next_line(&mut input).await.as_deref().map(str::trim) == Some("y") {
                let export = match service.create_challenge(&snapshot, &identity).await {
                    Ok(export) => export,
                    Err(e) => {
                        tracing::warn!(error = %e, "could not share challenge");
                        continue;
                    }
                };
                println!("{}", export.message);
                println!("{}", export.link(SHARE_BASE_URL));
                println!("(or type `challenge {}` here)", export.record.id);
            }
        }
    }

    println!("Leaving already? Typical.");
    Ok(())
}

async fn next_line(input: &mut Input) -> Option<String> {
    input.next_line().await.ok().flatten()
}

fn parse_hint(kind: &str) -> Option<HintType> {
    match kind {
        "c" | "category" => Some(HintType::CategoryReveal),
        "l" | "letter" => Some(HintType::LetterReveal),
        "p" | "pattern" => Some(HintType::PatternReveal),
        other => other.parse().ok(),
    }
}

/// Plays one round. Returns the final snapshot, or `None` if stdin closed.
async fn play(started: StartedRound, input: &mut Input) -> Result<Option<RoundSnapshot>, HangmanError> {
    let StartedRound {
        handle, mut events, ..
    } = started;

    let snap = handle.snapshot().await?;
    println!(
        "{} word, {} letters, category {}. You have {}s.",
        snap.difficulty, snap.word_len, snap.category, snap.time_remaining
    );
    println!("{}", snap.pattern);
    println!("Type a letter, `?c` / `?l` / `?p` for a hint, or `!` to give up.");

    loop {
        tokio::select! {
            line = next_line(input) => {
                let Some(line) = line else {
                    handle.acknowledge().await?;
                    return Ok(None);
                };
                let line = line.trim();
                if line == "!" {
                    let snap = handle.snapshot().await?;
                    handle.acknowledge().await?;
                    println!("Quitter. It doesn't even get a score.");
                    return Ok(Some(snap));
                }
                if let Some(kind) = line.strip_prefix('?') {
                    match parse_hint(kind) {
                        Some(hint) => {
                            handle.hint(hint).await?;
                        }
                        None => println!("Hints are ?c, ?l or ?p."),
                    }
                    continue;
                }
                let Some(letter) = line.chars().next() else {
                    continue;
                };
                if let GuessOutcome::Ignored(reason) = handle.guess(letter).await? {
                    match reason {
                        IgnoreReason::AlreadyGuessed => println!("You already tried that one."),
                        IgnoreReason::NotALetter => println!("Letters. A to Z. You've got this."),
                        IgnoreReason::RoundOver => {}
                    }
                }
            }
            event = events.recv() => {
                let Some(event) = event else {
                    return Ok(None);
                };
                if let RoundEvent::Finished { won, score, word, time_remaining } = &event {
                    if *won {
                        println!("{}", commentary::win());
                        println!("The word was {word}. Score: {score}.");
                    } else {
                        println!("{}", commentary::lose(*time_remaining == 0));
                        println!("The word was {word}.");
                    }
                    let snap = handle.snapshot().await?;
                    handle.acknowledge().await?;
                    return Ok(Some(snap));
                }
                render(&handle, event).await?;
            }
        }
    }
}

async fn render(handle: &RoundHandle, event: RoundEvent) -> Result<(), HangmanError> {
    match event {
        RoundEvent::GuessApplied {
            correct,
            time_remaining,
            remaining_guesses,
            ..
        } => {
            let line = if correct {
                commentary::good_guess()
            } else {
                commentary::bad_guess()
            };
            println!("{line}");
            let snap = handle.snapshot().await?;
            println!(
                "{}   ({time_remaining}s, {remaining_guesses} wrong guesses left)",
                snap.pattern
            );
        }
        RoundEvent::HintGranted {
            payload,
            hints_remaining,
            ..
        } => {
            println!("{}", commentary::hint_granted());
            println!("{payload}   ({hints_remaining} hints left)");
        }
        RoundEvent::HintDeclined { hint, reason } => {
            println!("{}", commentary::hint_declined(hint, reason));
        }
        RoundEvent::HintRefunded { .. } => println!("{}", commentary::hint_refunded()),
        RoundEvent::TimeLow { seconds } => println!("{} ({seconds}s)", commentary::time_low(seconds)),
        RoundEvent::Ticked { time_remaining } if time_remaining % 15 == 0 => {
            println!("[{time_remaining}s]");
        }
        RoundEvent::Ticked { .. } | RoundEvent::Finished { .. } => {}
    }
    Ok(())
}
