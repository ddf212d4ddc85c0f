//! Terminal drill session on top of kadmos-core.

pub mod config;
pub mod deck;
pub mod render;

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use anyhow::Context;
use kadmos_core::{reference_matches, ItemScheduler, QuizItem, ScoreFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;
use crate::deck::Deck;
use crate::render::render;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every item was retired.
    Finished { rounds: usize },
    /// Input ran out first.
    Quit { rounds: usize },
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = AppConfig::from_env()?;

    tracing::info!(deck = %config.deck_path.display(), "Loading deck...");
    let deck = Deck::load(&config.deck_path)?;

    let fields: Vec<&str> = match &config.fields {
        Some(fields) => fields.iter().map(String::as_str).collect(),
        None => deck.field_names(),
    };
    let items = deck
        .quiz_items(&fields, config.language.as_deref())
        .context("building quiz items")?;
    let references = deck
        .reference_items(&fields, config.language.as_deref())
        .context("building reference items")?;
    tracing::info!(items = items.len(), fields = ?fields, "Deck ready");

    let mut scheduler = match &config.seed {
        Some(seed) => ItemScheduler::with_seed(items, seed),
        None => ItemScheduler::new(items),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let outcome = play(&mut scheduler, &references, stdin.lock(), stdout.lock())?;
    tracing::info!(?outcome, "Session over");

    Ok(())
}

/// Run rounds until every item is retired or `input` is exhausted.
///
/// `references` line up with the scheduler's items. A failed field is
/// checked against them, and the items the guess actually belongs to get
/// asked more often.
pub fn play<R: BufRead, W: Write>(
    scheduler: &mut ItemScheduler,
    references: &[QuizItem],
    mut input: R,
    mut output: W,
) -> anyhow::Result<Outcome> {
    let mut rounds = 0;

    while !scheduler.is_empty() {
        let item = scheduler.next_item()?;
        writeln!(output, "\n{}", item.display)?;

        let Some(guesses) = read_guesses(item, &mut input, &mut output)? else {
            writeln!(output)?;
            write_summary(scheduler, &mut output)?;
            return Ok(Outcome::Quit { rounds });
        };

        let result = item.grade_round(&guesses);
        let mut confusions = Vec::new();
        for field in &result.fields {
            let verdict = if field.grade.passes() { "ok" } else { "miss" };
            writeln!(
                output,
                "  {}: {} -> {} ({verdict})",
                field.field,
                render(&field.grade.marked_guess),
                render(&field.grade.marked_solution),
            )?;

            if !field.grade.passes() {
                let guess = guesses.get(&field.field).map(String::as_str).unwrap_or("");
                let matches = reference_matches(references, &field.field, guess);
                if !matches.is_empty() {
                    let names: Vec<&str> =
                        matches.iter().map(|&i| references[i].display.as_str()).collect();
                    writeln!(output, "  {guess} is {}", names.join(", "))?;
                    confusions.push(matches);
                }
            }
        }

        for matches in &confusions {
            scheduler.punish_confusions(matches)?;
        }

        scheduler.enter_score(result.score)?;
        rounds += 1;
        writeln!(
            output,
            "  progress {:.0}%, score {}",
            scheduler.progress() * 100.0,
            scheduler.score_string(ScoreFormat::Ratio)
        )?;
    }

    write_summary(scheduler, &mut output)?;
    Ok(Outcome::Finished { rounds })
}

/// Prompt for one line per field. `None` at end of input.
fn read_guesses<R: BufRead, W: Write>(
    item: &QuizItem,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<BTreeMap<String, String>>> {
    let mut guesses = BTreeMap::new();

    for field in item.fields() {
        write!(output, "{field}: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        guesses.insert(field.to_string(), line.trim_end_matches(['\r', '\n']).to_string());
    }

    Ok(Some(guesses))
}

fn write_summary<W: Write>(scheduler: &ItemScheduler, output: &mut W) -> io::Result<()> {
    writeln!(output, "\nFinal score: {}", scheduler.score_string(ScoreFormat::Both))
}
