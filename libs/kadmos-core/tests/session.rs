//! End-to-end drill sessions through the public API.

mod common;

use std::collections::BTreeMap;

use kadmos_core::{
    ItemScheduler, Mark, MarkedSegment, QuizItem, ScoreFormat, SchedulerError,
};
use pretty_assertions::assert_eq;

use common::{guesses, letter_items};

/// Answer correctly for every letter except the ones in `wrong`, which get
/// one bad answer the first time they come up.
fn play(scheduler: &mut ItemScheduler, wrong: &[&str]) -> Vec<String> {
    let mut shown = Vec::new();
    let mut missed: Vec<String> = Vec::new();

    while !scheduler.is_empty() {
        let item = scheduler.next_item().unwrap();
        let display = item.display.clone();
        let solution = item.property("name").unwrap().display_string().to_string();

        let guess = if wrong.contains(&display.as_str()) && !missed.contains(&display) {
            missed.push(display.clone());
            "xxxxxxxx".to_string()
        } else {
            solution
        };

        let result = item.grade_round(&guesses(&[("name", &guess)]));
        scheduler.enter_score(result.score).unwrap();
        shown.push(display);
    }

    shown
}

#[test]
fn session_runs_until_every_letter_is_known() {
    let mut scheduler = ItemScheduler::with_seed(letter_items(&["name"]), "session");
    let shown = play(&mut scheduler, &["ג"]);

    // Five letters right once; gimel wrong once then right twice.
    assert_eq!(shown.len(), 7);
    assert_eq!(shown.iter().filter(|d| *d == "ג").count(), 3);
    assert_eq!(scheduler.hit_count(), 5);
    assert_eq!(scheduler.progress(), 1.0);
    assert_eq!(
        scheduler.next_item().unwrap_err(),
        SchedulerError::Exhausted
    );

    // Gimel's best attempt was its second: 1 / 2.
    let gimel = scheduler
        .items()
        .iter()
        .position(|item| item.display == "ג")
        .unwrap();
    assert_eq!(scheduler.best_score(gimel), Some(0.5));
    assert_eq!(scheduler.cumulative_score(), 4.5);
    assert_eq!(scheduler.score_string(ScoreFormat::Both), "4.5/5 (90%)");
}

#[test]
fn seeded_sessions_replay_identically() {
    let run = || {
        let mut scheduler = ItemScheduler::with_seed(letter_items(&["name"]), "shared-seed");
        play(&mut scheduler, &["א", "ד"])
    };
    assert_eq!(run(), run());
}

#[test]
fn rounds_average_field_scores() {
    let items = letter_items(&["name", "sound", "value"]);
    let bet = &items[1];

    let result = bet.grade_round(&guesses(&[("name", "vet"), ("sound", "v"), ("value", "2")]));
    assert_eq!(result.score, 2.0 / 3.0);
    assert_eq!(
        result.fields.iter().map(|f| f.field.as_str()).collect::<Vec<_>>(),
        vec!["name", "sound", "value"]
    );
}

#[test]
fn list_feedback_marks_original_text() {
    let items = letter_items(&["name"]);
    let kaf = &items[4];

    let result = kaf.grade_round(&guesses(&[("name", "kaff")]));
    let grade = &result.fields[0].grade;

    assert_eq!(result.score, 0.5);
    assert_eq!(grade.marked_guess, vec![MarkedSegment::new("kaff", Mark::Partial)]);
    assert_eq!(
        grade.marked_solution,
        vec![
            MarkedSegment::new("kaf", Mark::Partial),
            MarkedSegment::new(", ", Mark::Unmarked),
            MarkedSegment::new("khaf", Mark::Incorrect),
            MarkedSegment::new(" (final)", Mark::Unmarked),
        ]
    );
}

#[test]
fn grades_serialize_for_display() {
    let items = letter_items(&["name"]);
    let result = items[0].grade_round(&BTreeMap::from([(
        "name".to_string(),
        "aleph".to_string(),
    )]));

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["score"], 1.0);
    assert_eq!(json["fields"][0]["grade"]["marked_guess"][0]["mark"], "correct");
}

#[test]
fn items_can_be_scheduled_by_key() {
    let items: Vec<QuizItem> = letter_items(&["sound"]);
    let mut scheduler = ItemScheduler::with_seed((0..items.len()).collect::<Vec<_>>(), "keys");

    let index = *scheduler.next_item().unwrap();
    let sound = items[index].property("sound").unwrap().display_string().to_string();
    let result = items[index].grade_round(&guesses(&[("sound", &sound)]));
    scheduler.enter_score(result.score).unwrap();

    assert!(scheduler.is_retired(index));
}
