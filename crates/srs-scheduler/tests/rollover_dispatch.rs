//! Dispatcher interleaving, counters, tag filtering and the daily cutoff.

mod common;

use common::*;
use srs_domain::{CardQueue, Ease};
use srs_scheduler::{Clock, DeckParams, NewCardSpacing};
use std::collections::BTreeSet;

#[test]
fn cutoff_sits_strictly_ahead_within_a_day() {
    for utc_offset in [-8 * 3_600, 0, 2 * 3_600] {
        let params = DeckParams {
            utc_offset,
            ..DeckParams::default()
        };
        let (clock, scheduler) = deck(params, |_| {});
        let cutoff = scheduler.day_cutoff();
        assert!(cutoff > clock.now());
        assert!(cutoff <= clock.now() + DAY);
    }
}

#[test]
fn check_day_is_idempotent_without_time_travel() {
    let (_, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        review_card(store, fact, model, START - 100, 10.0);
    });

    scheduler.check_day().unwrap();
    let cutoff = scheduler.day_cutoff();
    let counts = scheduler.counts();
    scheduler.check_day().unwrap();
    assert_eq!(scheduler.day_cutoff(), cutoff);
    assert_eq!(scheduler.counts(), counts);
}

#[test]
fn day_rollover_rebuilds_the_queues() {
    let mut tomorrow_due = 0;
    let (clock, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        // due a little past today's cutoff
        tomorrow_due = 1_036_800 + 100;
        review_card(store, fact, model, tomorrow_due, 10.0);
    });

    assert_eq!(scheduler.counts(), (0, 0));
    assert!(scheduler.get_card().unwrap().is_none());

    let old_cutoff = scheduler.day_cutoff();
    clock.set(tomorrow_due + 200);
    let card = scheduler.get_card().unwrap();
    assert!(card.is_some(), "yesterday's future card is due today");
    assert!(scheduler.day_cutoff() > old_cutoff);
    assert_eq!(scheduler.day_count(), 13);
}

#[test]
fn each_card_lives_in_exactly_one_queue() {
    let (clock, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        for _ in 0..2 {
            let fact = add_fact(store, "");
            review_card(store, fact, model, START - 100, 10.0);
        }
        for due in [1, 2] {
            let fact = add_fact(store, "");
            new_card(store, fact, model, due);
        }
        let fact = add_fact(store, "");
        learning_card(store, fact, model, START - 10);
    });

    let mut seen = BTreeSet::new();
    for _ in 0..10 {
        clock.advance(1);
        let Some(mut card) = scheduler.get_card().unwrap() else {
            break;
        };
        assert!(seen.insert(card.id), "card handed out twice");
        // removal/pass clears each card out of today's selection
        scheduler.answer_card(&mut card, Ease::Good).unwrap();
    }
    assert_eq!(seen.len(), 5);
    assert_eq!(scheduler.counts(), (0, 0));
    assert!(scheduler.get_card().unwrap().is_none());
}

#[test]
fn counters_survive_a_reset_unchanged() {
    let (clock, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        for _ in 0..3 {
            let fact = add_fact(store, "");
            review_card(store, fact, model, START - 100, 10.0);
        }
        for due in [1, 2, 3] {
            let fact = add_fact(store, "");
            new_card(store, fact, model, due);
        }
        let fact = add_fact(store, "");
        learning_card(store, fact, model, START - 10);
    });

    for _ in 0..3 {
        clock.advance(1);
        let mut card = scheduler.get_card().unwrap().unwrap();
        scheduler.answer_card(&mut card, Ease::Good).unwrap();
    }
    let counts = scheduler.counts();
    let new_avail = scheduler.new_available();
    scheduler.reset().unwrap();
    assert_eq!(scheduler.counts(), counts);
    assert_eq!(scheduler.new_available(), new_avail);
}

#[test]
fn new_cards_wait_until_reviews_finish_under_last_spacing() {
    let params = DeckParams {
        new_card_spacing: NewCardSpacing::Last,
        ..DeckParams::default()
    };
    let (_, mut scheduler) = deck(params, |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        review_card(store, fact, model, START - 100, 10.0);
        let fact = add_fact(store, "");
        new_card(store, fact, model, 1);
    });

    let card = scheduler.get_card().unwrap().unwrap();
    assert_eq!(card.queue, CardQueue::Review);
}

#[test]
fn new_cards_come_first_under_first_spacing() {
    let params = DeckParams {
        new_card_spacing: NewCardSpacing::First,
        ..DeckParams::default()
    };
    let (_, mut scheduler) = deck(params, |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        review_card(store, fact, model, START - 100, 10.0);
        let fact = add_fact(store, "");
        new_card(store, fact, model, 1);
    });

    let card = scheduler.get_card().unwrap().unwrap();
    assert_eq!(card.queue, CardQueue::New);
}

#[test]
fn distribution_interleaves_new_cards_by_modulus() {
    // 1 new + 2 reviews: modulus = max(2, ceil(3/1)) = 3, and the session
    // opens with the new card since no reps are on the log yet
    let (clock, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        for _ in 0..2 {
            let fact = add_fact(store, "");
            review_card(store, fact, model, START - 100, 10.0);
        }
        let fact = add_fact(store, "");
        new_card(store, fact, model, 1);
    });

    let mut queues = Vec::new();
    for _ in 0..3 {
        clock.advance(1);
        let Some(mut card) = scheduler.get_card().unwrap() else {
            break;
        };
        queues.push(card.queue);
        scheduler.answer_card(&mut card, Ease::Good).unwrap();
    }
    assert_eq!(
        queues,
        vec![CardQueue::New, CardQueue::Review, CardQueue::Review]
    );
}

#[test]
fn collapse_grace_shows_learning_cards_slightly_early() {
    let (_, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        // due five minutes from now, inside the ten-minute collapse window
        learning_card(store, fact, model, START + 300);
    });

    let card = scheduler.get_card().unwrap();
    assert!(card.is_some(), "collapse window should surface the card");

    let (_, mut scheduler) = deck(Default::default(), |store| {
        let model = stock_model(store);
        let fact = add_fact(store, "");
        learning_card(store, fact, model, START + 700);
    });
    assert!(scheduler.get_card().unwrap().is_none());
}

#[test]
fn tag_filter_restricts_review_selection() {
    let params = DeckParams {
        rev_active_tags: "verbs".to_owned(),
        ..DeckParams::default()
    };
    let mut tagged = None;
    let (_, mut scheduler) = deck(params, |store| {
        let model = stock_model(store);
        let verbs = add_fact(store, "verbs");
        tagged = Some(review_card(store, verbs, model, START - 100, 10.0));
        let plain = add_fact(store, "");
        review_card(store, plain, model, START - 100, 10.0);
    });

    assert_eq!(scheduler.counts(), (0, 1));
    let card = scheduler.get_card().unwrap().unwrap();
    assert_eq!(card.id, tagged.unwrap().id);
}

#[test]
fn inactive_tags_exclude_cards() {
    let params = DeckParams {
        rev_inactive_tags: "suspended-topic".to_owned(),
        ..DeckParams::default()
    };
    let (_, mut scheduler) = deck(params, |store| {
        let model = stock_model(store);
        let muted = add_fact(store, "suspended-topic");
        review_card(store, muted, model, START - 100, 10.0);
    });

    assert_eq!(scheduler.counts(), (0, 0));
    assert!(scheduler.get_card().unwrap().is_none());
}
