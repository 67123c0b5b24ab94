//! Registry-level behavior over sequences of events.

use chrono::{NaiveDate, NaiveDateTime};
use slirc_stats::{MessageKind, NewMessage, Stats, StatsError, StatsLimits};

fn at(hour: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2013, 8, 7)
        .unwrap()
        .and_hms_opt(hour, min, sec)
        .unwrap()
}

fn say(stats: &mut Stats, nick: &str, text: &str, hour: u32) {
    stats
        .add_message(NewMessage::msg("zqz", "#deviate", nick, at(hour, 0, 0), text))
        .unwrap();
}

#[test]
fn ids_are_sequential_per_kind() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "one", 1);
    say(&mut stats, "Aaron", "two", 1);
    stats
        .add_message(NewMessage::join("zqz", "#other", "knivey", at(2, 0, 0)))
        .unwrap();
    stats
        .add_message(NewMessage::join("efnet", "#other", "knivey", at(2, 0, 0)))
        .unwrap();

    let ids: Vec<u64> = stats.messages().map(|m| m.id().get()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    let users: Vec<u64> = stats.users().map(|u| u.id().get()).collect();
    assert_eq!(users, vec![1, 2, 3, 4]);
    let channels: Vec<u64> = stats.channels().map(|c| c.id().get()).collect();
    assert_eq!(channels, vec![1, 2, 3]);
    let networks: Vec<u64> = stats.networks().map(|n| n.id().get()).collect();
    assert_eq!(networks, vec![1, 2]);
}

#[test]
fn same_name_on_different_networks_is_distinct() {
    let mut stats = Stats::new();
    stats
        .add_message(NewMessage::msg("zqz", "#deviate", "dylan", at(1, 0, 0), "a"))
        .unwrap();
    stats
        .add_message(NewMessage::msg("efnet", "#deviate", "dylan", at(1, 0, 0), "b"))
        .unwrap();

    let zqz = stats.user("zqz", "dylan").unwrap().id();
    let efnet = stats.user("efnet", "dylan").unwrap().id();
    assert_ne!(zqz, efnet);
}

#[test]
fn lookups_are_idempotent_and_never_create() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "hello", 1);

    let first = stats.channel("zqz", "#deviate").unwrap().id();
    let second = stats.channel("zqz", "#deviate").unwrap().id();
    assert_eq!(first, second);

    let err = stats.user("zqz", "nobody").unwrap_err();
    assert!(err.is_not_found());
    assert!(matches!(stats.network("efnet"), Err(StatsError::NetworkNotFound(_))));
    assert_eq!(stats.summary().users, 1);
}

#[test]
fn rebuilt_indexes_resolve_to_the_same_entities() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "hello", 1);
    say(&mut stats, "Aaron", "hi", 2);
    stats
        .add_message(NewMessage::join("zqz", "#other", "knivey", at(3, 0, 0)))
        .unwrap();

    let before: Vec<_> = ["dylan", "Aaron", "knivey"]
        .iter()
        .map(|nick| stats.user("zqz", nick).unwrap().id())
        .collect();
    let other = stats.channel("zqz", "#other").unwrap().id();

    stats.invalidate_indexes();
    assert!(matches!(
        stats.user("zqz", "dylan"),
        Err(StatsError::IndexNotBuilt { .. })
    ));

    stats.rebuild_indexes().unwrap();
    stats.rebuild_indexes().unwrap();
    let after: Vec<_> = ["dylan", "Aaron", "knivey"]
        .iter()
        .map(|nick| stats.user("zqz", nick).unwrap().id())
        .collect();
    assert_eq!(before, after);
    assert_eq!(stats.channel("zqz", "#other").unwrap().id(), other);

    let network = stats.network("zqz").unwrap();
    assert_eq!(network.user_count(), 3);
    assert_eq!(network.channel_count(), 2);
}

#[test]
fn streak_is_recorded_when_broken() {
    let mut stats = Stats::new();
    for _ in 0..4 {
        say(&mut stats, "dylan", "again", 1);
    }
    // Bookkeeping events neither break nor extend the run.
    stats
        .add_message(NewMessage::join("zqz", "#deviate", "Aaron", at(1, 0, 0)))
        .unwrap();

    let channel = stats.channel("zqz", "#deviate").unwrap();
    assert!(channel.streaks().top().is_empty());
    assert_eq!(channel.streaks().current().map(|s| s.length), Some(4));

    say(&mut stats, "Aaron", "my turn", 1);
    let channel = stats.channel("zqz", "#deviate").unwrap();
    assert_eq!(channel.streaks().top().get("dylan"), Some(4));
    assert_eq!(channel.streaks().current().map(|s| s.length), Some(1));
}

#[test]
fn finish_credits_running_streaks_once() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "a", 1);
    say(&mut stats, "dylan", "b", 1);

    stats.finish();
    stats.finish();

    let channel = stats.channel("zqz", "#deviate").unwrap();
    assert_eq!(channel.streaks().top().get("dylan"), Some(2));
    assert_eq!(channel.streaks().top().len(), 1);

    let user = stats.user("zqz", "dylan").unwrap();
    assert_eq!(user.streaks().top().get("#deviate"), Some(2));
}

#[test]
fn user_streak_breaks_on_channel_switch() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "a", 1);
    say(&mut stats, "dylan", "b", 1);
    stats
        .add_message(NewMessage::msg("zqz", "#other", "dylan", at(1, 0, 0), "c"))
        .unwrap();

    let user = stats.user("zqz", "dylan").unwrap();
    assert_eq!(user.streaks().top().get("#deviate"), Some(2));
    assert_eq!(user.channel_ids().len(), 2);
}

#[test]
fn hourly_total_matches_chat_messages() {
    let mut stats = Stats::new();
    for hour in [0, 5, 5, 13, 23] {
        say(&mut stats, "dylan", "hi", hour);
    }
    stats
        .add_message(NewMessage::part("zqz", "#deviate", "dylan", at(23, 5, 0), "bye"))
        .unwrap();

    let channel = stats.channel("zqz", "#deviate").unwrap();
    let chat = channel
        .message_ids()
        .iter()
        .filter_map(|id| stats.message(*id))
        .filter(|m| m.kind() == MessageKind::Msg)
        .count() as u64;
    assert_eq!(channel.hourly().total(), chat);
    assert_eq!(channel.hourly().hours().iter().sum::<u64>(), 5);
    assert_eq!(channel.hourly().peak_hour(), Some(5));
}

#[test]
fn limits_bound_every_aggregator() {
    let mut stats = Stats::with_limits(StatsLimits {
        top_words: 2,
        top_urls: 1,
        top_streaks: 1,
        quotes: 3,
    });
    for text in ["a b c", "a b", "a", "http://x.io http://y.io", "d"] {
        say(&mut stats, "dylan", text, 1);
    }

    let channel = stats.channel("zqz", "#deviate").unwrap();
    assert_eq!(channel.words().top().len(), 2);
    assert_eq!(channel.words().top().entries()[0].token, "a");
    assert_eq!(channel.urls().top().len(), 1);
    assert_eq!(channel.quotes().len(), 3);
    assert_eq!(channel.quotes().latest().map(|q| q.text.as_str()), Some("d"));
    assert_eq!(stats.limits().quotes, 3);
}

#[test]
fn display_summaries() {
    let mut stats = Stats::new();
    say(&mut stats, "dylan", "hi", 1);
    say(&mut stats, "dylan", "there", 1);

    assert_eq!(
        stats.network("zqz").unwrap().to_string(),
        "Network: zqz, Channels: 1, Messages: 2"
    );
    assert_eq!(
        stats.channel("zqz", "#deviate").unwrap().to_string(),
        "Channel: #deviate Messages:(2)"
    );
    assert_eq!(
        stats.user("zqz", "dylan").unwrap().to_string(),
        "User: dylan Messages:(2)"
    );
}
