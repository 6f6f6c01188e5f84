// tests/dispatch_state.rs
// Per-channel failure state machine: blacklist budget, forbidden shortcut,
// reset on success, isolated failure domains.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use internship_watcher::notify::{ChannelSender, Dispatcher, SendError, MAX_RETRIES};

#[derive(Clone, Copy)]
enum Outcome {
    Ok,
    NotFound,
    Forbidden,
    Other,
}

/// Plays back a scripted outcome per attempt; defaults to success when the
/// script for a channel runs dry.
struct ScriptedSender {
    script: Mutex<HashMap<String, VecDeque<Outcome>>>,
    attempts: Mutex<HashMap<String, u32>>,
}

impl ScriptedSender {
    fn new(script: Vec<(&str, Vec<Outcome>)>) -> Arc<Self> {
        let script = script
            .into_iter()
            .map(|(id, outs)| (id.to_string(), outs.into_iter().collect::<VecDeque<_>>()))
            .collect();
        Arc::new(Self {
            script: Mutex::new(script),
            attempts: Mutex::new(HashMap::new()),
        })
    }

    fn attempts(&self, channel_id: &str) -> u32 {
        self.attempts.lock().unwrap().get(channel_id).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ChannelSender for ScriptedSender {
    async fn send_text(&self, channel_id: &str, _text: &str) -> Result<(), SendError> {
        *self
            .attempts
            .lock()
            .unwrap()
            .entry(channel_id.to_string())
            .or_default() += 1;
        let next = self
            .script
            .lock()
            .unwrap()
            .get_mut(channel_id)
            .and_then(|q| q.pop_front())
            .unwrap_or(Outcome::Ok);
        match next {
            Outcome::Ok => Ok(()),
            Outcome::NotFound => Err(SendError::NotFound),
            Outcome::Forbidden => Err(SendError::Forbidden),
            Outcome::Other => Err(SendError::Other(anyhow::anyhow!("transport hiccup"))),
        }
    }
}

fn channels(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn forbidden_blacklists_after_one_attempt() {
    let sender = ScriptedSender::new(vec![("a", vec![Outcome::Forbidden])]);
    let mut d = Dispatcher::new(Arc::clone(&sender), &channels(&["a"]), Duration::ZERO);

    d.dispatch("hello").await;
    assert!(d.state("a").unwrap().blacklisted);

    d.dispatch("again").await;
    assert_eq!(sender.attempts("a"), 1, "blacklisted channel was retried");
}

#[tokio::test]
async fn three_not_founds_exhaust_the_budget() {
    let sender = ScriptedSender::new(vec![(
        "a",
        vec![Outcome::NotFound, Outcome::NotFound, Outcome::NotFound],
    )]);
    let mut d = Dispatcher::new(Arc::clone(&sender), &channels(&["a"]), Duration::ZERO);

    for _ in 0..MAX_RETRIES {
        d.dispatch("msg").await;
    }
    assert!(d.state("a").unwrap().blacklisted);

    d.dispatch("msg").await;
    assert_eq!(sender.attempts("a"), MAX_RETRIES);
}

#[tokio::test]
async fn success_resets_the_failure_count() {
    let sender = ScriptedSender::new(vec![(
        "a",
        vec![Outcome::NotFound, Outcome::NotFound, Outcome::Ok],
    )]);
    let mut d = Dispatcher::new(Arc::clone(&sender), &channels(&["a"]), Duration::ZERO);

    for _ in 0..3 {
        d.dispatch("msg").await;
    }
    let state = d.state("a").unwrap();
    assert_eq!(state.failures, 0);
    assert!(!state.blacklisted);
}

#[tokio::test]
async fn other_errors_count_like_not_found() {
    let sender = ScriptedSender::new(vec![(
        "a",
        vec![Outcome::Other, Outcome::Other, Outcome::Other],
    )]);
    let mut d = Dispatcher::new(Arc::clone(&sender), &channels(&["a"]), Duration::ZERO);

    for _ in 0..3 {
        d.dispatch("msg").await;
    }
    assert!(d.state("a").unwrap().blacklisted);
}

#[tokio::test]
async fn a_broken_channel_does_not_block_the_rest() {
    let sender = ScriptedSender::new(vec![
        ("bad", vec![Outcome::Forbidden]),
        ("good", vec![]),
    ]);
    let mut d = Dispatcher::new(
        Arc::clone(&sender),
        &channels(&["bad", "good"]),
        Duration::ZERO,
    );

    d.dispatch("msg").await;
    d.dispatch("msg").await;

    assert_eq!(sender.attempts("good"), 2);
    assert!(!d.state("good").unwrap().blacklisted);
    assert!(d.state("bad").unwrap().blacklisted);
}
