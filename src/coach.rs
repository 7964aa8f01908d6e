// Transient advisory messages ("thought bubbles"). Nothing here affects the game.

use std::time::Duration;

use instant::Instant;


pub const DEFAULT_MAX_MESSAGES: usize = 3;
pub const DEFAULT_MESSAGE_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CoachMessage {
    pub text: String,
    pub shown_at: Instant,
}

#[derive(Clone, Debug)]
pub struct CoachFeedbackQueue {
    max_messages: usize,
    lifetime: Duration,
    messages: Vec<CoachMessage>,
}

impl CoachFeedbackQueue {
    pub fn new(max_messages: usize, lifetime: Duration) -> Self {
        CoachFeedbackQueue { max_messages, lifetime, messages: Vec::new() }
    }

    // Replaces whatever is on display with the head of `batch`.
    pub fn show_batch(&mut self, batch: impl IntoIterator<Item = String>, now: Instant) {
        self.messages = batch
            .into_iter()
            .take(self.max_messages)
            .map(|text| CoachMessage { text, shown_at: now })
            .collect();
    }

    pub fn clear(&mut self) { self.messages.clear(); }

    // Drops messages that have been on display for `lifetime` or longer.
    pub fn refresh(&mut self, now: Instant) {
        let lifetime = self.lifetime;
        self.messages.retain(|m| now.saturating_duration_since(m.shown_at) < lifetime);
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> { self.messages.iter().map(|m| m.text.as_str()) }
    pub fn is_empty(&self) -> bool { self.messages.is_empty() }
}

impl Default for CoachFeedbackQueue {
    fn default() -> Self { Self::new(DEFAULT_MAX_MESSAGES, DEFAULT_MESSAGE_LIFETIME) }
}


#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn strings(v: &[&str]) -> Vec<String> { v.iter().map(|s| s.to_string()).collect() }

    #[test]
    fn messages_expire() {
        let t0 = Instant::now();
        let mut queue = CoachFeedbackQueue::default();
        queue.show_batch(strings(&["a", "b", "c"]), t0);
        queue.refresh(t0 + Duration::from_millis(4999));
        assert_eq!(queue.texts().collect_vec(), ["a", "b", "c"]);
        queue.refresh(t0 + Duration::from_secs(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn new_batch_replaces_display() {
        let t0 = Instant::now();
        let mut queue = CoachFeedbackQueue::default();
        queue.show_batch(strings(&["a", "b", "c"]), t0);
        let t1 = t0 + Duration::from_secs(2);
        queue.show_batch(strings(&["d", "e", "f", "g"]), t1);
        assert_eq!(queue.texts().collect_vec(), ["d", "e", "f"]);
        // Old messages would have expired by now, the new ones have not.
        queue.refresh(t0 + Duration::from_secs(6));
        assert_eq!(queue.texts().collect_vec(), ["d", "e", "f"]);
        queue.refresh(t1 + Duration::from_secs(5));
        assert!(queue.is_empty());
    }

    #[test]
    fn empty_batch_clears() {
        let t0 = Instant::now();
        let mut queue = CoachFeedbackQueue::default();
        queue.show_batch(strings(&["a"]), t0);
        queue.show_batch(Vec::new(), t0);
        assert!(queue.is_empty());
    }
}
