use rand::seq::SliceRandom;
use std::collections::VecDeque;

use super::track::Track;

/// Pending tracks in play order.
///
/// The track that is currently playing is never stored here: the controller
/// pops the head before starting it, so index 0 is always the next track.
#[derive(Debug, Default, Clone)]
pub struct PlayQueue {
    tracks: VecDeque<Track>,
}

impl PlayQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn push_back(&mut self, track: Track) {
        self.tracks.push_back(track);
    }

    pub fn push_front(&mut self, track: Track) {
        self.tracks.push_front(track);
    }

    pub fn extend(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks.extend(tracks);
    }

    pub fn pop_front(&mut self) -> Option<Track> {
        self.tracks.pop_front()
    }

    /// Remove the entry at `index`; later entries shift down by one.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        self.tracks.remove(index)
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    pub fn shuffle(&mut self) {
        if self.tracks.len() > 1 {
            self.tracks.make_contiguous().shuffle(&mut rand::rng());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Owned copy for readers outside the session task.
    pub fn to_vec(&self) -> Vec<Track> {
        self.tracks.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn queue() -> PlayQueue {
        let mut queue = PlayQueue::new();
        queue.extend((1..=5).map(|i| Track::new(format!("ref-{i}"), &format!("Song {i}"), i * 60)));
        queue
    }

    fn titles(queue: &PlayQueue) -> Vec<String> {
        queue.iter().map(|t| t.title().to_string()).collect()
    }

    #[rstest]
    fn remove_shifts_later_entries(mut queue: PlayQueue) {
        let removed = queue.remove(1).map(|t| t.title().to_string());

        assert_eq!(removed.as_deref(), Some("Song 2"));
        assert_eq!(titles(&queue), vec!["Song 1", "Song 3", "Song 4", "Song 5"]);
    }

    #[rstest]
    fn remove_out_of_bounds_leaves_queue_alone(mut queue: PlayQueue) {
        assert!(queue.remove(5).is_none());
        assert_eq!(queue.len(), 5);
    }

    #[rstest]
    fn shuffle_keeps_the_same_tracks(mut queue: PlayQueue) {
        let mut before = titles(&queue);
        queue.shuffle();
        let mut after = titles(&queue);

        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn shuffle_of_single_entry_is_a_no_op() {
        let mut queue = PlayQueue::new();
        queue.push_back(Track::new("only", "Only", 1));
        queue.shuffle();
        assert_eq!(titles(&queue), vec!["Only"]);
    }

    #[rstest]
    fn push_front_becomes_next(mut queue: PlayQueue) {
        queue.push_front(Track::new("again", "Again", 3));
        assert_eq!(queue.pop_front().map(|t| t.title().to_string()).as_deref(), Some("Again"));
    }
}
