//! Experience replay for the DQN agent
//!
//! Transitions are kept in a bounded FIFO buffer and sampled uniformly
//! without replacement for minibatch updates.

use rand::seq::index::sample;
use std::collections::VecDeque;

/// A single experience tuple (s, a, r, s', done)
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: Vec<f32>,
    pub action: usize,
    pub reward: f32,
    pub next_state: Vec<f32>,
    pub done: bool,
}

/// Fixed-capacity replay buffer with FIFO eviction
///
/// Once a transition is pushed it is owned by the buffer and never mutated.
/// `sample` requires `batch_size <= len`; callers guard with `is_ready`.
pub struct ReplayMemory {
    buffer: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a transition, evicting the oldest when at capacity
    pub fn push(&mut self, transition: Transition) {
        if self.buffer.len() == self.capacity {
            self.buffer.pop_front();
        }
        self.buffer.push_back(transition);
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether a minibatch of the given size can be drawn
    pub fn is_ready(&self, batch_size: usize) -> bool {
        self.buffer.len() >= batch_size
    }

    /// Iterate over the stored transitions, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.buffer.iter()
    }

    /// Draw `batch_size` transitions uniformly without replacement
    pub fn sample(&self, batch_size: usize) -> Vec<Transition> {
        debug_assert!(batch_size <= self.buffer.len());
        let mut rng = rand::thread_rng();
        sample(&mut rng, self.buffer.len(), batch_size)
            .into_iter()
            .map(|i| self.buffer[i].clone())
            .collect()
    }
}
