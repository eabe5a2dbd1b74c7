//! Training statistics tracking for DQN
//!
//! Tracks episode scores, lengths, rewards and fit losses with rolling
//! windows for smoothed readouts in the training HUD.

use std::collections::VecDeque;

/// Training statistics tracker with rolling averages
///
/// # Example
///
/// ```rust
/// use snake_dqn::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
/// stats.record_episode(12.0, 150, 5);
/// stats.record_loss(0.02);
///
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    /// Total episode rewards (rolling window)
    episode_rewards: VecDeque<f32>,

    /// Episode lengths in steps (rolling window)
    episode_lengths: VecDeque<usize>,

    /// Episode scores, final snake length (rolling window)
    episode_scores: VecDeque<usize>,

    /// Fit losses (rolling window)
    losses: VecDeque<f32>,

    /// Best score seen over the whole run
    max_score: usize,

    /// Total number of episodes completed
    total_episodes: usize,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Window size for rolling averages
    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker keeping the last `window_size` values per metric
    pub fn new(window_size: usize) -> Self {
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            losses: VecDeque::with_capacity(window_size),
            max_score: 0,
            total_episodes: 0,
            total_steps: 0,
            window_size,
        }
    }

    /// Record the completion of an episode
    ///
    /// `score` is the final snake length.
    pub fn record_episode(&mut self, reward: f32, length: usize, score: usize) {
        Self::push_deque(&mut self.episode_rewards, reward, self.window_size);
        Self::push_deque(&mut self.episode_lengths, length, self.window_size);
        Self::push_deque(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        if score > self.max_score {
            self.max_score = score;
        }
    }

    /// Record the loss of one fit
    pub fn record_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.losses, loss, self.window_size);
    }

    /// Mean episode reward over the rolling window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        Self::mean(&self.episode_rewards)
    }

    /// Mean episode length over the rolling window
    pub fn mean_episode_length(&self) -> f32 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f32 / self.episode_lengths.len() as f32
        }
    }

    /// Mean episode score over the rolling window
    pub fn mean_episode_score(&self) -> f32 {
        if self.episode_scores.is_empty() {
            0.0
        } else {
            self.episode_scores.iter().sum::<usize>() as f32 / self.episode_scores.len() as f32
        }
    }

    /// Mean fit loss over the rolling window, 0.0 when empty
    pub fn mean_loss(&self) -> f32 {
        Self::mean(&self.losses)
    }

    /// Best score seen over the whole run
    pub fn max_score(&self) -> usize {
        self.max_score
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Max: {} | Len: {:.1} | Loss: {:.4}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.max_score,
            self.mean_episode_length(),
            self.mean_loss(),
        )
    }

    fn mean(deque: &VecDeque<f32>) -> f32 {
        if deque.is_empty() {
            0.0
        } else {
            deque.iter().sum::<f32>() / deque.len() as f32
        }
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let stats = TrainingStats::new(100);
        assert_eq!(stats.window_size(), 100);
        assert_eq!(stats.total_episodes(), 0);
        assert_eq!(stats.total_steps(), 0);
        assert_eq!(stats.max_score(), 0);
    }

    #[test]
    fn test_record_episode() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(10.0, 50, 3);

        assert_eq!(stats.total_episodes(), 1);
        assert_eq!(stats.total_steps(), 50);
        assert!((stats.mean_episode_reward() - 10.0).abs() < 1e-5);
        assert!((stats.mean_episode_length() - 50.0).abs() < 1e-5);
        assert!((stats.mean_episode_score() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_score_never_decreases() {
        let mut stats = TrainingStats::new(3);
        stats.record_episode(0.0, 10, 7);
        stats.record_episode(0.0, 10, 4);

        assert_eq!(stats.max_score(), 7);

        stats.record_episode(0.0, 10, 9);
        assert_eq!(stats.max_score(), 9);
    }

    #[test]
    fn test_rolling_average() {
        let mut stats = TrainingStats::new(3);

        stats.record_episode(1.0, 10, 1);
        stats.record_episode(2.0, 20, 2);
        stats.record_episode(3.0, 30, 3);

        assert_eq!(stats.total_episodes(), 3);
        assert!((stats.mean_episode_reward() - 2.0).abs() < 1e-5);

        // A 4th episode evicts the first from the window
        stats.record_episode(4.0, 40, 4);

        assert_eq!(stats.total_episodes(), 4);
        assert!((stats.mean_episode_reward() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_loss_window() {
        let mut stats = TrainingStats::new(2);

        stats.record_loss(0.1);
        stats.record_loss(0.2);
        assert!((stats.mean_loss() - 0.15).abs() < 1e-5);

        stats.record_loss(0.3);
        assert!((stats.mean_loss() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_total_steps_accumulate() {
        let mut stats = TrainingStats::new(10);

        stats.record_episode(1.0, 10, 1);
        stats.record_episode(2.0, 20, 2);
        stats.record_episode(3.0, 30, 3);

        assert_eq!(stats.total_steps(), 60);
    }

    #[test]
    fn test_format_summary() {
        let mut stats = TrainingStats::new(100);
        stats.record_episode(15.5, 150, 5);
        stats.record_loss(0.02);

        let summary = stats.format_summary();
        assert!(summary.contains("Episodes: 1"));
        assert!(summary.contains("Steps: 150"));
        assert!(summary.contains("Reward: 15.50"));
        assert!(summary.contains("Score: 5.00"));
        assert!(summary.contains("Max: 5"));
        assert!(summary.contains("Loss: 0.0200"));
    }

    #[test]
    fn test_empty_stats() {
        let stats = TrainingStats::new(100);

        assert_eq!(stats.mean_episode_reward(), 0.0);
        assert_eq!(stats.mean_episode_length(), 0.0);
        assert_eq!(stats.mean_episode_score(), 0.0);
        assert_eq!(stats.mean_loss(), 0.0);
    }
}
