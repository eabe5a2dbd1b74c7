//! DQN agent
//!
//! Epsilon-greedy action selection over an online Q-function, with a frozen
//! target network supplying bootstrap values. Transitions flow into replay
//! memory; each step optionally fits on the fresh transition, a replay
//! minibatch, or both.

use super::approximator::Approximator;
use super::config::{AgentConfig, UpdateMode};
use super::memory::{ReplayMemory, Transition};
use anyhow::Result;
use rand::Rng;

/// Value-based agent with target network and experience replay
pub struct DqnAgent<A: Approximator> {
    /// Q-function updated every fit
    online: A,

    /// Frozen copy providing bootstrap targets, refreshed periodically
    target: A,

    /// Experience replay buffer
    memory: ReplayMemory,

    /// Hyperparameters
    config: AgentConfig,

    /// Current exploration rate
    epsilon: f32,

    /// Completed episodes
    episodes: u32,

    /// Loss of the most recent fit, if any
    last_loss: Option<f32>,
}

impl<A: Approximator> DqnAgent<A> {
    /// Create a new agent
    ///
    /// The target network is immediately synced to the online network so
    /// both start from identical parameters.
    pub fn new(online: A, mut target: A, config: AgentConfig) -> Self {
        config.validate().expect("Invalid DQN configuration");
        target.sync_from(&online);

        let epsilon = config.epsilon;
        let memory = ReplayMemory::new(config.memory_capacity);
        Self {
            online,
            target,
            memory,
            config,
            epsilon,
            episodes: 0,
            last_loss: None,
        }
    }

    /// Pick an action for the given observation
    ///
    /// With probability epsilon a uniformly random action is taken;
    /// otherwise the action with the highest online Q-value. Ties go to
    /// the lowest index.
    pub fn select_action(&mut self, state: &[f32]) -> usize {
        let num_actions = self.online.num_actions();
        let mut rng = rand::thread_rng();

        if rng.gen::<f32>() < self.epsilon {
            return rng.gen_range(0..num_actions);
        }

        let q = &self.online.predict(&[state.to_vec()])[0];
        let mut best = 0;
        for (index, &value) in q.iter().enumerate() {
            if value > q[best] {
                best = index;
            }
        }
        best
    }

    /// Store a transition and run the fits the update mode calls for
    pub fn update(&mut self, transition: Transition) -> Result<()> {
        self.memory.push(transition.clone());

        match self.config.update_mode {
            UpdateMode::Step => {
                let loss = self.learn_step(&transition)?;
                self.last_loss = Some(loss);
            }
            UpdateMode::Batch => {
                if let Some(loss) = self.replay()? {
                    self.last_loss = Some(loss);
                }
            }
            UpdateMode::Both => {
                let loss = self.learn_step(&transition)?;
                self.last_loss = Some(loss);
                if let Some(loss) = self.replay()? {
                    self.last_loss = Some(loss);
                }
            }
        }

        Ok(())
    }

    /// Close out an episode: decay epsilon and sync the target network on
    /// schedule
    pub fn end_episode(&mut self) {
        self.episodes += 1;
        self.epsilon = (self.epsilon * self.config.epsilon_decay).max(self.config.epsilon_min);

        if self.episodes % self.config.sync_interval == 0 {
            self.target.sync_from(&self.online);
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    pub fn memory_len(&self) -> usize {
        self.memory.len()
    }

    pub fn last_loss(&self) -> Option<f32> {
        self.last_loss
    }

    /// One fit on the fresh transition alone
    fn learn_step(&mut self, transition: &Transition) -> Result<f32> {
        let states = vec![transition.state.clone()];
        let mut target_row = self.online.predict(&states)[0].clone();
        let next_q = self.target.predict(&[transition.next_state.clone()]);
        target_row[transition.action] = self.target_value(transition, &next_q[0]);

        self.online.fit(&states, &[target_row])
    }

    /// One minibatch fit sampled from replay memory
    ///
    /// Returns `None` without fitting while the buffer holds fewer than
    /// `batch_size` transitions. The cost is amortized: one online predict
    /// covers every state and one target predict covers every next state,
    /// then the terminal/bootstrap rule is applied row by row.
    fn replay(&mut self) -> Result<Option<f32>> {
        if !self.memory.is_ready(self.config.batch_size) {
            return Ok(None);
        }

        let batch = self.memory.sample(self.config.batch_size);
        let states: Vec<Vec<f32>> = batch.iter().map(|t| t.state.clone()).collect();
        let next_states: Vec<Vec<f32>> = batch.iter().map(|t| t.next_state.clone()).collect();

        let mut targets = self.online.predict(&states);
        let next_q = self.target.predict(&next_states);
        for (row, (transition, next)) in targets.iter_mut().zip(batch.iter().zip(&next_q)) {
            row[transition.action] = self.target_value(transition, next);
        }

        self.online.fit(&states, &targets).map(Some)
    }

    /// Bootstrapped TD target for one transition
    ///
    /// `r` when the transition is terminal, otherwise
    /// `r + gamma * max(next_q)`, where `next_q` is the target network's
    /// Q-row for the next state.
    fn target_value(&self, transition: &Transition, next_q: &[f32]) -> f32 {
        if transition.done {
            return transition.reward;
        }

        let max_next = next_q.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        transition.reward + self.config.gamma * max_next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Test double returning a fixed Q-row for every state and recording
    /// every fit and the batch size of every predict.
    struct FakeApproximator {
        q: Vec<f32>,
        fits: Vec<(Vec<Vec<f32>>, Vec<Vec<f32>>)>,
        predict_batches: RefCell<Vec<usize>>,
        sync_count: usize,
    }

    impl FakeApproximator {
        fn with_q(q: Vec<f32>) -> Self {
            Self {
                q,
                fits: Vec::new(),
                predict_batches: RefCell::new(Vec::new()),
                sync_count: 0,
            }
        }
    }

    impl Approximator for FakeApproximator {
        fn num_actions(&self) -> usize {
            self.q.len()
        }

        fn predict(&self, states: &[Vec<f32>]) -> Vec<Vec<f32>> {
            self.predict_batches.borrow_mut().push(states.len());
            states.iter().map(|_| self.q.clone()).collect()
        }

        fn fit(&mut self, states: &[Vec<f32>], targets: &[Vec<f32>]) -> Result<f32> {
            self.fits.push((states.to_vec(), targets.to_vec()));
            Ok(0.25)
        }

        fn sync_from(&mut self, source: &Self) {
            self.q = source.q.clone();
            self.sync_count += 1;
        }
    }

    fn agent_with(config: AgentConfig, q: Vec<f32>) -> DqnAgent<FakeApproximator> {
        DqnAgent::new(
            FakeApproximator::with_q(q.clone()),
            FakeApproximator::with_q(q),
            config,
        )
    }

    fn transition(action: usize, reward: f32, done: bool) -> Transition {
        Transition {
            state: vec![0.0; 11],
            action,
            reward,
            next_state: vec![1.0; 11],
            done,
        }
    }

    #[test]
    #[should_panic(expected = "Invalid DQN configuration")]
    fn test_new_rejects_invalid_config() {
        let config = AgentConfig {
            gamma: 1.5,
            ..Default::default()
        };
        agent_with(config, vec![0.0; 3]);
    }

    #[test]
    fn test_greedy_action_is_argmax() {
        let config = AgentConfig {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![1.0, 5.0, 3.0]);

        assert_eq!(agent.select_action(&[0.0; 11]), 1);
    }

    #[test]
    fn test_greedy_tie_goes_to_lowest_index() {
        let config = AgentConfig {
            epsilon: 0.0,
            epsilon_min: 0.0,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![1.0, 3.0, 3.0]);

        assert_eq!(agent.select_action(&[0.0; 11]), 1);
    }

    #[test]
    fn test_exploring_action_stays_in_range() {
        let config = AgentConfig {
            epsilon: 1.0,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0, 0.0, 0.0]);

        for _ in 0..100 {
            assert!(agent.select_action(&[0.0; 11]) < 3);
        }
    }

    #[test]
    fn test_epsilon_decays_to_floor() {
        let config = AgentConfig {
            epsilon: 1.0,
            epsilon_decay: 0.5,
            epsilon_min: 0.1,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0; 3]);

        let mut previous = agent.epsilon();
        for _ in 0..10 {
            agent.end_episode();
            assert!(agent.epsilon() <= previous);
            assert!(agent.epsilon() >= 0.1);
            previous = agent.epsilon();
        }
        assert_eq!(agent.epsilon(), 0.1);
    }

    #[test]
    fn test_step_update_builds_td_target() {
        let config = AgentConfig {
            gamma: 0.95,
            update_mode: UpdateMode::Step,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![1.0, 2.0, 3.0]);

        agent.update(transition(1, 2.0, false)).unwrap();

        let (states, targets) = &agent.online.fits[0];
        assert_eq!(states.len(), 1);
        // Max target-net Q over s' is 3.0, so the action entry becomes
        // 2.0 + 0.95 * 3.0; the other entries keep the online prediction.
        assert_eq!(targets[0], vec![1.0, 2.0 + 0.95 * 3.0, 3.0]);
    }

    #[test]
    fn test_terminal_target_is_raw_reward() {
        let config = AgentConfig {
            gamma: 0.95,
            update_mode: UpdateMode::Step,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![1.0, 2.0, 3.0]);

        agent.update(transition(2, -20.0, true)).unwrap();

        let (_, targets) = &agent.online.fits[0];
        assert_eq!(targets[0], vec![1.0, 2.0, -20.0]);
    }

    #[test]
    fn test_batch_update_waits_for_replay_memory() {
        let config = AgentConfig {
            batch_size: 4,
            update_mode: UpdateMode::Batch,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0; 3]);

        for _ in 0..3 {
            agent.update(transition(0, 1.0, false)).unwrap();
        }
        assert!(agent.online.fits.is_empty());
        assert!(agent.last_loss().is_none());

        agent.update(transition(0, 1.0, false)).unwrap();
        assert_eq!(agent.online.fits.len(), 1);
        assert_eq!(agent.online.fits[0].0.len(), 4);
        assert_eq!(agent.last_loss(), Some(0.25));
    }

    #[test]
    fn test_replay_predicts_whole_batch_at_once() {
        let config = AgentConfig {
            batch_size: 8,
            update_mode: UpdateMode::Batch,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0; 3]);

        for i in 0..8 {
            // A terminal row in the batch must not trigger extra predicts
            agent.update(transition(0, 1.0, i == 3)).unwrap();
        }

        // The 8th update triggers the first replay: one online predict for
        // the states and one target predict for the next states, each
        // carrying the full minibatch.
        assert_eq!(*agent.online.predict_batches.borrow(), vec![8]);
        assert_eq!(*agent.target.predict_batches.borrow(), vec![8]);
        assert_eq!(agent.online.fits.len(), 1);
    }

    #[test]
    fn test_both_mode_runs_two_fits_when_ready() {
        let config = AgentConfig {
            batch_size: 2,
            update_mode: UpdateMode::Both,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0; 3]);

        agent.update(transition(0, 1.0, false)).unwrap();
        assert_eq!(agent.online.fits.len(), 1); // step fit only, replay not ready

        agent.update(transition(0, 1.0, false)).unwrap();
        assert_eq!(agent.online.fits.len(), 3); // step fit + minibatch fit
    }

    #[test]
    fn test_target_sync_interval() {
        let config = AgentConfig {
            sync_interval: 3,
            ..Default::default()
        };
        let mut agent = agent_with(config, vec![0.0; 3]);
        let syncs_at_start = agent.target.sync_count;

        agent.end_episode();
        agent.end_episode();
        assert_eq!(agent.target.sync_count, syncs_at_start);

        agent.end_episode();
        assert_eq!(agent.target.sync_count, syncs_at_start + 1);
    }

    #[test]
    fn test_transitions_accumulate_in_memory() {
        let mut agent = agent_with(AgentConfig::default(), vec![0.0; 3]);

        for _ in 0..5 {
            agent.update(transition(0, 0.0, false)).unwrap();
        }
        assert_eq!(agent.memory_len(), 5);
    }
}
