use anyhow::{anyhow, Result};
use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::backend::Autodiff;
use clap::{Parser, ValueEnum};

use snake_dqn::game::GameConfig;
use snake_dqn::modes::{HumanMode, TrainMode};
use snake_dqn::rl::{
    AgentConfig, DqnAgent, Environment, GridEnvironment, QFunction, QNetworkConfig,
    SnakeEnvironment, UpdateMode,
};

type TrainBackend = Autodiff<NdArray<f32>>;

#[derive(Parser)]
#[command(name = "snake-dqn")]
#[command(version, about = "Snake trained with deep Q-learning in the terminal")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "50")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "20")]
    height: usize,

    /// Observation encoding for training
    #[arg(long, default_value = "compact")]
    encoding: Encoding,

    /// Replay memory capacity
    #[arg(long, default_value = "10000")]
    capacity: usize,

    /// Minibatch size for replay updates
    #[arg(long, default_value = "64")]
    batch_size: usize,

    /// Discount factor
    #[arg(long, default_value = "0.95")]
    gamma: f32,

    /// Adam learning rate
    #[arg(long, default_value = "0.001")]
    learning_rate: f64,

    /// Initial exploration rate
    #[arg(long, default_value = "1.0")]
    epsilon: f32,

    /// Per-episode multiplicative epsilon decay
    #[arg(long, default_value = "0.995")]
    epsilon_decay: f32,

    /// Exploration floor
    #[arg(long, default_value = "0.001")]
    epsilon_min: f32,

    /// Episodes between target-network syncs
    #[arg(long, default_value = "10")]
    sync_interval: u32,

    /// Which fits run each step
    #[arg(long, default_value = "batch")]
    update_mode: UpdateModeArg,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train the DQN agent with a live view of the game
    Train,
    /// Play snake with keyboard controls
    Human,
}

#[derive(Clone, ValueEnum)]
enum Encoding {
    /// 11-feature danger/heading/apple encoding, relative-turn actions
    Compact,
    /// Full-grid cell codes, absolute-direction actions
    Grid,
}

#[derive(Clone, ValueEnum)]
enum UpdateModeArg {
    Step,
    Batch,
    Both,
}

impl From<UpdateModeArg> for UpdateMode {
    fn from(arg: UpdateModeArg) -> Self {
        match arg {
            UpdateModeArg::Step => UpdateMode::Step,
            UpdateModeArg::Batch => UpdateMode::Batch,
            UpdateModeArg::Both => UpdateMode::Both,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let game_config = GameConfig::new(cli.width, cli.height);
    game_config.validate().map_err(|e| anyhow!(e))?;

    match cli.mode {
        Mode::Train => {
            let agent_config = AgentConfig {
                memory_capacity: cli.capacity,
                batch_size: cli.batch_size,
                gamma: cli.gamma,
                learning_rate: cli.learning_rate,
                epsilon: cli.epsilon,
                epsilon_decay: cli.epsilon_decay,
                epsilon_min: cli.epsilon_min,
                sync_interval: cli.sync_interval,
                update_mode: cli.update_mode.clone().into(),
            };

            match cli.encoding {
                Encoding::Compact => {
                    run_training(SnakeEnvironment::new(game_config), agent_config).await
                }
                Encoding::Grid => {
                    run_training(GridEnvironment::new(game_config), agent_config).await
                }
            }
        }
        Mode::Human => {
            let mut human_mode = HumanMode::new(game_config);
            human_mode.run().await
        }
    }
}

async fn run_training<E: Environment>(env: E, agent_config: AgentConfig) -> Result<()> {
    let device = NdArrayDevice::default();
    let network_config = QNetworkConfig::new(env.observation_len(), env.action_count());

    let online =
        QFunction::<TrainBackend>::new(&network_config, agent_config.learning_rate, device.clone());
    let target =
        QFunction::<TrainBackend>::new(&network_config, agent_config.learning_rate, device);

    let agent = DqnAgent::new(online, target, agent_config);
    let mut train_mode = TrainMode::new(env, agent);
    train_mode.run().await
}
