use glam::Vec3;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("sword_count must be at least 1")]
    EmptySwarm,

    #[error("spring must be in (0, 1], got {0}")]
    Spring(f32),

    #[error("damping must be in [0, 1), got {0}")]
    Damping(f32),

    #[error("time_step must be a positive number of seconds, got {0}")]
    TimeStep(f32),

    #[error("spawn_extent must be finite and non-negative, got {0}")]
    SpawnExtent(Vec3),
}
