/// Failures that abort startup before the frame loop is entered.
///
/// Backend details are carried as strings so this crate stays free of the
/// window, GPU and asset crates.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to create window: {0}")]
    Window(String),

    #[error("failed to create rendering surface: {0}")]
    Surface(String),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to acquire GPU device: {0}")]
    Device(String),

    #[error("failed to load model {path}: {reason}")]
    Model { path: String, reason: String },

    #[error("shadow map target could not be allocated: {0}")]
    ShadowTarget(String),
}
