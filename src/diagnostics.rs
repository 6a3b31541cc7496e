//! Backend error collection.
//!
//! GPU errors are gathered with wgpu error scopes around a named
//! [`Checkpoint`] and handed back as plain values. Callers log them; nothing
//! in the frame loop branches on them.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Checkpoint {
    Setup,
    ShadowPass,
    LitPass,
}

impl fmt::Display for Checkpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Checkpoint::Setup => "setup",
            Checkpoint::ShadowPass => "shadow pass",
            Checkpoint::LitPass => "lit pass",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Validation,
    OutOfMemory,
    Internal,
}

impl ErrorCode {
    pub fn from_wgpu(err: &wgpu::Error) -> Self {
        match err {
            wgpu::Error::Validation { .. } => ErrorCode::Validation,
            wgpu::Error::OutOfMemory { .. } => ErrorCode::OutOfMemory,
            _ => ErrorCode::Internal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendError {
    pub code: ErrorCode,
    pub checkpoint: Checkpoint,
    pub message: String,
}

impl BackendError {
    pub fn new(code: ErrorCode, checkpoint: Checkpoint, message: impl Into<String>) -> Self {
        Self {
            code,
            checkpoint,
            message: message.into(),
        }
    }

    pub fn from_wgpu(err: &wgpu::Error, checkpoint: Checkpoint) -> Self {
        Self::new(ErrorCode::from_wgpu(err), checkpoint, err.to_string())
    }
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.code, self.checkpoint, self.message)
    }
}

/// Open error scopes on `device` until [`ErrorProbe::finish`]. Scopes nest,
/// so probes must finish in reverse order of `begin`.
#[must_use = "an unfinished probe leaves error scopes pushed on the device"]
pub struct ErrorProbe<'d> {
    device: &'d wgpu::Device,
    checkpoint: Checkpoint,
}

impl<'d> ErrorProbe<'d> {
    pub fn begin(device: &'d wgpu::Device, checkpoint: Checkpoint) -> Self {
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        Self { device, checkpoint }
    }

    /// Pop both scopes and return whatever they caught, validation first.
    pub fn finish(self) -> Vec<BackendError> {
        let validation = pollster::block_on(self.device.pop_error_scope());
        let oom = pollster::block_on(self.device.pop_error_scope());
        [validation, oom]
            .into_iter()
            .flatten()
            .map(|err| BackendError::from_wgpu(&err, self.checkpoint))
            .collect()
    }
}

pub fn log_errors(errors: &[BackendError]) {
    for err in errors {
        match err.code {
            ErrorCode::OutOfMemory => log::error!("backend error: {err}"),
            _ => log::warn!("backend error: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_code_and_checkpoint() {
        let err = BackendError::new(ErrorCode::Validation, Checkpoint::ShadowPass, "bad binding");
        assert_eq!(err.to_string(), "Validation at shadow pass: bad binding");
    }
}
