use thiserror::Error;

/// Conditions that stop the yard from ever opening. Nothing is retried.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("no drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}

/// A frame that could not be presented. The loop logs it and moves on.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("surface lost")]
    Lost,
    #[error("surface outdated")]
    Outdated,
    #[error("timed out acquiring the next frame")]
    Timeout,
    #[error("GPU out of memory")]
    OutOfMemory,
    #[error("surface error: {0}")]
    Other(wgpu::SurfaceError),
}

impl FrameError {
    /// Lost and outdated surfaces are expected around resizes.
    pub fn is_transient(&self) -> bool {
        matches!(self, FrameError::Lost | FrameError::Outdated)
    }
}

impl From<wgpu::SurfaceError> for FrameError {
    fn from(err: wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost => FrameError::Lost,
            wgpu::SurfaceError::Outdated => FrameError::Outdated,
            wgpu::SurfaceError::Timeout => FrameError::Timeout,
            wgpu::SurfaceError::OutOfMemory => FrameError::OutOfMemory,
            other => FrameError::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_map_to_frame_errors() {
        assert!(matches!(FrameError::from(wgpu::SurfaceError::Lost), FrameError::Lost));
        assert!(matches!(
            FrameError::from(wgpu::SurfaceError::Timeout),
            FrameError::Timeout
        ));
        assert!(FrameError::from(wgpu::SurfaceError::Outdated).is_transient());
        assert!(!FrameError::OutOfMemory.is_transient());
    }
}
