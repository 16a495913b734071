use std::error::Error;
use std::fmt;

/// Failures while creating the window and render context.
#[derive(Debug)]
pub enum SetupError {
    /// The OS refused to create a window.
    Window(winit::error::OsError),
    /// The window could not back a wgpu surface.
    Surface(wgpu::CreateSurfaceError),
    /// No adapter can present to the window's surface.
    NoAdapter,
    /// The adapter refused to create a device.
    Device(wgpu::RequestDeviceError),
    /// The surface has no configuration usable with the adapter.
    SurfaceUnsupported,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(e) => write!(f, "window creation failed: {e}"),
            Self::Surface(e) => write!(f, "surface creation failed: {e}"),
            Self::NoAdapter => write!(f, "no GPU adapter compatible with the window surface"),
            Self::Device(e) => write!(f, "device request failed: {e}"),
            Self::SurfaceUnsupported => write!(f, "surface not supported by adapter"),
        }
    }
}

impl Error for SetupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Window(e) => Some(e),
            Self::Surface(e) => Some(e),
            Self::Device(e) => Some(e),
            Self::NoAdapter | Self::SurfaceUnsupported => None,
        }
    }
}

impl From<winit::error::OsError> for SetupError {
    fn from(e: winit::error::OsError) -> Self {
        Self::Window(e)
    }
}

impl From<wgpu::CreateSurfaceError> for SetupError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        Self::Surface(e)
    }
}

impl From<wgpu::RequestDeviceError> for SetupError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        Self::Device(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_missing_piece() {
        assert_eq!(
            SetupError::NoAdapter.to_string(),
            "no GPU adapter compatible with the window surface"
        );
        assert!(SetupError::SurfaceUnsupported.source().is_none());
    }
}
