use std::fmt;

/// Failures surfaced by the rendering core.
///
/// Off-screen points are not errors: `draw_point` culls them silently.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// A pixel write or present happened before `clear` acquired a back buffer.
    UninitializedBuffer,
    FaceIndexOutOfRange {
        mesh: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    DegenerateViewport {
        width: usize,
        height: usize,
    },
    /// Camera position equals its target, so there is no view direction.
    DegenerateCamera,
    NonFiniteTransform {
        mesh: String,
    },
    InvalidConfig(String),
    SurfaceSizeMismatch {
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UninitializedBuffer => {
                write!(f, "back buffer used before clear() in this frame")
            }
            RenderError::FaceIndexOutOfRange {
                mesh,
                face,
                index,
                vertex_count,
            } => write!(
                f,
                "mesh '{}': face {} references vertex {} but only {} vertices exist",
                mesh, face, index, vertex_count
            ),
            RenderError::DegenerateViewport { width, height } => {
                write!(f, "degenerate viewport {}x{}", width, height)
            }
            RenderError::DegenerateCamera => {
                write!(f, "camera position and target coincide")
            }
            RenderError::NonFiniteTransform { mesh } => {
                write!(f, "mesh '{}': composed transform is not finite", mesh)
            }
            RenderError::InvalidConfig(msg) => write!(f, "invalid render config: {}", msg),
            RenderError::SurfaceSizeMismatch { expected, actual } => write!(
                f,
                "pixel buffer holds {} bytes, surface expects {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for RenderError {}
