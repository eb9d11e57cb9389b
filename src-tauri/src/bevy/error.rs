//! Errors raised while wiring the loaded model into the scene

/// The house model does not have the shape the car lookup expects
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("no child at index {index} (depth {depth}) on the path to the car")]
    MissingChild { depth: usize, index: usize },
    #[error("no node named {0:?} under the car's parent")]
    MissingNode(&'static str),
}
