use thiserror::Error;

/// Admission-time rejections, reported straight back to the caller
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdmissionError {
    #[error("Admission queue full (capacity {capacity})")]
    QueueFull { capacity: usize },

    #[error("Admission queue closed")]
    Closed,
}
