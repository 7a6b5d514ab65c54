use thiserror::Error;

pub type Result<T> = std::result::Result<T, SequenceError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Unable to reference the element from an empty stack")]
    EmptyAccess,
    #[error("Index {index} is out of range for a stack of {len} elements")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Unable to reserve {requested} slots")]
    CapacityOverflow { requested: usize },
}
