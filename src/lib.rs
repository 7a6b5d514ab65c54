pub mod command;
pub mod driver;
pub mod error;
pub mod iter;
pub mod sequence;

pub use error::{Result, SequenceError};
pub use iter::{IntoIter, Iter, IterMut};
pub use sequence::GrowableSequence;
