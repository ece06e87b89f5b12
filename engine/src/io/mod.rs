//! Input/Output module for binary component and scene streams

mod stream;

pub use stream::{FileStream, StreamError, StreamReader, StreamWriter, MAX_STRING_LEN};
