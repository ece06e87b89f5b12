//! Sequential binary stream used by component and scene serialization
//!
//! Values are bincode encoded back to back with no framing, little endian
//! with fixed width integers: booleans as one byte, strings as a `u64` byte
//! length followed by UTF-8.

use bincode::config::{self, Config};
use bincode::error::{DecodeError, EncodeError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Upper bound for a single string payload
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Errors that can occur while reading or writing a stream
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("string payload of {0} bytes exceeds the stream limit")]
    StringTooLong(usize),
    #[error("payload exceeds the stream limit")]
    LimitExceeded,
    #[error("encode error: {0}")]
    Encode(#[from] EncodeError),
    #[error("decode error: {0}")]
    Decode(DecodeError),
}

impl From<DecodeError> for StreamError {
    fn from(e: DecodeError) -> Self {
        match e {
            DecodeError::Io { inner, .. } => StreamError::Io(inner),
            DecodeError::UnexpectedEnd { .. } => {
                StreamError::Io(io::ErrorKind::UnexpectedEof.into())
            }
            DecodeError::LimitExceeded => StreamError::LimitExceeded,
            DecodeError::Utf8 { .. } => StreamError::InvalidUtf8,
            other => StreamError::Decode(other),
        }
    }
}

fn config() -> impl Config {
    config::standard()
        .with_little_endian()
        .with_fixed_int_encoding()
        .with_limit::<MAX_STRING_LEN>()
}

/// Write half of a stream
pub struct StreamWriter<W: Write> {
    inner: W,
}

impl<W: Write> StreamWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn write<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), StreamError> {
        bincode::serde::encode_into_std_write(value, &mut self.inner, config())?;
        Ok(())
    }

    /// Write a borrowed string, refusing payloads the read side would reject
    pub fn write_str(&mut self, value: &str) -> Result<(), StreamError> {
        if value.len() > MAX_STRING_LEN {
            return Err(StreamError::StringTooLong(value.len()));
        }
        self.write(value)
    }

    pub fn flush(&mut self) -> Result<(), StreamError> {
        self.inner.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Read half of a stream
pub struct StreamReader<R: Read> {
    inner: R,
}

impl<R: Read> StreamReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn read<T: DeserializeOwned>(&mut self) -> Result<T, StreamError> {
        Ok(bincode::serde::decode_from_std_read(&mut self.inner, config())?)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// File backed streams
pub struct FileStream;

impl FileStream {
    /// Create (or truncate) a file for writing
    pub fn create<P: AsRef<Path>>(path: P) -> Result<StreamWriter<BufWriter<File>>, StreamError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        debug!(path = ?path, "Opening stream for writing");
        Ok(StreamWriter::new(BufWriter::new(File::create(path)?)))
    }

    /// Open an existing file for reading
    pub fn open<P: AsRef<Path>>(path: P) -> Result<StreamReader<BufReader<File>>, StreamError> {
        let path = path.as_ref();
        debug!(path = ?path, "Opening stream for reading");
        Ok(StreamReader::new(BufReader::new(File::open(path)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_bool_is_single_byte() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write(&true).unwrap();
        writer.write(&false).unwrap();
        assert_eq!(writer.into_inner(), vec![1, 0]);
    }

    #[test]
    fn test_string_layout() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write_str("N/A").unwrap();
        assert_eq!(
            writer.into_inner(),
            vec![3, 0, 0, 0, 0, 0, 0, 0, b'N', b'/', b'A']
        );
    }

    #[test]
    fn test_mixed_sequence() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write(&7u32).unwrap();
        writer.write(&[1.0f32, 2.0, 3.0]).unwrap();
        writer.write(&"Standard".to_string()).unwrap();

        let mut reader = StreamReader::new(Cursor::new(writer.into_inner()));
        assert_eq!(reader.read::<u32>().unwrap(), 7);
        assert_eq!(reader.read::<[f32; 3]>().unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(reader.read::<String>().unwrap(), "Standard");
    }

    #[test]
    fn test_u32_is_fixed_width() {
        let mut writer = StreamWriter::new(Vec::new());
        writer.write(&7u32).unwrap();
        writer.write(&1.5f32).unwrap();
        let bytes = writer.into_inner();
        assert_eq!(&bytes[..4], &[7, 0, 0, 0]);
        assert_eq!(&bytes[4..], &1.5f32.to_le_bytes());
    }

    #[test]
    fn test_write_str_rejects_oversized_payload() {
        let big = "x".repeat(MAX_STRING_LEN + 1);
        let mut writer = StreamWriter::new(Vec::new());
        assert!(matches!(
            writer.write_str(&big),
            Err(StreamError::StringTooLong(_))
        ));
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_read_past_end() {
        let mut reader = StreamReader::new(Cursor::new(vec![1u8]));
        assert!(reader.read::<bool>().unwrap());
        match reader.read::<u32>() {
            Err(StreamError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
            other => panic!("expected EOF, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_oversized_string_header() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&(MAX_STRING_LEN as u64 + 1).to_le_bytes());
        let mut reader = StreamReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read::<String>(),
            Err(StreamError::LimitExceeded)
        ));
    }

    #[test]
    fn test_rejects_invalid_utf8() {
        let bytes = vec![2, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xfe];
        let mut reader = StreamReader::new(Cursor::new(bytes));
        assert!(matches!(
            reader.read::<String>(),
            Err(StreamError::InvalidUtf8)
        ));
    }

    #[test]
    fn test_file_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("data.bin");

        let mut writer = FileStream::create(&path).unwrap();
        writer.write(&true).unwrap();
        writer.write_str("brick").unwrap();
        writer.flush().unwrap();
        drop(writer);

        let mut reader = FileStream::open(&path).unwrap();
        assert!(reader.read::<bool>().unwrap());
        assert_eq!(reader.read::<String>().unwrap(), "brick");
    }
}
