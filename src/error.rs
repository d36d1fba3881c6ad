use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Malformed record at byte {offset}: {line:?}")]
    MalformedRecord { offset: u64, line: String },

    #[error("Chunk [{start}, {end}) ended with {leftover} bytes of an unterminated record")]
    Misaligned { start: u64, end: u64, leftover: usize },
}

impl Error {
    pub(crate) fn malformed(offset: u64, line: &[u8]) -> Self {
        Error::MalformedRecord {
            offset,
            line: String::from_utf8_lossy(line).into_owned(),
        }
    }
}
