use std::path::PathBuf;

/// Tokio's MAX_BUF for blocking file IO: https://github.com/tokio-rs/tokio/blob/master/tokio/src/io/blocking.rs#L26
pub const DEFAULT_BUFFER_SIZE: usize = 2 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub path: PathBuf,
    pub workers: usize,
    pub buffer_size: usize,
}

impl Config {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            workers: num_cpus::get().max(1),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }
}
