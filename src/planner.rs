use std::io::SeekFrom;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

use crate::{error::Result, parser::MAX_STATION_LEN, temperature::MAX_TEMPERATURE_LEN};

/// Longest legal record including its separator and terminator.
pub const MAX_RECORD_LEN: usize = MAX_STATION_LEN + 1 + MAX_TEMPERATURE_LEN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkRange {
    pub start: u64,
    pub end: u64,
}

impl ChunkRange {
    pub(crate) fn len(&self) -> u64 {
        self.end - self.start
    }
}

/// Splits `[0, size)` into at most `workers` contiguous ranges that each
/// begin at the start of a record.
///
/// Every interior boundary is placed just past the first line terminator
/// found in a [`MAX_RECORD_LEN`] window read at `previous + ceil(size /
/// workers)`. A window without a terminator ends planning: the rest of the
/// input becomes the last range. An empty input yields the single range
/// `[0, 0)`.
pub async fn plan_chunks<R>(reader: &mut R, size: u64, workers: usize) -> Result<Vec<ChunkRange>>
where
    R: AsyncRead + AsyncSeek + Unpin,
{
    let workers = workers.max(1) as u64;
    let target = size.div_ceil(workers).max(1);

    let mut ranges = Vec::with_capacity(size.div_ceil(target).clamp(1, workers) as usize);
    let mut window = Vec::with_capacity(MAX_RECORD_LEN);
    let mut start = 0;
    loop {
        let candidate = start + target;
        if candidate >= size {
            ranges.push(ChunkRange { start, end: size });
            break;
        }

        reader.seek(SeekFrom::Start(candidate)).await?;
        window.clear();
        (&mut *reader)
            .take(MAX_RECORD_LEN as u64)
            .read_to_end(&mut window)
            .await?;

        let end = match memchr::memchr(b'\n', &window) {
            Some(index) => u64::min(candidate + index as u64 + 1, size),
            None => size,
        };
        ranges.push(ChunkRange { start, end });
        if end == size {
            break;
        }
        start = end;
    }

    Ok(ranges)
}
