use std::{io::SeekFrom, path::Path};

use bytes::{Bytes, BytesMut};
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncReadExt, AsyncSeekExt},
};
use tokio_stream::StreamExt;
use tokio_util::codec::{Decoder, FramedRead};
use tracing::debug;

use crate::{
    error::{Error, Result},
    map::AggregateTable,
    parser::parse_lines,
    planner::ChunkRange,
};

#[derive(Debug)]
pub struct Block {
    pub offset: u64,
    pub lines: Bytes,
}

// Leftover after the last '\n' stays in the buffer until the next read.
pub struct LineDecoder {
    range: ChunkRange,
    position: u64,
    accept_tail: bool,
}

impl LineDecoder {
    pub fn new(range: ChunkRange, accept_tail: bool) -> Self {
        Self {
            range,
            position: range.start,
            accept_tail,
        }
    }

    fn take(&mut self, src: &mut BytesMut, len: usize) -> Block {
        let offset = self.position;
        let lines = src.split_to(len).freeze();
        self.position += lines.len() as u64;
        Block { offset, lines }
    }
}

impl Decoder for LineDecoder {
    type Item = Block;
    type Error = Error;

    #[inline]
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        match memchr::memrchr(b'\n', src) {
            Some(index) => Ok(Some(self.take(src, index + 1))),
            None => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>> {
        if let Some(block) = self.decode(src)? {
            return Ok(Some(block));
        }
        if src.is_empty() {
            return Ok(None);
        }
        if self.accept_tail {
            let len = src.len();
            return Ok(Some(self.take(src, len)));
        }
        Err(Error::Misaligned {
            start: self.range.start,
            end: self.range.end,
            leftover: src.len(),
        })
    }
}

/// Aggregates every record streamed from `reader`, which yields exactly the
/// bytes of `range`.
pub async fn aggregate_reader<R>(
    reader: R,
    range: ChunkRange,
    accept_tail: bool,
    buffer_size: usize,
) -> Result<AggregateTable>
where
    R: AsyncRead + Unpin,
{
    let mut framed =
        FramedRead::with_capacity(reader, LineDecoder::new(range, accept_tail), buffer_size);
    let mut table = AggregateTable::new();
    while let Some(block) = framed.next().await {
        let block = block?;
        parse_lines(&block.lines, block.offset, &mut table)?;
    }
    Ok(table)
}

pub async fn aggregate_range(
    path: &Path,
    range: ChunkRange,
    accept_tail: bool,
    buffer_size: usize,
) -> Result<AggregateTable> {
    let mut file = File::open(path).await?;
    file.seek(SeekFrom::Start(range.start)).await?;
    let table = aggregate_reader(file.take(range.len()), range, accept_tail, buffer_size).await?;
    debug!(
        start = range.start,
        end = range.end,
        stations = table.len(),
        "chunk aggregated"
    );
    Ok(table)
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        pin::Pin,
        task::{Context, Poll},
    };

    use tokio::io::ReadBuf;

    use super::*;

    /// Hands out at most `step` bytes per read.
    struct Trickle<'a> {
        data: &'a [u8],
        step: usize,
    }

    impl AsyncRead for Trickle<'_> {
        fn poll_read(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &mut ReadBuf<'_>,
        ) -> Poll<io::Result<()>> {
            let data = self.data;
            let len = self.step.min(data.len()).min(buf.remaining());
            let (head, tail) = data.split_at(len);
            buf.put_slice(head);
            self.data = tail;
            Poll::Ready(Ok(()))
        }
    }

    fn range_of(data: &[u8]) -> ChunkRange {
        ChunkRange {
            start: 0,
            end: data.len() as u64,
        }
    }

    #[test]
    fn decode_keeps_carry_over() {
        let mut decoder = LineDecoder::new(ChunkRange { start: 40, end: 80 }, false);
        let mut buffer = BytesMut::from(&b"Oslo;1.0\nLima;2"[..]);

        let block = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(40, block.offset);
        assert_eq!(&b"Oslo;1.0\n"[..], &block.lines[..]);
        assert_eq!(&b"Lima;2"[..], &buffer[..]);

        assert!(decoder.decode(&mut buffer).unwrap().is_none());
        buffer.extend_from_slice(b"0.0\n");
        let block = decoder.decode(&mut buffer).unwrap().unwrap();
        assert_eq!(49, block.offset);
        assert_eq!(&b"Lima;20.0\n"[..], &block.lines[..]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn leftover_at_interior_end_is_misaligned() {
        let mut decoder = LineDecoder::new(ChunkRange { start: 0, end: 12 }, false);
        let mut buffer = BytesMut::from(&b"Oslo;1.0\nLim"[..]);
        decoder.decode_eof(&mut buffer).unwrap().unwrap();
        match decoder.decode_eof(&mut buffer) {
            Err(Error::Misaligned { start, end, leftover }) => {
                assert_eq!((0, 12, 3), (start, end, leftover));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn leftover_at_file_end_is_a_record() {
        let mut decoder = LineDecoder::new(ChunkRange { start: 0, end: 8 }, true);
        let mut buffer = BytesMut::from(&b"Oslo;1.0"[..]);
        let block = decoder.decode_eof(&mut buffer).unwrap().unwrap();
        assert_eq!(&b"Oslo;1.0"[..], &block.lines[..]);
        assert!(decoder.decode_eof(&mut buffer).unwrap().is_none());
    }

    #[tokio::test]
    async fn small_reads_match_one_read() {
        let data = b"Hamburg;12.0\nBulawayo;8.9\nHamburg;-3.4\nPalembang;38.8\nSt. John's;15.2\n";
        let whole = aggregate_reader(&data[..], range_of(data), false, 1024)
            .await
            .unwrap();
        for step in [1, 2, 5, 13, 64] {
            let reader = Trickle { data, step };
            let trickled = aggregate_reader(reader, range_of(data), false, 8)
                .await
                .unwrap();
            assert_eq!(whole, trickled, "step {step}");
        }
    }

    #[tokio::test]
    async fn malformed_offset_is_absolute() {
        let data = b"Oslo;1.0\nOslo;x\n";
        let range = ChunkRange {
            start: 1_000,
            end: 1_000 + data.len() as u64,
        };
        match aggregate_reader(&data[..], range, false, 4).await {
            Err(Error::MalformedRecord { offset, .. }) => assert_eq!(1_009, offset),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
