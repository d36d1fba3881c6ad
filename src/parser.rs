use crate::{
    error::{Error, Result},
    map::AggregateTable,
    temperature::parse_temperature,
};

/// Longest legal station name in bytes.
pub const MAX_STATION_LEN: usize = 100;

/// Splits one `<station>;<temperature>` record (terminator already removed)
/// and records it into `table`.
///
/// `offset` is the record's absolute position in the file and only feeds the
/// error. Records with no separator, an empty or oversized name, or a
/// temperature outside `-?\d{1,2}\.\d` fail with [`Error::MalformedRecord`].
#[inline]
pub fn parse_record(line: &[u8], offset: u64, table: &mut AggregateTable) -> Result<()> {
    let split = match memchr::memchr(b';', line) {
        Some(split) if split > 0 && split <= MAX_STATION_LEN => split,
        _ => return Err(Error::malformed(offset, line)),
    };
    let temperature =
        parse_temperature(&line[split + 1..]).ok_or_else(|| Error::malformed(offset, line))?;
    table.record(&line[..split], temperature);
    Ok(())
}

pub fn parse_lines(block: &[u8], offset: u64, table: &mut AggregateTable) -> Result<()> {
    let mut start = 0;
    for end in memchr::memchr_iter(b'\n', block) {
        parse_record(&block[start..end], offset + start as u64, table)?;
        start = end + 1;
    }
    if start < block.len() {
        parse_record(&block[start..], offset + start as u64, table)?;
    }
    Ok(())
}
