//! Streaming CMD image encoder

use std::io::{self, ErrorKind, Read, Write};

use crate::error::{CmdError, Result};
use crate::record::{ModuleName, Record, MAX_BLOCK_LEN, NAME_LEN};

/// Streaming encoder turning raw bytes into a CMD load module.
///
/// The encoder reads the input in 256-byte chunks and writes one load block
/// per chunk, so arbitrarily large inputs encode in constant memory. Each
/// call to [`encode`](Self::encode) uses its own chunk buffer on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmdEncoder {
    name: ModuleName,
    load_address: u16,
    entry_point: u16,
}

impl CmdEncoder {
    /// Create an encoder for a module named `name`, loaded at
    /// `load_address` and entered at `entry_point`.
    pub fn new(name: ModuleName, load_address: u16, entry_point: u16) -> Self {
        Self {
            name,
            load_address,
            entry_point,
        }
    }

    /// The module name written to the header record.
    pub fn name(&self) -> ModuleName {
        self.name
    }

    /// The memory address of the first payload byte.
    pub fn load_address(&self) -> u16 {
        self.load_address
    }

    /// The execution address written to the transfer record.
    pub fn entry_point(&self) -> u16 {
        self.entry_point
    }

    /// Encode everything `reader` yields into a CMD image on `writer`.
    ///
    /// Emits the module header, one load block per 256 bytes of input (the
    /// last one shorter if the input is not a multiple of 256), and the
    /// transfer address record. Block addresses start at the load address
    /// and advance by the block length, wrapping at 64 KiB. An empty input
    /// produces a valid image with no load blocks.
    ///
    /// The writer is flushed before returning. Read failures surface as
    /// [`CmdError::Read`], write failures as [`CmdError::Write`], so callers
    /// that know the backing files can name them in diagnostics.
    pub fn encode<R: Read, W: Write>(&self, reader: &mut R, writer: &mut W) -> Result<EncodeStats> {
        let mut stats = EncodeStats::new(self.load_address);

        Record::ModuleHeader(self.name).write_to(writer)?;

        let mut chunk = [0u8; MAX_BLOCK_LEN];
        loop {
            let len = fill_chunk(reader, &mut chunk).map_err(CmdError::Read)?;
            if len == 0 {
                break;
            }
            Record::LoadBlock {
                address: stats.end_address,
                data: &chunk[..len],
            }
            .write_to(writer)?;
            stats.payload_len += len as u64;
            stats.blocks += 1;
            stats.end_address = stats.end_address.wrapping_add(len as u16);
        }

        Record::Transfer {
            address: self.entry_point,
        }
        .write_to(writer)?;
        writer.flush().map_err(CmdError::Write)?;

        Ok(stats)
    }
}

/// Summary of a finished encode pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeStats {
    /// Total payload bytes read from the input.
    pub payload_len: u64,
    /// Number of load blocks written.
    pub blocks: u64,
    /// Address one past the last loaded byte, wrapped at 64 KiB.
    pub end_address: u16,
}

impl EncodeStats {
    fn new(load_address: u16) -> Self {
        Self {
            payload_len: 0,
            blocks: 0,
            end_address: load_address,
        }
    }

    /// Total size of the encoded image in bytes.
    pub fn image_len(&self) -> u64 {
        (2 + NAME_LEN) as u64 + self.blocks * 4 + self.payload_len + 4
    }
}

/// Read from `reader` until `buf` is full or the input ends.
///
/// Plain `read` may return short counts (pipes and sockets routinely do),
/// which would fragment the image into undersized blocks. Keep reading
/// until the chunk fills or we hit EOF.
fn fill_chunk<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
