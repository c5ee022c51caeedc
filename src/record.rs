//! CMD record structures and serialization

use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{CmdError, Result};

/// Record type of a load block carrying payload bytes.
pub const LOAD_BLOCK: u8 = 0x01;

/// Record type of the transfer address record closing the image.
pub const TRANSFER_ADDRESS: u8 = 0x02;

/// Record type of the load module header opening the image.
pub const LOAD_MODULE_HEADER: u8 = 0x05;

/// Length of the name field in a load module header.
pub const NAME_LEN: usize = 6;

/// Maximum payload bytes a single load block can carry.
pub const MAX_BLOCK_LEN: usize = 256;

/// The six-byte module name field of a load module header.
///
/// The field holds the name uppercased, truncated at the first `.`, cut to
/// six bytes and right-padded with spaces. Derivation works on raw bytes
/// with ASCII uppercasing, so file names outside ASCII pass through
/// unchanged rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModuleName([u8; NAME_LEN]);

impl ModuleName {
    /// Build a name field from an explicit string.
    pub fn new(name: &str) -> Self {
        Self::from_raw(name.as_bytes())
    }

    /// Derive the name field from an output file path.
    ///
    /// Only the base name is considered; `out/game.cmd` yields `GAME  `.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().file_name() {
            Some(base) => Self::from_raw(base.to_string_lossy().as_bytes()),
            None => Self::default(),
        }
    }

    fn from_raw(raw: &[u8]) -> Self {
        let mut field = [b' '; NAME_LEN];
        let stem = raw.iter().take_while(|&&b| b != b'.');
        for (slot, &b) in field.iter_mut().zip(stem) {
            *slot = b.to_ascii_uppercase();
        }
        Self(field)
    }

    /// The raw six-byte field exactly as written to the image.
    pub fn as_bytes(&self) -> &[u8; NAME_LEN] {
        &self.0
    }
}

impl Default for ModuleName {
    fn default() -> Self {
        Self([b' '; NAME_LEN])
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0).trim_end())
    }
}

/// A single record of a CMD image.
///
/// A CMD file is a flat sequence of type-length-value records: one load
/// module header, any number of load blocks, and a final transfer address
/// record. All multi-byte fields are little-endian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record<'a> {
    /// Opens the image and names the module (type `0x05`).
    ModuleHeader(ModuleName),
    /// Places `data` at `address` in memory (type `0x01`).
    LoadBlock {
        /// Memory address of the first payload byte.
        address: u16,
        /// Payload bytes, 1-256 of them.
        data: &'a [u8],
    },
    /// Ends the image and transfers control to `address` (type `0x02`).
    Transfer {
        /// Execution entry address.
        address: u16,
    },
}

impl Record<'_> {
    /// Serialize the record to a writer.
    ///
    /// Write failures surface as [`CmdError::Write`].
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if let Record::LoadBlock { data, .. } = self {
            if data.is_empty() || data.len() > MAX_BLOCK_LEN {
                return Err(CmdError::InvalidBlockLen { len: data.len() });
            }
        }
        self.write_bytes(writer).map_err(CmdError::Write)
    }

    fn write_bytes<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        match *self {
            Record::ModuleHeader(name) => {
                writer.write_u8(LOAD_MODULE_HEADER)?;
                writer.write_u8(NAME_LEN as u8)?;
                writer.write_all(name.as_bytes())?;
            }
            Record::LoadBlock { address, data } => {
                writer.write_u8(LOAD_BLOCK)?;
                // The length byte counts the two address bytes as well, so a
                // full 256-byte block stores (256 + 2) & 0xff = 0x02.
                writer.write_u8(((data.len() + 2) & 0xff) as u8)?;
                writer.write_u16::<LittleEndian>(address)?;
                writer.write_all(data)?;
            }
            Record::Transfer { address } => {
                writer.write_u8(TRANSFER_ADDRESS)?;
                writer.write_u8(2)?;
                writer.write_u16::<LittleEndian>(address)?;
            }
        }
        Ok(())
    }

    /// Serialized size of the record in bytes.
    pub fn encoded_len(&self) -> usize {
        match self {
            Record::ModuleHeader(_) => 2 + NAME_LEN,
            Record::LoadBlock { data, .. } => 4 + data.len(),
            Record::Transfer { .. } => 4,
        }
    }
}
