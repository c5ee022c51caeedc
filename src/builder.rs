//! Fluent builder for assembling CMD images in memory

use std::fs;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::encoder::{CmdEncoder, EncodeStats};
use crate::error::{CmdError, Result};
use crate::record::{ModuleName, MAX_BLOCK_LEN, NAME_LEN};

/// Builder for CMD images with a fluent interface.
///
/// Collects the module name, addresses and payload, then hands off to
/// [`CmdEncoder`] to produce the bytes. Use the encoder directly instead
/// when the payload should stream rather than sit in memory.
#[derive(Debug, Clone)]
pub struct CmdBuilder {
    name: ModuleName,
    load_address: u16,
    entry_point: u16,
    data: Vec<u8>,
}

impl CmdBuilder {
    /// Create a new builder with an all-spaces name, zero addresses and no
    /// payload.
    pub fn new() -> Self {
        Self {
            name: ModuleName::default(),
            load_address: 0,
            entry_point: 0,
            data: Vec::new(),
        }
    }

    /// Create a builder for a module named `name`.
    pub fn with_name(name: &str) -> Self {
        Self::new().name(name)
    }

    /// Set the module name from a string.
    pub fn name(mut self, name: &str) -> Self {
        self.name = ModuleName::new(name);
        self
    }

    /// Derive the module name from an output file path.
    pub fn name_from_path(mut self, path: impl AsRef<Path>) -> Self {
        self.name = ModuleName::from_path(path);
        self
    }

    /// Set the memory address the payload loads at.
    pub fn load_address(mut self, address: u16) -> Self {
        self.load_address = address;
        self
    }

    /// Set the execution entry address.
    pub fn entry_point(mut self, address: u16) -> Self {
        self.entry_point = address;
        self
    }

    /// Set the payload.
    pub fn data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = data.into();
        self
    }

    /// Load the payload from a file.
    pub fn data_from_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        self.data = fs::read(path).map_err(|e| CmdError::input_open(path, e))?;
        Ok(self)
    }

    /// Read the payload from a reader until EOF.
    pub fn data_from_reader<R: Read>(mut self, reader: &mut R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).map_err(CmdError::Read)?;
        self.data = data;
        Ok(self)
    }

    /// The payload as currently set.
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// The module name as currently set.
    pub fn module_name(&self) -> ModuleName {
        self.name
    }

    /// Number of load blocks the payload will produce.
    pub fn blocks(&self) -> u64 {
        self.data.len().div_ceil(MAX_BLOCK_LEN) as u64
    }

    /// Total size of the image `build` will produce.
    pub fn total_len(&self) -> u64 {
        (2 + NAME_LEN) as u64 + self.blocks() * 4 + self.data.len() as u64 + 4
    }

    /// Build the complete image as a byte vector.
    pub fn build(&self) -> Result<Vec<u8>> {
        let mut image = Vec::with_capacity(self.total_len() as usize);
        self.build_to_writer(&mut image)?;
        Ok(image)
    }

    /// Build the image directly into a writer.
    pub fn build_to_writer<W: Write>(&self, writer: &mut W) -> Result<EncodeStats> {
        let encoder = CmdEncoder::new(self.name, self.load_address, self.entry_point);
        let mut reader = self.data.as_slice();
        encoder.encode(&mut reader, writer)
    }

    /// Build the image and write it to a file.
    ///
    /// Write failures name the file in the error.
    pub fn build_to_file(&self, path: impl AsRef<Path>) -> Result<EncodeStats> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| CmdError::output_open(path, e))?;
        let mut writer = BufWriter::new(file);
        self.build_to_writer(&mut writer).map_err(|e| match e {
            CmdError::Write(source) => CmdError::output_write(path, source),
            other => other,
        })
    }

    /// Human-readable summary of the image this builder describes.
    pub fn summary(&self) -> String {
        format!(
            "Module: {}\n\
             Load Address: 0x{:04x} Entry Point: 0x{:04x}\n\
             Size: {} bytes ({} load blocks)",
            self.name,
            self.load_address,
            self.entry_point,
            self.data.len(),
            self.blocks()
        )
    }
}

impl Default for CmdBuilder {
    fn default() -> Self {
        Self::new()
    }
}
