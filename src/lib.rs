//! # mkcmd
//!
//! A Rust implementation of a CMD encoder for turning raw binaries into
//! TRS-80 DOS load modules.
//!
//! A CMD file is a flat sequence of little-endian records: a load module
//! header carrying the module name, one load block per 256 bytes of
//! payload, and a transfer address record giving the execution entry point.
//!
//! ## Example
//!
//! ```rust
//! use mkcmd::CmdBuilder;
//!
//! let image = CmdBuilder::with_name("game")
//!     .load_address(0x3000)
//!     .entry_point(0x3000)
//!     .data(vec![0xC3, 0x00, 0x30])
//!     .build()?;
//!
//! assert_eq!(image[..8], *b"\x05\x06GAME  ");
//! # Ok::<(), mkcmd::CmdError>(())
//! ```

pub mod record;
pub mod encoder;
pub mod builder;
pub mod error;
pub mod cli;

// Re-export main types for convenience
pub use builder::CmdBuilder;
pub use encoder::{CmdEncoder, EncodeStats};
pub use error::{CmdError, Result};
pub use record::{ModuleName, Record};
pub use record::{LOAD_BLOCK, LOAD_MODULE_HEADER, MAX_BLOCK_LEN, NAME_LEN, TRANSFER_ADDRESS};

/// Current version of the mkcmd implementation
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
