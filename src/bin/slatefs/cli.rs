use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для файл-образов SlateFS
#[derive(Parser, Debug)]
#[command(name = "slatefs", version, about = "SlateFS image tool")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Create a zeroed image and format it
    Format {
        #[arg(long)]
        path: PathBuf,
        /// Medium size in bytes (max 65535)
        #[arg(long, default_value_t = 4096)]
        size: u16,
        /// Overwrite an existing image
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Print superblock/directory summary
    Status {
        #[arg(long)]
        path: PathBuf,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List records (index, offset, size)
    Ls {
        #[arg(long)]
        path: PathBuf,
    },
    /// Create a record and fill it
    ///
    /// Значение: строка-литерал, "hex:<байты>", "@<файл>" или "-" (stdin).
    Write {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        rec: u8,
        #[arg(long)]
        value: String,
    },
    /// Read a record (stdout or file)
    Cat {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        rec: u8,
        /// Optional file to write raw bytes into
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Erase a record
    Rm {
        #[arg(long)]
        path: PathBuf,
        #[arg(long)]
        rec: u8,
    },
    /// Walk the on-media metadata (use --hex for a raw dump too)
    Dump {
        #[arg(long)]
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        hex: bool,
    },
}
