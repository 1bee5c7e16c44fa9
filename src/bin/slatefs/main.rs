use anyhow::Result;
use clap::Parser;

mod cli;
mod cmd_cat;
mod cmd_dump;
mod cmd_format;
mod cmd_ls;
mod cmd_rm;
mod cmd_status;
mod cmd_write;
mod util;

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match cli.cmd {
        cli::Cmd::Format { path, size, force } => cmd_format::exec(path, size, force),

        cli::Cmd::Status { path, json } => cmd_status::exec(path, json),

        cli::Cmd::Ls { path } => cmd_ls::exec(path),

        cli::Cmd::Write { path, rec, value } => cmd_write::exec(path, rec, value),

        cli::Cmd::Cat { path, rec, out } => cmd_cat::exec(path, rec, out),

        cli::Cmd::Rm { path, rec } => cmd_rm::exec(path, rec),

        cli::Cmd::Dump { path, hex } => cmd_dump::exec(path, hex),
    }
}
