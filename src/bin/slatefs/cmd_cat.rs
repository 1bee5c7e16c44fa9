use anyhow::{anyhow, Result};
use std::io::Write;
use std::path::PathBuf;

use SlateFS::storage::FileStorage;
use SlateFS::volume::Volume;

pub fn exec(path: PathBuf, rec: u8, out: Option<PathBuf>) -> Result<()> {
    let store = FileStorage::open(&path)?;
    let mut vol = Volume::new(store)?;
    vol.mount()?;

    if !vol.exists(rec)? {
        return Err(anyhow!("record {} does not exist", rec));
    }

    let size = vol.size_of(rec)?;
    let mut buf = vec![0u8; size as usize];
    vol.open(rec)?;
    let effective = vol.read(rec, &mut buf)?;
    vol.close(rec)?;
    buf.truncate(effective);

    match out {
        Some(p) => {
            std::fs::write(&p, &buf)?;
            eprintln!("record {}: {} byte(s) -> {}", rec, effective, p.display());
        }
        None => {
            std::io::stdout().write_all(&buf)?;
        }
    }
    Ok(())
}
