use anyhow::Result;
use std::path::PathBuf;

use SlateFS::storage::FileStorage;
use SlateFS::volume::Volume;

pub fn exec(path: PathBuf, rec: u8) -> Result<()> {
    let store = FileStorage::open(&path)?;
    let mut vol = Volume::new(store)?;
    vol.mount()?;

    vol.erase(rec)?;
    vol.sync()?;

    println!("record {}: erased", rec);
    Ok(())
}
