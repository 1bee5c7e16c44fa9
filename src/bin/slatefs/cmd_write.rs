use anyhow::{anyhow, Result};
use std::path::PathBuf;

use SlateFS::storage::FileStorage;
use SlateFS::volume::Volume;

use crate::util::decode_value_arg;

pub fn exec(path: PathBuf, rec: u8, value: String) -> Result<()> {
    let data = decode_value_arg(&value)?;

    let store = FileStorage::open(&path)?;
    let mut vol = Volume::new(store)?;
    vol.mount()?;

    if vol.exists(rec)? {
        // дозаписи формат не поддерживает
        return Err(anyhow!("record {} already exists (rm it first)", rec));
    }

    vol.open(rec)?;
    vol.write(rec, &data)?;
    vol.close(rec)?;
    vol.sync()?;

    println!("record {}: {} byte(s) written", rec, data.len());
    Ok(())
}
