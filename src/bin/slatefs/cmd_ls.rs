use anyhow::Result;
use std::path::PathBuf;

use SlateFS::storage::FileStorage;
use SlateFS::volume::Volume;

pub fn exec(path: PathBuf) -> Result<()> {
    let store = FileStorage::open(&path)?;
    let mut vol = Volume::new(store)?;
    vol.mount()?;

    let mut list = vec![0u8; vol.max_records() as usize];
    let total = vol.list(&mut list);

    println!("{:>5}  {:>6}  {:>6}", "rec", "offset", "size");
    for &rec in &list[..total] {
        let off = vol.first_extent(rec)?.unwrap_or(0);
        let size = vol.size_of(rec)?;
        println!("{:>5}  {:>6}  {:>6}", rec, off, size);
    }
    println!("{} record(s)", total);
    Ok(())
}
