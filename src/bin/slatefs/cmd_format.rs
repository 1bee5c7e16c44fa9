use anyhow::{anyhow, Result};
use std::path::PathBuf;

use SlateFS::storage::FileStorage;
use SlateFS::volume::Volume;

pub fn exec(path: PathBuf, size: u16, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "image {} already exists (use --force to overwrite)",
            path.display()
        ));
    }

    let store = FileStorage::create(&path, size)?;
    let mut vol = Volume::new(store)?;
    vol.format()?;
    vol.mount()?;

    println!("Formatted {} ({} bytes)", path.display(), size);
    Ok(())
}
