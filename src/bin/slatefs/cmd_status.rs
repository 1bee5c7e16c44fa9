use anyhow::Result;
use std::path::PathBuf;

use serde_json::json;

use SlateFS::consts::{SLATE_VERSION, SUPERBLOCK_SIZE};
use SlateFS::error::FsError;
use SlateFS::storage::{FileStorage, Storage};
use SlateFS::volume::Volume;

pub fn exec(path: PathBuf, json_out: bool) -> Result<()> {
    let store = FileStorage::open(&path)?;
    let size = store.size();
    let mut vol = Volume::new(store)?;

    let formatted = match vol.mount() {
        Ok(()) => true,
        Err(FsError::NotFormatted) => false,
        Err(e) => return Err(e.into()),
    };

    let max = vol.max_records();
    let mut list = vec![0u8; max as usize];
    let used = if formatted { vol.list(&mut list) } else { 0 };
    let next = if formatted {
        vol.next_available().ok()
    } else {
        None
    };
    let free = if formatted {
        Some(vol.free_bytes()?)
    } else {
        None
    };

    if json_out {
        let status = json!({
            "image": path.display().to_string(),
            "size": size,
            "data_area": size.saturating_sub(SUPERBLOCK_SIZE),
            "formatted": formatted,
            "version": if formatted { Some(SLATE_VERSION) } else { None },
            "records_used": used,
            "max_records": max,
            "next_available": next,
            "free_bytes": free,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("Image {}", path.display());
    println!("  size           = {}", size);
    println!("  data_area      = {}", size.saturating_sub(SUPERBLOCK_SIZE));
    println!("  formatted      = {}", formatted);
    if formatted {
        println!("  version        = {}", SLATE_VERSION);
        println!("  records_used   = {}/{}", used, max);
        match next {
            Some(n) => println!("  next_available = {}", n),
            None => println!("  next_available = (none, volume full)"),
        }
        println!("  free_bytes     = {}", free.unwrap_or(0));
    }
    Ok(())
}
