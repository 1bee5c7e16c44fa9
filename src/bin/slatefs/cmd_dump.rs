use anyhow::Result;
use byteorder::{ByteOrder, LittleEndian};
use std::path::PathBuf;

use SlateFS::consts::{DATA_START, SLATE_MAGIC, SLATE_VERSION, SUPERBLOCK_SIZE};
use SlateFS::word::Word;

use crate::util::{hex_dump, read_all};

/// Прогулка по метаданным образа: суперблок, слова, свободные прогоны.
pub fn exec(path: PathBuf, hex: bool) -> Result<()> {
    let image = read_all(&path)?;
    println!("Image {} ({} bytes)", path.display(), image.len());

    if image.len() < SUPERBLOCK_SIZE as usize {
        println!("  (too small for a superblock)");
        return Ok(());
    }
    let magic = LittleEndian::read_u32(&image[0..4]);
    let formatted = magic == SLATE_MAGIC && image[4] == SLATE_VERSION;
    println!(
        "  superblock: magic=0x{:08x} version={} ({})",
        magic,
        image[4],
        if formatted { "ok" } else { "NOT FORMATTED" }
    );

    if formatted {
        walk_words(&image);
    }

    if hex {
        println!("{}", hex_dump(&image));
    }
    Ok(())
}

fn walk_words(image: &[u8]) {
    let mut pos = DATA_START as usize;

    while pos < image.len() {
        // свободный прогон
        if image[pos] == 0 {
            let start = pos;
            while pos < image.len() && image[pos] == 0 {
                pos += 1;
            }
            println!("  {:>6}: free run of {} byte(s)", start, pos - start);
            continue;
        }

        if pos + 3 > image.len() {
            println!("  {:>6}: truncated word at the end of the medium", pos);
            break;
        }
        let raw = [image[pos], image[pos + 1], image[pos + 2]];
        match Word::decode(raw) {
            Ok(w) => {
                println!(
                    "  {:>6}: {:?}+{:?} rec={} payload={}",
                    pos, w.kind, w.payload_kind, w.index, w.payload
                );
                pos += 3;
                if SlateFS::word::is_size_payload(&raw) {
                    pos += w.payload as usize;
                }
            }
            Err(_) => {
                println!("  {:>6}: unparseable word {:02x?}", pos, raw);
                pos += 3;
            }
        }
    }
}
