use anyhow::Result;
use std::collections::HashSet;

use SlateFS::storage::MemStorage;
use SlateFS::volume::Volume;
use SlateFS::word::{PayloadKind, Word, WordKind};

const PAYLOAD: &[u8] = b"Hello! This is Slate.";

#[test]
fn smoke_write_read_all_records() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(4096))?;
    vol.format()?;
    vol.mount()?;

    let n = vol.max_records();
    assert_eq!(n, 32);

    // 1) каждая запись: создать, записать, закрыть
    for i in 0..n {
        vol.open(i)?;
        vol.write(i, PAYLOAD)?;
        vol.close(i)?;
    }

    // 2) каждая запись: открыть, прочитать, сверить
    for i in 0..n {
        vol.open(i)?;
        let mut buf = [0u8; 128];
        let effective = vol.read(i, &mut buf)?;
        assert_eq!(effective, PAYLOAD.len());
        assert_eq!(&buf[..effective], PAYLOAD);
        vol.close(i)?;
    }

    // 3) каталог полон
    let mut list = [0u8; 64];
    assert_eq!(vol.list(&mut list), n as usize);
    for i in 0..n {
        assert_eq!(list[i as usize], i);
    }

    // 4) на носителе: по каждому первому экстенту — normal+size с верным
    //    индексом и длиной; смещения не пересекаются
    let mut seen = HashSet::new();
    for i in 0..n {
        let off = vol.first_extent(i)?.expect("record must exist") as usize;
        assert!(seen.insert(off), "two records share offset {}", off);

        let image = vol.storage().image();
        let raw = [image[off], image[off + 1], image[off + 2]];
        let w = Word::decode(raw).unwrap();
        assert_eq!(w.kind, WordKind::Normal);
        assert_eq!(w.payload_kind, PayloadKind::Size);
        assert_eq!(w.index, i);
        assert_eq!(w.payload as usize, PAYLOAD.len());

        assert_eq!(vol.size_of(i)?, PAYLOAD.len() as u16);
    }

    Ok(())
}

#[test]
fn sequential_reads_continue_where_they_stopped() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    let data = build_pattern(100, 0x5A);
    vol.open(0)?;
    vol.write(0, &data)?;
    vol.close(0)?;

    vol.open(0)?;
    let mut head = [0u8; 30];
    assert_eq!(vol.read(0, &mut head)?, 30);
    assert_eq!(&head[..], &data[..30]);

    let mut tail = [0u8; 128];
    let effective = vol.read(0, &mut tail)?;
    assert_eq!(effective, 70);
    assert_eq!(&tail[..70], &data[30..]);

    // цепочка закончилась: дальше читается ноль байт
    assert_eq!(vol.read(0, &mut tail)?, 0);
    vol.close(0)?;
    Ok(())
}

#[test]
fn two_writes_append_within_open_session() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(512))?;
    vol.format()?;
    vol.mount()?;

    vol.open(3)?;
    vol.write(3, b"abc")?;
    vol.write(3, b"defg")?;
    vol.close(3)?;

    vol.open(3)?;
    let mut buf = [0u8; 16];
    let effective = vol.read(3, &mut buf)?;
    assert_eq!(&buf[..effective], b"abcdefg");
    vol.close(3)?;

    assert_eq!(vol.size_of(3)?, 7);
    // занято: заголовок + 7 байт данных
    assert_eq!(vol.free_bytes()?, 512 - 5 - 3 - 7);
    Ok(())
}

#[test]
fn format_then_mount_is_empty() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(256))?;
    vol.format()?;
    vol.mount()?;

    let mut list = [0u8; 32];
    assert_eq!(vol.list(&mut list), 0);
    assert_eq!(vol.next_available()?, 0);

    // свободна вся область данных
    assert_eq!(vol.free_bytes()?, 256 - 5);
    Ok(())
}

fn build_pattern(len: usize, byte: u8) -> Vec<u8> {
    let mut v = vec![byte; len];
    // немного разнообразия, чтобы байты не были одинаковыми
    for (i, b) in v.iter_mut().enumerate() {
        *b = byte.wrapping_add(i as u8);
    }
    v
}
