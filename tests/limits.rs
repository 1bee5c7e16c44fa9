use anyhow::Result;

use SlateFS::config::VolumeConfig;
use SlateFS::error::FsError;
use SlateFS::storage::MemStorage;
use SlateFS::volume::Volume;

#[test]
fn record_index_is_bounds_checked() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    let n = vol.max_records();
    assert!(matches!(vol.open(n), Err(FsError::InvalidRecord(_))));
    assert!(matches!(vol.write(n, b"x"), Err(FsError::InvalidRecord(_))));
    let mut buf = [0u8; 4];
    assert!(matches!(vol.read(n, &mut buf), Err(FsError::InvalidRecord(_))));
    assert!(matches!(vol.erase(n), Err(FsError::InvalidRecord(_))));
    assert!(matches!(vol.close(n), Err(FsError::InvalidRecord(_))));
    Ok(())
}

#[test]
fn oversized_write_is_rejected() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    vol.open(0)?;
    // 32768 уже не влезает в 15-битное поле длины заголовка
    let too_big = vec![0u8; 32 * 1024];
    assert!(matches!(vol.write(0, &too_big), Err(FsError::InvalidRecord(0))));
    Ok(())
}

#[test]
fn max_length_write_roundtrips() -> Result<()> {
    // 32767 — ровно предел поля длины; носителя хватает на один экстент
    let mut vol = Volume::new(MemStorage::new(40000))?;
    vol.format()?;
    vol.mount()?;

    let data: Vec<u8> = (0..32767usize).map(|i| (i % 251) as u8).collect();
    vol.open(0)?;
    vol.write(0, &data)?;
    vol.close(0)?;

    // заголовок честно несёт 32767, без усечения
    let image = vol.storage().image();
    let w = SlateFS::word::Word::decode([image[5], image[6], image[7]]).unwrap();
    assert_eq!(w.payload, 32767);
    assert_eq!(vol.size_of(0)?, 32767);

    vol.open(0)?;
    let mut buf = vec![0u8; 40000];
    let effective = vol.read(0, &mut buf)?;
    assert_eq!(effective, data.len());
    assert_eq!(&buf[..effective], &data[..]);
    vol.close(0)?;
    Ok(())
}

#[test]
fn write_requires_write_mode() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    // не открыто вовсе
    assert!(matches!(vol.write(0, b"x"), Err(FsError::NotWritable(0))));

    // существующая запись открывается на чтение — писать нельзя
    vol.open(0)?;
    vol.write(0, b"abc")?;
    vol.close(0)?;
    vol.open(0)?;
    assert!(matches!(vol.write(0, b"x"), Err(FsError::NotWritable(0))));
    vol.close(0)?;
    Ok(())
}

#[test]
fn read_and_erase_refuse_write_mode() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    vol.open(0)?; // новая запись: открыта на запись
    let mut buf = [0u8; 4];
    assert!(matches!(vol.read(0, &mut buf), Err(FsError::NotReadable(0))));
    assert!(matches!(vol.erase(0), Err(FsError::NotReadable(0))));
    vol.close(0)?;
    Ok(())
}

#[test]
fn operations_on_missing_records() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    let mut buf = [0u8; 4];
    assert!(matches!(vol.read(7, &mut buf), Err(FsError::InvalidOperation(7))));
    assert!(matches!(vol.erase(7), Err(FsError::InvalidOperation(7))));
    assert!(matches!(vol.close(7), Err(FsError::InvalidOperation(7))));
    assert!(matches!(vol.size_of(7), Err(FsError::InvalidOperation(7))));
    Ok(())
}

#[test]
fn close_is_idempotent_for_existing_records() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(1024))?;
    vol.format()?;
    vol.mount()?;

    vol.open(0)?;
    vol.write(0, b"abc")?;
    vol.close(0)?;

    // открыта и не использована / уже закрыта — close остаётся ОК
    vol.open(0)?;
    vol.close(0)?;
    vol.close(0)?;
    Ok(())
}

#[test]
fn exhausted_medium_reports_nospace() -> Result<()> {
    // 64 байта: суперблок 5 + заголовок 3 + 52 данных + 3 резерва + 1
    let mut vol = Volume::new(MemStorage::new(64))?;
    vol.format()?;
    vol.mount()?;

    vol.open(0)?;
    vol.write(0, &[0xAA; 52])?; // ровно в ёмкость экстента

    // продолжение не лезет: дыр больше нет
    assert!(matches!(vol.write(0, &[0xBB]), Err(FsError::NoSpace)));
    vol.close(0)?;

    // заголовок отражает устойчиво записанный префикс
    vol.open(0)?;
    let mut buf = [0u8; 64];
    let effective = vol.read(0, &mut buf)?;
    assert_eq!(effective, 52);
    assert!(buf[..52].iter().all(|b| *b == 0xAA));
    vol.close(0)?;

    // создать вторую запись тоже негде
    assert!(matches!(vol.open(1), Err(FsError::NoSpace)));

    // после стирания место возвращается
    vol.erase(0)?;
    vol.open(1)?;
    vol.write(1, &[0xCC; 10])?;
    vol.close(1)?;
    Ok(())
}

#[test]
fn medium_too_small_for_any_record() -> Result<()> {
    // область данных короче MIN_HOLE: выделить нечего
    let mut vol = Volume::new(MemStorage::new(11))?;
    vol.format()?;
    vol.mount()?;
    assert!(matches!(vol.open(0), Err(FsError::NoSpace)));
    Ok(())
}

#[test]
fn config_bounds_are_enforced() {
    assert!(matches!(
        Volume::with_config(MemStorage::new(64), VolumeConfig::default().with_max_records(0)),
        Err(FsError::Config(_))
    ));
    assert!(matches!(
        Volume::with_config(MemStorage::new(64), VolumeConfig::default().with_max_records(127)),
        Err(FsError::Config(_))
    ));
    assert!(Volume::with_config(
        MemStorage::new(64),
        VolumeConfig::default().with_max_records(126)
    )
    .is_ok());
}

#[test]
fn exact_fill_does_not_preallocate_next_extent() -> Result<()> {
    let mut vol = Volume::new(MemStorage::new(64))?;
    vol.format()?;
    vol.mount()?;

    vol.open(0)?;
    vol.write(0, &[0x11; 52])?; // заполнение впритык, без сцепления
    vol.close(0)?;

    // за данными нет pointer-слова — только резервные нули
    let image = vol.storage().image();
    assert!(image[60..].iter().all(|b| *b == 0));
    assert_eq!(vol.size_of(0)?, 52);
    Ok(())
}
