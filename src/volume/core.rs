//! volume/core — структура Volume и административные операции.
//!
//! Носитель и каталог — собственность тома: несколько томов сосуществуют
//! в одном процессе, глобального состояния нет.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;

use crate::config::VolumeConfig;
use crate::consts::{SLATE_MAGIC, SLATE_VERSION, SUPERBLOCK_SIZE};
use crate::dir::Directory;
use crate::error::Result;
use crate::storage::Storage;

/// Том SlateFS поверх байт-адресуемого носителя.
pub struct Volume<S: Storage> {
    pub(crate) store: S,
    pub(crate) dir: Directory,
    cfg: VolumeConfig,
}

impl<S: Storage> Volume<S> {
    /// Том с конфигурацией по умолчанию.
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, VolumeConfig::default())
    }

    pub fn with_config(store: S, cfg: VolumeConfig) -> Result<Self> {
        cfg.validate()?;
        let dir = Directory::new(cfg.max_records);
        Ok(Volume { store, dir, cfg })
    }

    #[inline]
    pub fn max_records(&self) -> u8 {
        self.cfg.max_records
    }

    /// Адаптер носителя (диагностика, прямой доступ к образу в тестах).
    pub fn storage(&self) -> &S {
        &self.store
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Отформатировать носитель: обнулить всё, записать суперблок.
    ///
    /// Каталог не трогается — после format вызывают mount.
    pub fn format(&mut self) -> Result<()> {
        let total = self.store.size();

        self.store.seek(0)?;
        let zeros = [0u8; 64];
        let mut left = total as usize;
        while left > 0 {
            let n = left.min(zeros.len());
            self.store.write(&zeros[..n])?;
            left -= n;
        }

        let mut sb = [0u8; SUPERBLOCK_SIZE as usize];
        LittleEndian::write_u32(&mut sb[0..4], SLATE_MAGIC);
        sb[4] = SLATE_VERSION;
        self.store.seek(0)?;
        self.store.write(&sb)?;
        self.store.sync()?;

        debug!("formatted medium of {} bytes", total);
        Ok(())
    }

    /// Существующие индексы по возрастанию; возвращает фактическое
    /// общее количество записей (буфер может быть меньше).
    pub fn list(&self, out: &mut [u8]) -> usize {
        self.dir.list(out)
    }

    /// Наименьший свободный индекс.
    pub fn next_available(&self) -> Result<u8> {
        self.dir.next_available()
    }

    /// Запись с таким индексом существует?
    pub fn exists(&self, rec: u8) -> Result<bool> {
        Ok(self.dir.slot(rec)?.first > 0)
    }

    /// Смещение первичного заголовка записи (None — записи нет).
    pub fn first_extent(&self, rec: u8) -> Result<Option<u16>> {
        let first = self.dir.slot(rec)?.first;
        Ok(if first > 0 { Some(first) } else { None })
    }

    /// Дотолкнуть носитель до устройства.
    pub fn sync(&mut self) -> Result<()> {
        self.store.sync()?;
        Ok(())
    }
}
