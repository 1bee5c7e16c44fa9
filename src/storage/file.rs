//! storage/file — файл-образ носителя (симулятор EEPROM).
//!
//! Размер носителя определяется длиной файла; `create` кладёт на диск
//! нулевой образ заданного размера. Позиция ведётся в адаптере, файловый
//! курсор выставляется перед каждым обменом.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::{Storage, StorageResult};
use crate::error::StorageError;

#[derive(Debug)]
pub struct FileStorage {
    file: File,
    path: PathBuf,
    size: u16,
    pos: u16,
}

impl FileStorage {
    /// Создать нулевой образ размером `size` байт (существующий файл
    /// перезаписывается) и открыть его как носитель.
    pub fn create(path: &Path, size: u16) -> StorageResult<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let zeros = [0u8; 256];
        let mut left = size as usize;
        while left > 0 {
            let n = left.min(zeros.len());
            file.write_all(&zeros[..n])?;
            left -= n;
        }
        file.sync_all()?;

        Ok(FileStorage {
            file,
            path: path.to_path_buf(),
            size,
            pos: 0,
        })
    }

    /// Открыть существующий образ; размер носителя — длина файла.
    pub fn open(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len();
        if len == 0 || len > u16::MAX as u64 {
            return Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("image {} has unusable length {}", path.display(), len),
            )));
        }
        Ok(FileStorage {
            file,
            path: path.to_path_buf(),
            size: len as u16,
            pos: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn size(&self) -> u16 {
        self.size
    }

    fn seek(&mut self, off: u16) -> StorageResult<()> {
        if off >= self.size {
            return Err(StorageError::OutOfBounds);
        }
        self.pos = off;
        Ok(())
    }

    fn pos(&self) -> u16 {
        self.pos
    }

    fn advance(&mut self, n: u16) -> StorageResult<()> {
        let next = self.pos as u32 + n as u32;
        if next > self.size as u32 {
            return Err(StorageError::OutOfBounds);
        }
        self.pos = next as u16;
        Ok(())
    }

    fn backtrack(&mut self, n: u16) -> StorageResult<()> {
        if n > self.pos {
            return Err(StorageError::OutOfBounds);
        }
        self.pos -= n;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> StorageResult<()> {
        let end = self.pos as u32 + buf.len() as u32;
        if end > self.size as u32 {
            return Err(StorageError::OutOfBounds);
        }
        self.file.seek(SeekFrom::Start(self.pos as u64))?;
        self.file.read_exact(buf)?;
        self.pos = end as u16;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> StorageResult<()> {
        let end = self.pos as u32 + buf.len() as u32;
        if end > self.size as u32 {
            return Err(StorageError::OutOfBounds);
        }
        self.file.seek(SeekFrom::Start(self.pos as u64))?;
        self.file.write_all(buf)?;
        self.pos = end as u16;
        Ok(())
    }

    fn at_end(&self) -> bool {
        self.size > 0 && self.pos == self.size - 1
    }

    fn sync(&mut self) -> StorageResult<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn close(&mut self) -> StorageResult<()> {
        self.file.sync_all()?;
        Ok(())
    }
}
