//! storage/mem — RAM-носитель (Vec-образ).
//!
//! Основной носитель для тестов и для сборок, где том живёт в ОЗУ/NVRAM.
//! Образ доступен напрямую (`image`/`image_mut`) — инструментам и тестам
//! это позволяет разглядывать и подделывать байты на «диске».

use super::{Storage, StorageResult};
use crate::error::StorageError;

#[derive(Debug)]
pub struct MemStorage {
    data: Vec<u8>,
    pos: usize,
}

impl MemStorage {
    /// Новый нулевой носитель заданного размера.
    pub fn new(size: u16) -> Self {
        MemStorage {
            data: vec![0u8; size as usize],
            pos: 0,
        }
    }

    /// Обернуть готовый образ (не длиннее 65535 байт).
    pub fn from_image(data: Vec<u8>) -> Self {
        assert!(data.len() <= u16::MAX as usize, "image too large for u16 medium");
        MemStorage { data, pos: 0 }
    }

    pub fn image(&self) -> &[u8] {
        &self.data
    }

    pub fn image_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Storage for MemStorage {
    fn size(&self) -> u16 {
        self.data.len() as u16
    }

    fn seek(&mut self, off: u16) -> StorageResult<()> {
        if (off as usize) >= self.data.len() {
            return Err(StorageError::OutOfBounds);
        }
        self.pos = off as usize;
        Ok(())
    }

    fn pos(&self) -> u16 {
        self.pos as u16
    }

    fn advance(&mut self, n: u16) -> StorageResult<()> {
        let next = self.pos + n as usize;
        if next > self.data.len() {
            return Err(StorageError::OutOfBounds);
        }
        self.pos = next;
        Ok(())
    }

    fn backtrack(&mut self, n: u16) -> StorageResult<()> {
        let n = n as usize;
        if n > self.pos {
            return Err(StorageError::OutOfBounds);
        }
        self.pos -= n;
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> StorageResult<()> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(StorageError::OutOfBounds);
        }
        buf.copy_from_slice(&self.data[self.pos..end]);
        self.pos = end;
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> StorageResult<()> {
        let end = self.pos + buf.len();
        if end > self.data.len() {
            return Err(StorageError::OutOfBounds);
        }
        self.data[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(())
    }

    fn at_end(&self) -> bool {
        !self.data.is_empty() && self.pos == self.data.len() - 1
    }

    fn sync(&mut self) -> StorageResult<()> {
        Ok(())
    }

    fn close(&mut self) -> StorageResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_moves_with_io() {
        let mut s = MemStorage::new(16);
        s.seek(4).unwrap();
        s.write(&[1, 2, 3]).unwrap();
        assert_eq!(s.pos(), 7);

        s.backtrack(3).unwrap();
        let mut buf = [0u8; 3];
        s.read(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3]);
        assert_eq!(s.pos(), 7);

        s.sync().unwrap();
        s.close().unwrap();
    }

    #[test]
    fn bounds_are_hard() {
        let mut s = MemStorage::new(8);
        assert!(matches!(s.seek(8), Err(StorageError::OutOfBounds)));
        s.seek(7).unwrap();
        assert!(s.at_end());

        // чтение последнего байта легально, следующее — нет
        let mut b = [0u8; 1];
        s.read(&mut b).unwrap();
        assert!(matches!(s.read(&mut b), Err(StorageError::OutOfBounds)));

        // advance до size разрешён, дальше — нет
        s.seek(0).unwrap();
        s.advance(8).unwrap();
        assert!(matches!(s.advance(1), Err(StorageError::OutOfBounds)));

        assert!(matches!(s.backtrack(9), Err(StorageError::OutOfBounds)));
    }

    #[test]
    fn failed_io_does_not_move_cursor() {
        let mut s = MemStorage::new(4);
        s.seek(2).unwrap();
        let mut buf = [0u8; 3];
        assert!(s.read(&mut buf).is_err());
        assert_eq!(s.pos(), 2);
        assert!(s.write(&[0; 3]).is_err());
        assert_eq!(s.pos(), 2);
    }
}
