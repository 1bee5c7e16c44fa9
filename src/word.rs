//! word — кодек 3-байтового слова метаданных.
//!
//! Формат [b0,b1,b2]:
//! - b0 bit7  — вид записи: 0=normal (начало записи), 1=fragment.
//! - b0 b6..0 — индекс записи + INDEX_BIAS; хранимое значение 0 запрещено,
//!   именно это отличает метаданные от нулевых прогонов свободного места.
//! - b1 bit7  — вид нагрузки: 0=pointer (абсолютное смещение следующего
//!   экстента), 1=size (число байт данных экстента).
//! - b1 b6..0 | b2 — 15-битная нагрузка, 0..=32767.
//!
//! Комбинации:
//! - normal+size      — «здесь начинается запись, дальше payload байт данных»;
//! - fragment+pointer — «следующий экстент записи начинается по смещению payload»;
//! - fragment+size    — «этот экстент содержит payload байт данных».
//!
//! Смещение индекса применяется симметрично на encode и decode.

use crate::consts::{INDEX_BIAS, PAYLOAD_MAX};
use crate::error::{FsError, Result};

// b0: признак фрагмента; b1: признак size-нагрузки
const FRAGMENT_BIT: u8 = 0x80;
const SIZE_BIT: u8 = 0x80;
const INDEX_MASK: u8 = 0x7F;

/// Вид записи (бит 7 первого байта).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    Normal,
    Fragment,
}

/// Вид полезной нагрузки (бит 7 второго байта).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Pointer,
    Size,
}

/// Декодированное слово метаданных.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word {
    pub kind: WordKind,
    pub payload_kind: PayloadKind,
    /// Логический индекс записи (смещение уже снято).
    pub index: u8,
    /// 15-битная нагрузка: длина данных либо абсолютное смещение.
    pub payload: u16,
}

impl Word {
    /// Первичный заголовок записи: normal+size.
    pub fn normal_size(index: u8, len: u16) -> Self {
        Word {
            kind: WordKind::Normal,
            payload_kind: PayloadKind::Size,
            index,
            payload: len,
        }
    }

    /// Заголовок продолжения: fragment+size.
    pub fn fragment_size(index: u8, len: u16) -> Self {
        Word {
            kind: WordKind::Fragment,
            payload_kind: PayloadKind::Size,
            index,
            payload: len,
        }
    }

    /// Сцепляющее слово: fragment+pointer на абсолютное смещение `at`.
    pub fn fragment_pointer(index: u8, at: u16) -> Self {
        Word {
            kind: WordKind::Fragment,
            payload_kind: PayloadKind::Pointer,
            index,
            payload: at,
        }
    }

    /// Упаковать слово в 3 байта.
    pub fn encode(&self) -> [u8; 3] {
        debug_assert!(self.payload <= PAYLOAD_MAX);
        debug_assert!(self.index < INDEX_MASK);

        let mut b0 = (self.index + INDEX_BIAS) & INDEX_MASK;
        if self.kind == WordKind::Fragment {
            b0 |= FRAGMENT_BIT;
        }
        let mut b1 = ((self.payload >> 8) as u8) & !SIZE_BIT;
        if self.payload_kind == PayloadKind::Size {
            b1 |= SIZE_BIT;
        }
        [b0, b1, self.payload as u8]
    }

    /// Разобрать 3 байта как слово метаданных.
    ///
    /// Ошибка, если поле индекса нулевое: такой тройки на валидном носителе
    /// не бывает, это свободное место.
    pub fn decode(raw: [u8; 3]) -> Result<Word> {
        let field = raw[0] & INDEX_MASK;
        if field == 0 {
            return Err(FsError::OutOfRange);
        }
        Ok(Word {
            kind: if raw[0] & FRAGMENT_BIT != 0 {
                WordKind::Fragment
            } else {
                WordKind::Normal
            },
            payload_kind: if raw[1] & SIZE_BIT != 0 {
                PayloadKind::Size
            } else {
                PayloadKind::Pointer
            },
            index: field - INDEX_BIAS,
            payload: payload_of(&raw),
        })
    }
}

/// 15-битная нагрузка сырой тройки (единственная точка декодирования).
#[inline]
pub fn payload_of(raw: &[u8; 3]) -> u16 {
    (((raw[1] & !SIZE_BIT) as u16) << 8) | raw[2] as u16
}

/// Нагрузка тройки — size (а не pointer)?
#[inline]
pub fn is_size_payload(raw: &[u8; 3]) -> bool {
    raw[1] & SIZE_BIT != 0
}

/// Окно из 3 байт задевает свободное место?
///
/// Валидное слово не может начинаться с нуля; ноль в остальных байтах
/// трактуется консервативно — окно отдаётся счётчику нулевого прогона,
/// который сам решит, набирается ли дыра.
#[inline]
pub fn is_blank(raw: &[u8; 3]) -> bool {
    raw[0] == 0 || raw[1] == 0 || raw[2] == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_kinds() {
        let cases = [
            Word::normal_size(0, 0),
            Word::normal_size(31, 22),
            Word::fragment_size(5, 0x7FFF),
            Word::fragment_pointer(125, 5),
            Word::fragment_pointer(0, 32767),
        ];
        for w in cases {
            let raw = w.encode();
            let back = Word::decode(raw).unwrap();
            assert_eq!(back, w);
        }
    }

    #[test]
    fn index_bias_on_media() {
        // индекс 0 хранится как 1: первый байт никогда не нулевой
        let raw = Word::normal_size(0, 0).encode();
        assert_eq!(raw[0], 1);

        let raw = Word::fragment_size(0, 0).encode();
        assert_eq!(raw[0], 0x81);
    }

    #[test]
    fn decode_rejects_zero_index_field() {
        assert!(Word::decode([0x00, 0x80, 0x01]).is_err());
        // фрагментный бит установлен, но поле индекса нулевое
        assert!(Word::decode([0x80, 0x80, 0x01]).is_err());
    }

    #[test]
    fn payload_split() {
        let w = Word::fragment_size(3, 0x1234);
        let raw = w.encode();
        assert_eq!(raw[1], 0x80 | 0x12);
        assert_eq!(raw[2], 0x34);
        assert_eq!(payload_of(&raw), 0x1234);
        assert!(is_size_payload(&raw));

        let w = Word::fragment_pointer(3, 0x1234);
        let raw = w.encode();
        assert_eq!(raw[1], 0x12);
        assert!(!is_size_payload(&raw));
        assert_eq!(payload_of(&raw), 0x1234);
    }

    #[test]
    fn blank_window() {
        assert!(is_blank(&[0, 0, 0]));
        assert!(is_blank(&[1, 0, 7]));
        assert!(is_blank(&[1, 7, 0]));
        assert!(!is_blank(&[1, 0x80, 1]));
    }
}
