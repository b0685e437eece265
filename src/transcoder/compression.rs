//! Сжатие и распаковка блоков данных в формате zlib.
//!
//! Формат совместим с любым zlib-совместимым компрессором: строки,
//! сжатые на стороне браузера, распаковываются здесь и наоборот.

use std::{cmp, io::Write};

use deckstate_error::CorruptDataError;
use flate2::{write::ZlibEncoder, Compression, Decompress, FlushDecompress, Status};

/// Уровень сжатия по умолчанию (как у zlib).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Максимальный уровень сжатия.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Шаг роста выходного буфера при распаковке.
const MIN_GROW: usize = 256;

/// Сжимает срез байтов в поток zlib.
///
/// # Аргументы
///
/// * `data` — исходные байты.
/// * `level` — уровень сжатия `0..=9`; большие значения обрезаются до 9.
pub fn compress_block(
    data: &[u8],
    level: u32,
) -> Vec<u8> {
    let level = Compression::new(cmp::min(level, MAX_COMPRESSION_LEVEL));
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2 + 16), level);
    // Запись в Vec<u8> не может завершиться ошибкой ввода-вывода.
    encoder
        .write_all(data)
        .expect("zlib compression into memory failed");
    encoder.finish().expect("zlib compression into memory failed")
}

/// Распаковывает поток zlib.
///
/// Поток читается порциями, буфер растёт по мере надобности. Поток
/// должен дойти до своего конца: обрезанные данные считаются
/// повреждёнными. Если результат длиннее `limit` байт, распаковка
/// прекращается с [`CorruptDataError::SizeLimit`].
pub fn decompress_block(
    data: &[u8],
    limit: usize,
) -> Result<Vec<u8>, CorruptDataError> {
    let mut inflater = Decompress::new(true);
    let initial = cmp::min(
        cmp::max(data.len().saturating_mul(4), MIN_GROW),
        limit.saturating_add(1),
    );
    let mut out = Vec::with_capacity(initial);

    loop {
        if out.len() > limit {
            return Err(CorruptDataError::SizeLimit {
                size: out.len(),
                limit,
            });
        }
        if out.len() == out.capacity() {
            // Не больше, чем нужно, чтобы заметить превышение лимита.
            let grow = cmp::min(
                cmp::max(out.capacity(), MIN_GROW),
                limit.saturating_add(1) - out.len(),
            );
            out.reserve(grow);
        }

        let in_before = inflater.total_in();
        let out_before = inflater.total_out();
        let input = &data[in_before as usize..];

        let status = inflater
            .decompress_vec(input, &mut out, FlushDecompress::None)
            .map_err(|e| CorruptDataError::decompression(e.to_string()))?;

        if status == Status::StreamEnd {
            break;
        }

        let stalled = inflater.total_in() == in_before && inflater.total_out() == out_before;
        if stalled && out.len() < out.capacity() {
            return Err(CorruptDataError::decompression(format!(
                "truncated zlib stream after {} bytes",
                inflater.total_in()
            )));
        }
    }

    if out.len() > limit {
        return Err(CorruptDataError::SizeLimit {
            size: out.len(),
            limit,
        });
    }
    Ok(out)
}
