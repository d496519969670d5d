// src/readers/rangeextractor.rs

//! The Range Extractor: copy a byte range of a source file verbatim to a
//! destination file.
//!
//! Bytes are streamed through a fixed-size buffer; memory use does not grow
//! with the size of the range.

use crate::common::{ExtractError, File, FileOpenOptions, Path, ResultExtract};
use crate::data::range::ExtractionRange;
use crate::readers::helpers::create_parent_dirs;

use std::io::{BufWriter, Read, Seek, SeekFrom, Write};

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Capacity of the destination write buffer in bytes.
pub const COPY_BUFSZ: usize = 0x10000;

/// Copy bytes `[range.start, range.end)` of `source` to `destination`.
///
/// `destination` is created or truncated. Missing parent directories of
/// `destination` are created. `source` is opened before anything is created
/// so a missing `source` leaves the filesystem untouched.
///
/// Returns the count of bytes copied. Fails with
/// [`ExtractError::ShortCopy`] if `source` ends before `range.end`.
pub fn extract_between_offsets(
    source: &Path,
    destination: &Path,
    range: &ExtractionRange,
) -> ResultExtract<u64> {
    defn!("({:?}, {:?}, {})", source, destination, range);
    let mut file_src: File = match File::open(source) {
        Ok(val) => val,
        Err(err) => {
            defx!("File::open error {}", err);
            return Err(ExtractError::io(source, err));
        }
    };
    if let Err(err) = file_src.seek(SeekFrom::Start(range.start)) {
        defx!("seek error {}", err);
        return Err(ExtractError::io(source, err));
    }
    create_parent_dirs(destination)?;
    let file_dst: File = match FileOpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(destination)
    {
        Ok(val) => val,
        Err(err) => {
            defx!("open destination error {}", err);
            return Err(ExtractError::io(destination, err));
        }
    };
    let mut writer = BufWriter::with_capacity(COPY_BUFSZ, file_dst);
    let expected: u64 = range.len();
    let copied: u64 = match std::io::copy(&mut Read::by_ref(&mut file_src).take(expected), &mut writer) {
        Ok(val) => val,
        Err(err) => {
            defx!("copy error {}", err);
            return Err(ExtractError::io(destination, err));
        }
    };
    if let Err(err) = writer.flush() {
        defx!("flush error {}", err);
        return Err(ExtractError::io(destination, err));
    }
    if copied != expected {
        defx!("return ShortCopy; copied {} expected {}", copied, expected);
        return Err(ExtractError::ShortCopy { expected, copied });
    }
    defo!("copied {} bytes up to offset {}", copied, range.start + copied);
    defx!("return {}", copied);

    Ok(copied)
}
