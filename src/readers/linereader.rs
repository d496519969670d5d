// src/readers/linereader.rs

//! Implements a [`LogSource`], the driver of reading bytes and lines from a
//! log file at arbitrary offsets.
//!
//! A `LogSource` is the Line Boundary Resolver: given any byte offset it finds
//! the start of the line holding that offset by scanning raw bytes backward
//! for a `'\n'`. It never decodes characters while scanning so arbitrary
//! invalid byte sequences cannot interrupt it.
//!
//! Only the current line and one small backward-scan window are ever held in
//! memory.

use crate::common::{Bytes, Count, ExtractError, FPath, File, FileOffset, FileSz, NLu8, Path, ResultExtract};
#[cfg(any(debug_assertions, test))]
use crate::debug::printers::buffer_to_String_noraw;

use std::fmt;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};

use ::more_asserts::debug_assert_le;
#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Default count of bytes read per step of a backward scan.
pub const BACKSCAN_SZ_DEF: usize = 0x1000;

/// Absolute minimum backward scan step in bytes (inclusive).
pub const BACKSCAN_SZ_MIN: usize = 1;

/// An opened, seekable log file of known size.
///
/// Lines are separated by a single `'\n'` byte. The last line may lack a
/// trailing `'\n'`.
///
/// _XXX: not a rust "Reader"; does not implement trait [`Read`]._
///
/// [`Read`]: std::io::Read
pub struct LogSource {
    /// Path to the file.
    path: FPath,
    /// Buffered handle to the file.
    reader: BufReader<File>,
    /// File size in bytes, taken once at open.
    filesz: FileSz,
    /// Logical read position of `reader`; `None` when unknown.
    position: Option<FileOffset>,
    /// Count of bytes read per step of a backward scan.
    backscan_sz: usize,
    /// Reused buffer for backward scans.
    backscan: Bytes,
    /// Internal stats - lines read by [`read_line_at`].
    ///
    /// [`read_line_at`]: LogSource::read_line_at
    pub(crate) lines_read: Count,
    /// Internal stats - bytes read during backward scans.
    pub(crate) bytes_scanned_backward: Count,
    /// Internal stats - seeks performed on `reader`.
    pub(crate) seeks: Count,
}

impl fmt::Debug for LogSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LogSource")
            .field("path", &self.path)
            .field("filesz", &self.filesz)
            .field("position", &self.position)
            .field("backscan_sz", &self.backscan_sz)
            .field("lines_read", &self.lines_read)
            .field("bytes_scanned_backward", &self.bytes_scanned_backward)
            .field("seeks", &self.seeks)
            .finish()
    }
}

impl LogSource {
    /// Open the file at `path` for scanning.
    pub fn open(path: &Path) -> ResultExtract<LogSource> {
        LogSource::open_with_backscan_sz(path, BACKSCAN_SZ_DEF)
    }

    /// Open the file at `path` for scanning, reading `backscan_sz` bytes per
    /// backward scan step.
    pub fn open_with_backscan_sz(path: &Path, backscan_sz: usize) -> ResultExtract<LogSource> {
        defn!("({:?}, {})", path, backscan_sz);
        let file: File = match File::open(path) {
            Ok(val) => val,
            Err(err) => {
                defx!("File::open error {}", err);
                return Err(ExtractError::io(path, err));
            }
        };
        let filesz: FileSz = match file.metadata() {
            Ok(val) => val.len(),
            Err(err) => {
                defx!("File::metadata error {}", err);
                return Err(ExtractError::io(path, err));
            }
        };
        let backscan_sz = std::cmp::max(backscan_sz, BACKSCAN_SZ_MIN);
        let logsource = LogSource {
            path: path.to_string_lossy().to_string(),
            reader: BufReader::new(file),
            filesz,
            position: Some(0),
            backscan_sz,
            backscan: Bytes::with_capacity(backscan_sz),
            lines_read: 0,
            bytes_scanned_backward: 0,
            seeks: 0,
        };
        defx!("return {:?}", logsource);

        Ok(logsource)
    }

    #[inline(always)]
    pub fn path(&self) -> &FPath {
        &self.path
    }

    #[inline(always)]
    pub const fn filesz(&self) -> FileSz {
        self.filesz
    }

    pub const fn count_lines_read(&self) -> Count {
        self.lines_read
    }

    pub const fn count_bytes_scanned_backward(&self) -> Count {
        self.bytes_scanned_backward
    }

    pub const fn count_seeks(&self) -> Count {
        self.seeks
    }

    fn io_err(&self, error: std::io::Error) -> ExtractError {
        ExtractError::Io {
            path: self.path.clone(),
            error,
        }
    }

    /// Move the read position to `offset`. Skips the seek when already
    /// there so sequential line reads keep the `BufReader` buffer.
    fn seek(&mut self, offset: FileOffset) -> ResultExtract<()> {
        if self.position == Some(offset) {
            return Ok(());
        }
        self.seeks += 1;
        match self.reader.seek(SeekFrom::Start(offset)) {
            Ok(_) => {
                self.position = Some(offset);
                Ok(())
            }
            Err(err) => {
                self.position = None;
                Err(self.io_err(err))
            }
        }
    }

    /// Return the offset of the start of the line holding byte `offset`.
    ///
    /// Scans backward from `offset - 1` toward the start of the file for a
    /// `'\n'`. Returns the offset immediately after that `'\n'`, or `0` if
    /// none is found. Returns `0` immediately if `offset` is `0`.
    /// An `offset` past the end of the file is treated as the file size.
    ///
    /// The returned value `s` is always `s <= offset` and either `s == 0` or
    /// the byte at `s - 1` is `'\n'`.
    pub fn line_start(&mut self, offset: FileOffset) -> ResultExtract<FileOffset> {
        defn!("({})", offset);
        let mut end: FileOffset = std::cmp::min(offset, self.filesz);
        while end > 0 {
            let begin: FileOffset = end.saturating_sub(self.backscan_sz as FileOffset);
            let len: usize = (end - begin) as usize;
            self.seek(begin)?;
            self.backscan.resize(len, 0);
            if let Err(err) = self.reader.read_exact(&mut self.backscan[..len]) {
                self.position = None;
                defx!("read_exact error {}", err);
                return Err(self.io_err(err));
            }
            self.position = Some(end);
            self.bytes_scanned_backward += len as Count;
            if let Some(index) = ::memchr::memrchr(NLu8, &self.backscan[..len]) {
                let start: FileOffset = begin + index as FileOffset + 1;
                debug_assert_le!(start, offset, "line start {} is after offset {}", start, offset);
                defx!("return {}", start);
                return Ok(start);
            }
            end = begin;
        }
        defx!("return 0; reached start of file");

        Ok(0)
    }

    /// Return the start of the line preceding the line starting at
    /// `line_offset`.
    ///
    /// Equivalent to `line_start(line_offset - 2)`: skips the preceding line's
    /// own `'\n'` and one more byte. Returns `0` for a `line_offset` before `2`.
    /// An empty preceding line is stepped over.
    pub fn previous_line_start(&mut self, line_offset: FileOffset) -> ResultExtract<FileOffset> {
        match line_offset.checked_sub(2) {
            Some(offset) => self.line_start(offset),
            None => Ok(0),
        }
    }

    /// Read the line starting at `line_offset` into `buffer`, including its
    /// trailing `'\n'` if present.
    ///
    /// Returns the offset after the line; the start of the next line or
    /// the file size. Reading at or after the end of the file reads nothing
    /// and returns `line_offset`.
    pub fn read_line_at(&mut self, line_offset: FileOffset, buffer: &mut Bytes) -> ResultExtract<FileOffset> {
        defn!("({})", line_offset);
        buffer.clear();
        self.seek(line_offset)?;
        let count: usize = match self.reader.read_until(NLu8, buffer) {
            Ok(val) => val,
            Err(err) => {
                self.position = None;
                defx!("read_until error {}", err);
                return Err(self.io_err(err));
            }
        };
        self.lines_read += 1;
        let next: FileOffset = line_offset + count as FileOffset;
        self.position = Some(next);
        #[cfg(any(debug_assertions, test))]
        defx!("return {}; line {:?}", next, buffer_to_String_noraw(buffer));

        Ok(next)
    }
}
