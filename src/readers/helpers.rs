// src/readers/helpers.rs

//! Miscellaneous helper functions for _Readers_.

use crate::common::{ExtractError, FPath, FileSz, Path, ResultExtract};

use std::io::ErrorKind;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

/// Helper function for a slightly annoying set of calls.
pub fn path_to_fpath(path: &Path) -> FPath {
    path.to_string_lossy().to_string()
}

/// Helper function for completeness.
pub fn fpath_to_path(path: &FPath) -> &Path {
    Path::new(path)
}

/// Return the size of the file.
///
/// A path that is not a regular file is an error.
pub fn path_filesz(path: &Path) -> ResultExtract<FileSz> {
    defn!("({:?})", path);
    let metadata = match std::fs::metadata(path) {
        Ok(val) => val,
        Err(err) => {
            defx!("error {}", err);
            return Err(ExtractError::io(path, err));
        }
    };
    if !metadata.is_file() {
        defx!("not a file");
        return Err(ExtractError::io(
            path,
            std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
        ));
    }
    let len: FileSz = metadata.len();
    defx!("return {}", len);

    Ok(len)
}

/// Create every missing directory leading to file `path`.
///
/// A bare file name has no parent to create.
pub fn create_parent_dirs(path: &Path) -> ResultExtract<()> {
    defn!("({:?})", path);
    let parent: &Path = match path.parent() {
        Some(val) if !val.as_os_str().is_empty() => val,
        _ => {
            defx!("no parent directory");
            return Ok(());
        }
    };
    match std::fs::create_dir_all(parent) {
        Ok(_) => {
            defx!("created {:?}", parent);
            Ok(())
        }
        Err(err) => {
            defx!("create_dir_all error {}", err);
            Err(ExtractError::io(parent, err))
        }
    }
}
