use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Picks the first free report path derived from `base`.
///
/// Returns `base` when it is free, otherwise `stem_1.ext`, `stem_2.ext`, and so
/// on. The check and the later write are not atomic.
pub fn unique_report_path(base: &Path, exists: impl Fn(&Path) -> bool) -> PathBuf {
    if !exists(base) {
        return base.to_path_buf();
    }

    let stem = base.file_stem().unwrap_or(base.as_os_str());
    let extension = base.extension();
    let mut counter = 1_u64;

    loop {
        let mut file_name = OsString::from(stem);
        file_name.push(format!("_{counter}"));
        if let Some(extension) = extension {
            file_name.push(".");
            file_name.push(extension);
        }

        let candidate = base.with_file_name(file_name);
        if !exists(&candidate) {
            return candidate;
        }

        counter = counter.saturating_add(1);
    }
}
