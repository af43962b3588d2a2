use log::debug;
use std::env;
use std::path::PathBuf;

pub const MEMORY_FILE: &str = "memory.json";

pub const MEMORY_PATH_ENV: &str = "LOAN_INTEREST_MEMORY";

// env override, then beside the executable, then the working directory
pub fn memory_path() -> PathBuf {
    if let Some(path) = env::var_os(MEMORY_PATH_ENV).filter(|p| !p.is_empty()) {
        debug!("memory file taken from {}", MEMORY_PATH_ENV);
        return PathBuf::from(path);
    }

    match env::current_exe() {
        Ok(exe) => match exe.parent() {
            Some(dir) => dir.join(MEMORY_FILE),
            None => PathBuf::from(MEMORY_FILE),
        },
        Err(e) => {
            debug!("cannot locate executable ({}), using working directory", e);
            PathBuf::from(MEMORY_FILE)
        }
    }
}
