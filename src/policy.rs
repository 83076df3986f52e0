use crate::constants::{EXECUTABLE_EXTENSIONS, SYSTEM_DIRECTORY_NAMES};
use std::path::Path;

/// Host predicates the sweep consults while walking. Swapped out in tests.
pub trait SystemPolicy: Send + Sync {
    /// True when the directory itself carries the OS system attribute.
    fn has_system_attribute(&self, dir: &Path) -> bool;

    /// True when the directory is an OS-reserved location that must never be
    /// classified.
    fn is_system_directory(&self, dir: &Path) -> bool;

    fn is_executable_extension(&self, extension: &str) -> bool;
}

/// Policy backed by the running host: Windows file attributes where
/// available, fixed name lists otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPolicy;

impl SystemPolicy for HostPolicy {
    #[cfg(windows)]
    fn has_system_attribute(&self, dir: &Path) -> bool {
        use std::os::windows::fs::MetadataExt;
        const FILE_ATTRIBUTE_SYSTEM: u32 = 0x4;
        std::fs::metadata(dir)
            .map(|metadata| metadata.file_attributes() & FILE_ATTRIBUTE_SYSTEM != 0)
            .unwrap_or(false)
    }

    #[cfg(not(windows))]
    fn has_system_attribute(&self, _dir: &Path) -> bool {
        false
    }

    fn is_system_directory(&self, dir: &Path) -> bool {
        dir.file_name().is_some_and(|name| {
            let name = name.to_string_lossy().to_lowercase();
            SYSTEM_DIRECTORY_NAMES.contains(&name.as_str())
        })
    }

    fn is_executable_extension(&self, extension: &str) -> bool {
        EXECUTABLE_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
    }
}
