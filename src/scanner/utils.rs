use crate::policy::SystemPolicy;
use jwalk::WalkDir;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Immediate contents of a directory: top-level file count and subdirectory
/// paths.
pub(crate) struct DirectoryListing {
    pub files: usize,
    pub subdirectories: Vec<PathBuf>,
}

pub(crate) fn list_directory(dir: &Path) -> io::Result<DirectoryListing> {
    let mut listing = DirectoryListing {
        files: 0,
        subdirectories: Vec::new(),
    };

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            listing.subdirectories.push(entry.path());
        } else if file_type.is_file() {
            listing.files += 1;
        }
    }

    // Sorted so repeat sweeps emit candidates in the same order whatever the
    // readdir order was.
    listing.subdirectories.sort_unstable();
    Ok(listing)
}

/// Totals over an entire subtree.
#[derive(Debug, Default)]
pub(crate) struct SubtreeCensus {
    pub files: usize,
    pub bytes: u64,
    pub has_executable: bool,
}

pub(crate) fn take_census<P: SystemPolicy>(dir: &Path, policy: &P) -> io::Result<SubtreeCensus> {
    let mut census = SubtreeCensus::default();

    // Serial walk keeps enumeration blocking and in traversal order.
    for entry in WalkDir::new(dir)
        .skip_hidden(false)
        .parallelism(jwalk::Parallelism::Serial)
        .into_iter()
    {
        let entry = entry.map_err(io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }
        census.files += 1;
        if let Ok(metadata) = entry.metadata() {
            census.bytes += metadata.len();
        }
        if !census.has_executable
            && let Some(extension) = entry.path().extension()
            && policy.is_executable_extension(&extension.to_string_lossy())
        {
            census.has_executable = true;
        }
    }

    Ok(census)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::HostPolicy;
    use anyhow::Result;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn listing_separates_files_from_subdirectories() -> Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        File::create(dir.path().join("b.txt"))?;
        fs::create_dir(dir.path().join("Zeta"))?;
        fs::create_dir(dir.path().join("Alpha"))?;

        let listing = list_directory(dir.path())?;
        assert_eq!(listing.files, 2);
        assert_eq!(
            listing.subdirectories,
            [dir.path().join("Alpha"), dir.path().join("Zeta")]
        );
        Ok(())
    }

    #[test]
    fn census_totals_the_whole_subtree() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested)?;
        let mut top = File::create(dir.path().join("top.txt"))?;
        top.write_all(&[0u8; 100])?;
        let mut deep = File::create(nested.join("deep.txt"))?;
        deep.write_all(&[0u8; 200])?;

        let census = take_census(dir.path(), &HostPolicy)?;
        assert_eq!(census.files, 2);
        assert_eq!(census.bytes, 300);
        assert!(!census.has_executable);
        Ok(())
    }

    #[test]
    fn census_spots_executables_at_any_depth() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("plugins");
        fs::create_dir(&nested)?;
        File::create(nested.join("helper.EXE"))?;

        let census = take_census(dir.path(), &HostPolicy)?;
        assert!(census.has_executable);
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_error() {
        let missing = Path::new("/no/such/leftovers-test-dir");
        assert!(list_directory(missing).is_err());
        assert!(take_census(missing, &HostPolicy).is_err());
    }
}
