/// Generic directory names that say little about ownership either way.
pub const QUESTIONABLE_DIRECTORY_NAMES: &[&str] = &[
    "bin", "cache", "common", "config", "data", "files", "install", "settings", "setup", "temp",
    "tools", "update", "users",
];

pub const EXECUTABLE_EXTENSIONS: &[&str] = &[
    "exe", "com", "bat", "cmd", "scr", "msi", "msp", "dll", "ocx", "sys",
];

pub const SYSTEM_DIRECTORY_NAMES: &[&str] = &[
    "windows",
    "windows.old",
    "winsxs",
    "system volume information",
    "$recycle.bin",
    "recycler",
    "config.msi",
    "windowsapps",
    "perflogs",
];

pub const MANY_FILES_THRESHOLD: usize = 100;
pub const MAX_NESTING_LEVEL: i32 = 1;

pub const CONFIG_DIR: &str = "leftovers";
pub const QUESTIONABLE_NAMES_FILE: &str = "questionable-names.txt";
