#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EntryType {
    File,
    Directory,
}

/// An item found while walking the tree below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    key: String,
    entry_type: EntryType,
}

impl Entry {
    pub fn new(key: String, entry_type: EntryType) -> Entry {
        Entry { key, entry_type }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn into_key(self) -> String {
        self.key
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// Keys under a prefix, split into files and directories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListedKeys {
    pub keys: Vec<String>,
    pub dirs: Vec<String>,
}
