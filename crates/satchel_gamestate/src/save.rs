//! Save/load system

use satchel_inventory::{ItemCatalog, PlayerInventory, PlayerInventorySnapshot, SnapshotError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Save system errors
#[derive(Debug, Error)]
pub enum SaveError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    /// Version mismatch
    #[error("Version mismatch: save version {0}, current version {1}")]
    VersionMismatch(u32, u32),
    /// Slot not found
    #[error("Save slot not found: {0}")]
    SlotNotFound(String),
    /// Corrupted save
    #[error("Corrupted save data")]
    Corrupted,
    /// Inventory contents could not be rehydrated
    #[error("Invalid inventory snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Result type for save operations
pub type SaveResult<T> = Result<T, SaveError>;

/// Save file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaveFormat {
    /// JSON (human readable)
    Json,
    /// Binary (compact)
    Binary,
}

impl SaveFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "sav",
        }
    }

    fn encode(&self, data: &SaveData) -> SaveResult<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec_pretty(data)
                .map_err(|e| SaveError::Serialization(e.to_string())),
            Self::Binary => {
                bincode::serialize(data).map_err(|e| SaveError::Serialization(e.to_string()))
            }
        }
    }

    fn decode(&self, bytes: &[u8]) -> SaveResult<SaveData> {
        match self {
            Self::Json => serde_json::from_slice(bytes)
                .map_err(|e| SaveError::Deserialization(e.to_string())),
            Self::Binary => {
                bincode::deserialize(bytes).map_err(|e| SaveError::Deserialization(e.to_string()))
            }
        }
    }
}

impl Default for SaveFormat {
    fn default() -> Self {
        Self::Binary
    }
}

/// Save data header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveHeader {
    /// Save format version
    pub version: u32,
    /// Game version
    pub game_version: String,
    /// Save name/title
    pub name: String,
    /// Save timestamp (Unix timestamp)
    pub timestamp: u64,
    /// Play time in seconds
    pub play_time: f64,
}

impl SaveHeader {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SAVE_VERSION,
            game_version: String::new(),
            name: name.into(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
            play_time: 0.0,
        }
    }

    pub fn with_game_version(mut self, version: impl Into<String>) -> Self {
        self.game_version = version.into();
        self
    }

    pub fn with_play_time(mut self, time: f64) -> Self {
        self.play_time = time;
        self
    }
}

/// Complete save data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// Save header
    pub header: SaveHeader,
    /// Player inventory contents
    pub inventory: PlayerInventorySnapshot,
}

impl SaveData {
    /// Create save data with an empty inventory
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            header: SaveHeader::new(name),
            inventory: PlayerInventorySnapshot::default(),
        }
    }

    /// Snapshot a player inventory
    pub fn capture(name: impl Into<String>, inventory: &PlayerInventory) -> Self {
        Self {
            inventory: inventory.snapshot(),
            ..Self::new(name)
        }
    }

    pub fn with_header(mut self, header: SaveHeader) -> Self {
        self.header = header;
        self
    }

    /// Replace the contents of `inventory` with the saved ones
    pub fn restore_into(&self, inventory: &mut PlayerInventory, catalog: &ItemCatalog) -> SaveResult<()> {
        inventory.restore(&self.inventory, catalog)?;
        Ok(())
    }
}

/// Save slot info (for displaying in UI)
#[derive(Debug, Clone)]
pub struct SaveSlot {
    /// Slot identifier
    pub id: String,
    /// Save header (or None if empty)
    pub header: Option<SaveHeader>,
    /// File path
    pub path: PathBuf,
}

impl SaveSlot {
    pub fn empty(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            header: None,
            path: path.into(),
        }
    }

    pub fn occupied(id: impl Into<String>, path: impl Into<PathBuf>, header: SaveHeader) -> Self {
        Self {
            id: id.into(),
            header: Some(header),
            path: path.into(),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.header.is_some()
    }

    fn timestamp(&self) -> u64 {
        self.header.as_ref().map(|h| h.timestamp).unwrap_or(0)
    }
}

/// Save manager
///
/// One file per slot in `save_dir`, named `<slot>.<ext>`.
pub struct SaveManager {
    /// Base save directory
    save_dir: PathBuf,
    /// Save file format
    format: SaveFormat,
    /// Newest save version this build reads
    version: u32,
    /// Cached slot info
    slots: HashMap<String, SaveSlot>,
}

impl SaveManager {
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        Self {
            save_dir: save_dir.into(),
            format: SaveFormat::default(),
            version: SAVE_VERSION,
            slots: HashMap::new(),
        }
    }

    pub fn with_format(mut self, format: SaveFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn format(&self) -> SaveFormat {
        self.format
    }

    /// Ensure save directory exists
    pub fn ensure_dir(&self) -> SaveResult<()> {
        fs::create_dir_all(&self.save_dir)?;
        Ok(())
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.save_dir
            .join(format!("{}.{}", slot, self.format.extension()))
    }

    /// Save game to slot
    pub fn save(&mut self, slot: &str, data: &SaveData) -> SaveResult<()> {
        self.ensure_dir()?;

        let path = self.slot_path(slot);
        let bytes = self.format.encode(data)?;
        fs::write(&path, bytes)?;

        log::debug!("Saved '{}' to {}", data.header.name, path.display());

        self.slots.insert(
            slot.to_string(),
            SaveSlot::occupied(slot, path, data.header.clone()),
        );
        Ok(())
    }

    /// Load game from slot
    pub fn load(&self, slot: &str) -> SaveResult<SaveData> {
        let path = self.slot_path(slot);

        if !path.exists() {
            return Err(SaveError::SlotNotFound(slot.to_string()));
        }

        let bytes = fs::read(&path)?;
        if bytes.is_empty() {
            log::warn!("Save file {} is empty", path.display());
            return Err(SaveError::Corrupted);
        }

        let data = self.format.decode(&bytes)?;

        if data.header.version > self.version {
            return Err(SaveError::VersionMismatch(data.header.version, self.version));
        }

        Ok(data)
    }

    /// Delete a save slot
    pub fn delete(&mut self, slot: &str) -> SaveResult<()> {
        let path = self.slot_path(slot);

        if path.exists() {
            fs::remove_file(&path)?;
        }

        self.slots.remove(slot);
        Ok(())
    }

    pub fn exists(&self, slot: &str) -> bool {
        self.slot_path(slot).exists()
    }

    /// Get slot info
    pub fn get_slot(&mut self, slot: &str) -> SaveResult<SaveSlot> {
        if let Some(cached) = self.slots.get(slot) {
            return Ok(cached.clone());
        }

        let path = self.slot_path(slot);

        let slot_info = if path.exists() {
            let data = self.load(slot)?;
            SaveSlot::occupied(slot, path, data.header)
        } else {
            SaveSlot::empty(slot, path)
        };

        self.slots.insert(slot.to_string(), slot_info.clone());
        Ok(slot_info)
    }

    /// List all readable save slots, newest first
    pub fn list_slots(&mut self) -> SaveResult<Vec<SaveSlot>> {
        self.ensure_dir()?;

        let ext = self.format.extension();
        let mut slots = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();

            if path.extension().map(|e| e == ext).unwrap_or(false) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    match self.get_slot(stem) {
                        Ok(slot) => slots.push(slot),
                        Err(e) => log::warn!("Skipping unreadable save {}: {}", path.display(), e),
                    }
                }
            }
        }

        slots.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()).then_with(|| a.id.cmp(&b.id)));
        Ok(slots)
    }

    /// Quick save
    pub fn quicksave(&mut self, data: &SaveData) -> SaveResult<()> {
        self.save("quicksave", data)
    }

    /// Quick load
    pub fn quickload(&self) -> SaveResult<SaveData> {
        self.load("quicksave")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use satchel_inventory::{InventoryConfig, ItemDefinition};

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_toml_str(
            r#"
[[items]]
id = "potion"
display_name = "Potion"
max_stack_size = 10
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_save_header() {
        let header = SaveHeader::new("My Save")
            .with_game_version("1.0.0")
            .with_play_time(3600.0);

        assert_eq!(header.name, "My Save");
        assert_eq!(header.version, SAVE_VERSION);
        assert_eq!(header.game_version, "1.0.0");
        assert_eq!(header.play_time, 3600.0);
    }

    #[test]
    fn test_save_data_holds_header_and_inventory_only() {
        let value = serde_json::to_value(SaveData::new("Shape")).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort_unstable();

        assert_eq!(keys, vec!["header", "inventory"]);
    }

    #[test]
    fn test_capture_and_restore() {
        let catalog = catalog();
        let potion = catalog.get("potion").unwrap();

        let mut inventory = PlayerInventory::new(InventoryConfig::default());
        inventory.add_item_smart(&potion, 14);
        let save = SaveData::capture("Test", &inventory);

        let mut fresh = PlayerInventory::new(InventoryConfig::default());
        save.restore_into(&mut fresh, &catalog).unwrap();

        assert_eq!(fresh.snapshot(), inventory.snapshot());
    }

    #[test]
    fn test_restore_unknown_item() {
        let mut other = ItemCatalog::new();
        let elixir = other
            .register(ItemDefinition::new("elixir", "Elixir"))
            .unwrap();

        let mut inventory = PlayerInventory::default();
        inventory.try_add_item(&elixir, 1);
        let save = SaveData::capture("Test", &inventory);

        let mut fresh = PlayerInventory::default();
        assert!(matches!(
            save.restore_into(&mut fresh, &catalog()),
            Err(SaveError::Snapshot(SnapshotError::UnknownItem(_)))
        ));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(SaveFormat::Json.extension(), "json");
        assert_eq!(SaveFormat::Binary.extension(), "sav");
        assert_eq!(SaveFormat::default(), SaveFormat::Binary);
    }

    #[test]
    fn test_save_manager() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = SaveManager::new(dir.path()).with_format(SaveFormat::Json);

        manager.save("slot1", &SaveData::new("Test Save")).unwrap();
        assert!(manager.exists("slot1"));
        assert!(dir.path().join("slot1.json").exists());

        let loaded = manager.load("slot1").unwrap();
        assert_eq!(loaded.header.name, "Test Save");

        manager.delete("slot1").unwrap();
        assert!(!manager.exists("slot1"));
        assert!(matches!(manager.load("slot1"), Err(SaveError::SlotNotFound(_))));
    }
}
