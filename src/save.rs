//! Save/restore of run progress as pretty-printed JSON.
//!
//! Only progress is persisted (level, score, floor, potions and run totals),
//! never the live floor: loading regenerates the saved floor number.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::systems::inventory::PotionCounts;

/// The persisted snapshot. Missing fields in an older file take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveData {
    pub player_name: String,
    pub player_level: u32,
    pub player_health: i32,
    pub player_max_health: i32,
    pub player_experience: u32,
    pub score: u32,
    pub enemies_killed: u32,
    pub current_floor: u32,
    pub play_time: f32,
    pub current_weapon: String,
    pub potions: PotionCounts,
    pub total_damage_dealt: u64,
    pub total_damage_taken: u64,
    pub potions_used: u32,
    pub highest_floor: u32,
    pub last_save_time: String,
}

impl Default for SaveData {
    fn default() -> Self {
        Self {
            player_name: crate::constants::PLAYER_DEFAULT_NAME.to_string(),
            player_level: 1,
            player_health: crate::constants::PLAYER_BASE_HEALTH,
            player_max_health: crate::constants::PLAYER_BASE_HEALTH,
            player_experience: 0,
            score: 0,
            enemies_killed: 0,
            current_floor: 1,
            play_time: 0.0,
            current_weapon: "Wooden Sword".to_string(),
            potions: PotionCounts::default(),
            total_damage_dealt: 0,
            total_damage_taken: 0,
            potions_used: 0,
            highest_floor: 1,
            last_save_time: String::new(),
        }
    }
}

/// Seconds since the Unix epoch, as a string
pub fn current_timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
        .to_string()
}

/// Where saves live. The previous save is copied to the backup path before
/// every overwrite.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
    backup_path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path: backup_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the snapshot, stamping the save time
    pub fn save(&self, data: &SaveData) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        if self.exists() {
            if let Err(e) = fs::copy(&self.path, &self.backup_path) {
                warn!("Could not back up {}: {}", self.path.display(), e);
            }
        }

        let mut data = data.clone();
        data.last_save_time = current_timestamp();

        let file = File::create(&self.path)?;
        write_save(file, &data)?;
        info!(
            "Game saved to {} (floor {}, level {})",
            self.path.display(),
            data.current_floor,
            data.player_level
        );
        Ok(())
    }

    pub fn load(&self) -> Result<SaveData, SaveError> {
        let file = File::open(&self.path).map_err(|_| SaveError::NotFound)?;
        let data: SaveData = serde_json::from_reader(BufReader::new(file))?;
        info!("Game loaded from {}", self.path.display());
        Ok(data)
    }

    /// Load if possible; any failure is logged and treated as "no save"
    pub fn load_or_none(&self) -> Option<SaveData> {
        match self.load() {
            Ok(data) => Some(data),
            Err(SaveError::NotFound) => None,
            Err(e) => {
                warn!("Ignoring unreadable save {}: {}", self.path.display(), e);
                None
            }
        }
    }

    pub fn delete(&self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted save {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Serialize a save and flush it, so write errors reach the caller
fn write_save(writer: impl Write, data: &SaveData) -> Result<(), SaveError> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, data)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> (PathBuf, SaveStore) {
        let dir = std::env::temp_dir().join(format!("dungeon-crawler-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let store = SaveStore::new(dir.join("savegame.json"), dir.join("savegame_backup.json"));
        (dir, store)
    }

    #[test]
    fn test_save_and_load() {
        let (dir, store) = temp_store("roundtrip");
        let data = SaveData {
            player_name: "Ayla".to_string(),
            player_level: 7,
            score: 1200,
            potions: PotionCounts {
                health: 2,
                mana: 1,
                ..Default::default()
            },
            ..Default::default()
        };

        store.save(&data).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.player_name, "Ayla");
        assert_eq!(loaded.player_level, 7);
        assert_eq!(loaded.potions.health, 2);
        assert!(!loaded.last_save_time.is_empty());

        let _ = fs::remove_dir_all(dir);
    }

    /// Accepts nothing, like a full disk
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_error_is_reported() {
        let result = write_save(FullDisk, &SaveData::default());
        assert!(matches!(result, Err(SaveError::Io(_))));
    }

    #[test]
    fn test_write_save_flushes_everything() {
        let mut buffer = Vec::new();
        write_save(&mut buffer, &SaveData::default()).unwrap();
        let parsed: SaveData = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.player_name, SaveData::default().player_name);
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let json = serde_json::to_string_pretty(&SaveData::default()).unwrap();
        for key in ["\"playerName\"", "\"playerMaxHealth\"", "\"enemiesKilled\"", "\"lastSaveTime\"", "\"mana\""] {
            assert!(json.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_missing_fields_default() {
        let data: SaveData = serde_json::from_str(r#"{ "playerLevel": 12, "potions": { "rage": 3 } }"#).unwrap();
        assert_eq!(data.player_level, 12);
        assert_eq!(data.potions.rage, 3);
        assert_eq!(data.current_weapon, "Wooden Sword");
        assert_eq!(data.current_floor, 1);
    }

    #[test]
    fn test_backup_written_on_overwrite() {
        let (dir, store) = temp_store("backup");
        let first = SaveData {
            score: 10,
            ..Default::default()
        };
        store.save(&first).unwrap();
        assert!(!store.backup_path().exists());

        let second = SaveData {
            score: 20,
            ..Default::default()
        };
        store.save(&second).unwrap();
        let backup: SaveData = serde_json::from_str(&fs::read_to_string(store.backup_path()).unwrap()).unwrap();
        assert_eq!(backup.score, 10);
        assert_eq!(store.load().unwrap().score, 20);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_missing_or_corrupt_save_loads_as_none() {
        let (dir, store) = temp_store("corrupt");
        assert!(matches!(store.load(), Err(SaveError::NotFound)));
        assert_eq!(store.load_or_none(), None);

        fs::create_dir_all(&dir).unwrap();
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(SaveError::Serialization(_))));
        assert_eq!(store.load_or_none(), None);

        store.delete().unwrap();
        assert!(!store.exists());
        store.delete().unwrap();

        let _ = fs::remove_dir_all(dir);
    }
}
