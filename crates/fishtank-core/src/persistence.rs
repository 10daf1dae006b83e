//! Save/Load functionality for persisting game state
//!
//! Uses bincode for compact binary serialization. Fish entities in storage
//! and the tank are serialized as ordered records and respawned on load;
//! the free-swimming pool is not saved, only the area that populated it.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use bincode::Options;
use fishtank_logic::area::Area;
use hecs::{Entity, World};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::*;
use crate::engine::GameEngine;
use crate::systems::FishPool;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Upper bound on the encoded save size; larger length prefixes are rejected
/// before anything is allocated.
pub const MAX_SAVE_BYTES: u64 = 64 * 1024 * 1024;

/// Fixed-width little-endian encoding, the same layout as `bincode::serialize`,
/// capped at [`MAX_SAVE_BYTES`].
fn save_options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_SAVE_BYTES)
}

/// Serializable snapshot of the game state
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    pub player: Player,
    /// Area the player was in
    pub area: Area,
    /// Area that populated the free-swimming pool
    pub pool_area: Area,
    pub unlocked_areas: Vec<Area>,
    /// Storage contents, in display order
    pub stored_fish: Vec<FishRecord>,
    /// Tank contents, in display order
    pub tank_fish: Vec<FishRecord>,
}

/// One fish entity with its components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishRecord {
    pub fish: Fish,
    pub position: Position,
    pub velocity: Velocity,
}

/// Errors that can occur during save/load
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Bincode(#[from] Box<bincode::ErrorKind>),
    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Result of loading a game
pub struct LoadedGame {
    pub world: World,
    /// Player with storage and tank handles pointing into `world`
    pub player: Player,
    pub area: Area,
    pub pool_area: Area,
}

/// How a session started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    NewGame,
    Loaded,
    /// The save existed but could not be read; a new game was started
    Corrupted,
}

fn records(world: &World, handles: &[Entity]) -> Vec<FishRecord> {
    handles
        .iter()
        .filter_map(|&entity| {
            let fish = world.get::<&Fish>(entity).ok()?;
            let position = world.get::<&Position>(entity).map(|p| *p).unwrap_or_default();
            let velocity = world.get::<&Velocity>(entity).map(|v| *v).unwrap_or_default();
            Some(FishRecord {
                fish: (*fish).clone(),
                position,
                velocity,
            })
        })
        .collect()
}

fn respawn(world: &mut World, records: Vec<FishRecord>, location: Location) -> Vec<Entity> {
    records
        .into_iter()
        .map(|r| world.spawn((r.fish, r.position, r.velocity, location)))
        .collect()
}

/// Save the complete game to a writer
pub fn save_game<W: Write>(
    writer: W,
    world: &World,
    player: &Player,
    area: Area,
    pool: &FishPool,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        player: player.clone(),
        area,
        pool_area: pool.area,
        unlocked_areas: player.unlocked_areas.iter().copied().collect(),
        stored_fish: records(world, &player.stored_fish),
        tank_fish: records(world, &player.tank_fish),
    };

    save_options().serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a game from a reader
pub fn load_game<R: Read>(reader: R) -> Result<LoadedGame, SaveError> {
    let save_data: SaveData = save_options().deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    let mut player = save_data.player;
    player.unlocked_areas = save_data.unlocked_areas.into_iter().collect();
    player.stored_fish = respawn(&mut world, save_data.stored_fish, Location::Storage);
    player.tank_fish = respawn(&mut world, save_data.tank_fish, Location::Tank);

    Ok(LoadedGame {
        world,
        player,
        area: save_data.area,
        pool_area: save_data.pool_area,
    })
}

/// Write the engine's state to `path`, replacing any previous save only
/// once the new one is fully on disk.
pub fn save_to_path<P: AsRef<Path>>(engine: &GameEngine, path: P) -> Result<(), SaveError> {
    let path = path.as_ref();
    let tmp = path.with_extension("tmp");

    let mut writer = BufWriter::new(File::create(&tmp)?);
    engine.save(&mut writer)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()?;
    fs::rename(&tmp, path)?;

    log::info!("Saved game to {}", path.display());
    Ok(())
}

/// Resume the session stored at `path` into `engine`.
///
/// A missing or empty file starts a new game. An unreadable file is logged
/// and also starts a new game. Neither case is an error for the caller.
pub fn resume<P: AsRef<Path>>(engine: &mut GameEngine, path: P) -> SessionStart {
    let path = path.as_ref();
    let has_save = fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);
    if !has_save {
        engine.player.add_message("New Game Started!");
        return SessionStart::NewGame;
    }

    let result = File::open(path)
        .map_err(SaveError::from)
        .and_then(|file| engine.load(BufReader::new(file)));

    match result {
        Ok(()) => {
            engine.player.add_message("Game Loaded!");
            SessionStart::Loaded
        }
        Err(e) => {
            log::warn!("Could not load {}: {}", path.display(), e);
            engine.reset();
            engine
                .player
                .add_message("Save file is corrupted. Starting a new game.");
            SessionStart::Corrupted
        }
    }
}
