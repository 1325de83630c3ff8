//! In-memory world and membership for tests and headless runs
//!
//! Records everything the engine asks of it so callers can inspect placed
//! containers, broadcasts, applied effects and damage afterwards.

use indexmap::IndexMap;
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use windfall_core::{
    BlockPos, DefId, ItemStack, Membership, Notice, ParticipantId, Registry, StatusEffect, Surface,
    VisualCue, World,
};

const MATERIALS: &[&str] = &[
    "DIAMOND",
    "DIAMOND_SWORD",
    "NETHERITE_SCRAP",
    "GOLDEN_APPLE",
    "IRON_INGOT",
    "GOLD_INGOT",
    "EMERALD",
    "BREAD",
    "ARROW",
    "BOW",
    "ELYTRA",
];

const ENCHANTMENTS: &[&str] = &[
    "SHARPNESS",
    "PROTECTION",
    "UNBREAKING",
    "EFFICIENCY",
    "FORTUNE",
    "MENDING",
    "POWER",
];

const STATUS_EFFECTS: &[&str] = &[
    "STRENGTH",
    "SPEED",
    "MINING_FATIGUE",
    "REGENERATION",
    "WEAKNESS",
    "SLOWNESS",
    "JUMP_BOOST",
    "NIGHT_VISION",
    "HASTE",
];

/// Starting health of a participant
pub const FULL_HEALTH: f64 = 20.0;

/// Per-participant state held by [`MemoryWorld`]
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantState {
    pub online: bool,
    pub privileged: bool,
    pub under_open_sky: bool,
    pub health: f64,
    pub effects: Vec<StatusEffect>,
    pub inbox: Vec<Notice>,
}

impl Default for ParticipantState {
    fn default() -> Self {
        Self {
            online: true,
            privileged: false,
            under_open_sky: true,
            health: FULL_HEALTH,
            effects: Vec::new(),
            inbox: Vec::new(),
        }
    }
}

/// A container the engine placed
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedContainer {
    pub world: String,
    pub pos: BlockPos,
    pub items: Vec<ItemStack>,
}

/// A world held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryWorld {
    name: String,
    surfaces: HashMap<(i32, i32), Surface>,
    default_surface: Option<Surface>,
    participants: IndexMap<ParticipantId, ParticipantState>,
    containers: Vec<PlacedContainer>,
    cues: Vec<(BlockPos, VisualCue)>,
    broadcasts: Vec<String>,
    surface_queries: Cell<usize>,
}

impl MemoryWorld {
    /// An empty world with no surfaces and nobody online
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the surface of one column
    pub fn with_surface(mut self, x: i32, z: i32, surface: Surface) -> Self {
        self.surfaces.insert((x, z), surface);
        self
    }

    /// Surface returned for columns without an explicit one
    pub fn with_default_surface(mut self, surface: Surface) -> Self {
        self.default_surface = Some(surface);
        self
    }

    /// Set the surface of one column on an existing world
    pub fn set_surface(&mut self, x: i32, z: i32, surface: Surface) {
        self.surfaces.insert((x, z), surface);
    }

    /// Bring a participant online (creating them if needed)
    pub fn join(&mut self, id: ParticipantId) -> &mut ParticipantState {
        let state = self.participants.entry(id).or_default();
        state.online = true;
        state
    }

    /// Take a participant offline; they become unreachable
    pub fn disconnect(&mut self, id: ParticipantId) {
        if let Some(state) = self.participants.get_mut(&id) {
            state.online = false;
        }
    }

    /// Move a participant into or out of the open sky
    pub fn set_under_open_sky(&mut self, id: ParticipantId, under_open_sky: bool) {
        if let Some(state) = self.participants.get_mut(&id) {
            state.under_open_sky = under_open_sky;
        }
    }

    /// State of one participant
    pub fn participant(&self, id: ParticipantId) -> Option<&ParticipantState> {
        self.participants.get(&id)
    }

    /// Damage taken so far by a participant
    pub fn damage_taken(&self, id: ParticipantId) -> f64 {
        self.participants
            .get(&id)
            .map(|state| FULL_HEALTH - state.health)
            .unwrap_or(0.0)
    }

    pub fn containers(&self) -> &[PlacedContainer] {
        &self.containers
    }

    pub fn cues(&self) -> &[(BlockPos, VisualCue)] {
        &self.cues
    }

    pub fn broadcasts(&self) -> &[String] {
        &self.broadcasts
    }

    /// How many times `surface_at` has been called
    pub fn surface_queries(&self) -> usize {
        self.surface_queries.get()
    }

    fn online(&self, id: ParticipantId) -> Option<&ParticipantState> {
        self.participants.get(&id).filter(|state| state.online)
    }

    fn online_mut(&mut self, id: ParticipantId) -> Option<&mut ParticipantState> {
        self.participants.get_mut(&id).filter(|state| state.online)
    }
}

fn lookup(known: &[&str], id: &str) -> Option<DefId> {
    let upper = id.to_ascii_uppercase();
    known
        .iter()
        .any(|k| *k == upper)
        .then(|| DefId::new(upper))
}

impl Registry for MemoryWorld {
    fn material(&self, id: &str) -> Option<DefId> {
        lookup(MATERIALS, id)
    }

    fn enchantment(&self, id: &str) -> Option<DefId> {
        lookup(ENCHANTMENTS, id)
    }

    fn status_effect(&self, id: &str) -> Option<DefId> {
        lookup(STATUS_EFFECTS, id)
    }
}

impl World for MemoryWorld {
    fn has_world(&self, world: &str) -> bool {
        world == self.name
    }

    fn surface_at(&self, world: &str, x: i32, z: i32) -> Option<Surface> {
        self.surface_queries.set(self.surface_queries.get() + 1);
        if world != self.name {
            return None;
        }
        self.surfaces.get(&(x, z)).copied().or(self.default_surface)
    }

    fn place_container(&mut self, world: &str, pos: BlockPos, items: &[ItemStack]) {
        self.containers.push(PlacedContainer {
            world: world.to_string(),
            pos,
            items: items.to_vec(),
        });
    }

    fn spawn_visual_cue(&mut self, _world: &str, pos: BlockPos, cue: &VisualCue) {
        self.cues.push((pos, cue.clone()));
    }

    fn online_participants(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|(_, state)| state.online)
            .map(|(id, _)| *id)
            .collect()
    }

    fn privileged_participants(&self) -> Vec<ParticipantId> {
        self.participants
            .iter()
            .filter(|(_, state)| state.online && state.privileged)
            .map(|(id, _)| *id)
            .collect()
    }

    fn broadcast(&mut self, message: &str) {
        self.broadcasts.push(message.to_string());
    }

    fn whisper(&mut self, to: ParticipantId, notice: &Notice) {
        if let Some(state) = self.online_mut(to) {
            state.inbox.push(notice.clone());
        }
    }

    fn apply_status_effect(&mut self, to: ParticipantId, effect: &StatusEffect) -> bool {
        match self.online_mut(to) {
            Some(state) => {
                state.effects.push(effect.clone());
                true
            }
            None => false,
        }
    }

    fn is_under_open_sky(&self, who: ParticipantId) -> Option<bool> {
        self.online(who).map(|state| state.under_open_sky)
    }

    fn damage(&mut self, who: ParticipantId, amount: f64) -> bool {
        match self.online_mut(who) {
            Some(state) => {
                state.health = (state.health - amount).max(0.0);
                true
            }
            None => false,
        }
    }
}

/// Group membership held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryMembership {
    groups: Vec<String>,
    assignments: HashMap<ParticipantId, String>,
}

impl MemoryMembership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a group (idempotent)
    pub fn add_group(&mut self, group: impl Into<String>) {
        let group = group.into();
        if !self.groups.contains(&group) {
            self.groups.push(group);
        }
    }

    /// Put a participant in a group, registering the group if needed
    pub fn assign(&mut self, participant: ParticipantId, group: impl Into<String>) {
        let group = group.into();
        self.add_group(group.clone());
        self.assignments.insert(participant, group);
    }

    /// Remove a participant from their group
    pub fn unassign(&mut self, participant: ParticipantId) {
        self.assignments.remove(&participant);
    }

    /// Members of a group, in no particular order
    pub fn members(&self, group: &str) -> HashSet<ParticipantId> {
        self.assignments
            .iter()
            .filter(|(_, g)| g.as_str() == group)
            .map(|(p, _)| *p)
            .collect()
    }
}

impl Membership for MemoryMembership {
    fn groups(&self) -> Vec<String> {
        self.groups.clone()
    }

    fn group_of(&self, participant: ParticipantId) -> Option<String> {
        self.assignments.get(&participant).cloned()
    }
}
