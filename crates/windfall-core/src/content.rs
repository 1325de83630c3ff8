//! Concrete content produced by the engine and handed to the world

use crate::{DefId, Tick};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A block coordinate in some world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    /// Create a new position
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The position directly above this one
    pub fn above(&self) -> Self {
        Self::new(self.x, self.y.saturating_add(1), self.z)
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// The highest occupied cell of a world column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    /// Height of the highest occupied block
    pub y: i32,
    /// Whether the block can carry a container
    pub solid: bool,
    /// Water, lava, etc.
    pub liquid: bool,
}

impl Surface {
    /// A solid, dry surface at height `y`
    pub fn solid(y: i32) -> Self {
        Self {
            y,
            solid: true,
            liquid: false,
        }
    }

    /// A liquid surface at height `y`
    pub fn liquid(y: i32) -> Self {
        Self {
            y,
            solid: false,
            liquid: true,
        }
    }
}

/// A concrete stack of items placed into a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub material: DefId,
    pub amount: u32,
    /// Display name with colour codes already translated
    pub display_name: Option<String>,
    pub lore: Vec<String>,
    /// Enchantment id to level
    pub enchantments: IndexMap<DefId, u32>,
}

impl ItemStack {
    /// A plain stack with no metadata
    pub fn new(material: impl Into<DefId>, amount: u32) -> Self {
        Self {
            material: material.into(),
            amount,
            display_name: None,
            lore: Vec::new(),
            enchantments: IndexMap::new(),
        }
    }
}

/// A timed potion/status effect applied to a participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: DefId,
    pub duration_ticks: Tick,
    /// Zero-based amplifier (level 1 is amplifier 0)
    pub amplifier: u32,
}

/// RGB colour for visual cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const RED: Color = Color(255, 0, 0);
    pub const YELLOW: Color = Color(255, 255, 0);
}

/// A visual marker spawned where content lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualCue {
    Firework {
        colors: Vec<Color>,
        flicker: bool,
        power: u8,
    },
}

impl Default for VisualCue {
    fn default() -> Self {
        VisualCue::Firework {
            colors: vec![Color::RED, Color::YELLOW],
            flicker: true,
            power: 1,
        }
    }
}

/// A message sent to one participant, optionally clickable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    /// Command run when the message is clicked
    pub click_command: Option<String>,
    /// Tooltip shown on hover
    pub hover: Option<String>,
}

impl Notice {
    /// A plain, non-interactive notice
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            click_command: None,
            hover: None,
        }
    }

    /// Attach a click-to-run command
    pub fn on_click(mut self, command: impl Into<String>) -> Self {
        self.click_command = Some(command.into());
        self
    }

    /// Attach hover text
    pub fn with_hover(mut self, hover: impl Into<String>) -> Self {
        self.hover = Some(hover.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_pos_above() {
        let pos = BlockPos::new(3, 64, -2);
        assert_eq!(pos.above(), BlockPos::new(3, 65, -2));
        assert_eq!(pos.to_string(), "(3, 64, -2)");
    }

    #[test]
    fn test_default_visual_cue() {
        let VisualCue::Firework {
            colors,
            flicker,
            power,
        } = VisualCue::default();
        assert_eq!(colors, vec![Color::RED, Color::YELLOW]);
        assert!(flicker);
        assert_eq!(power, 1);
    }

    #[test]
    fn test_notice_builder() {
        let notice = Notice::plain("Click me")
            .on_click("/teleport 1 2 3")
            .with_hover("Teleport");
        assert_eq!(notice.click_command.as_deref(), Some("/teleport 1 2 3"));
        assert_eq!(notice.hover.as_deref(), Some("Teleport"));
    }
}
