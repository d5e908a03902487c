//! Animation frames and where they come from.
//!
//! The core only cares about how many frames an animation has and in which
//! order they play. Pixel content is carried along so a save can restore the
//! exact sprite set, but nothing here decodes or draws it.

use crate::core::constants::ENEMY_TIERS;
use serde::{Deserialize, Serialize};

/// Which animation of a tier's sprite set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationKind {
    Idle,
    Death,
}

/// One RGBA frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    pub image: Vec<u8>,
}

impl Frame {
    /// A frame filled with a single colour.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = (width * height) as usize;
        let mut image = Vec::with_capacity(pixels * 4);
        for _ in 0..pixels {
            image.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            image,
        }
    }

    /// True when the pixel buffer matches the declared dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.image.len() == self.width as usize * self.height as usize * 4
    }
}

/// Supplies the ordered frames for a sprite tier.
pub trait AssetProvider {
    fn frames(&self, tier: u32, kind: AnimationKind) -> Vec<Frame>;
}

/// Tier shown for a given kill count.
pub fn tier_for(enemy_count: u32) -> u32 {
    enemy_count % ENEMY_TIERS
}

/// Placeholder sprites: small solid-colour frames, one hue per tier.
///
/// Frame `i` of an animation gets its alpha channel set to `i` so frame
/// ordering survives a save round-trip and can be checked.
#[derive(Debug, Clone)]
pub struct GeneratedAssets {
    pub idle_frames: usize,
    pub death_frames: usize,
    pub frame_size: u32,
}

impl Default for GeneratedAssets {
    fn default() -> Self {
        Self {
            idle_frames: 4,
            death_frames: 8,
            frame_size: 4,
        }
    }
}

const TIER_COLOURS: [[u8; 3]; 7] = [
    [120, 200, 80],
    [90, 120, 220],
    [200, 160, 60],
    [160, 80, 200],
    [220, 90, 60],
    [80, 200, 200],
    [230, 230, 230],
];

impl AssetProvider for GeneratedAssets {
    fn frames(&self, tier: u32, kind: AnimationKind) -> Vec<Frame> {
        let count = match kind {
            AnimationKind::Idle => self.idle_frames,
            AnimationKind::Death => self.death_frames,
        };
        let [r, g, b] = TIER_COLOURS[tier as usize % TIER_COLOURS.len()];
        (0..count)
            .map(|i| Frame::solid(self.frame_size, self.frame_size, [r, g, b, i as u8]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_frame_is_well_formed() {
        let frame = Frame::solid(3, 2, [1, 2, 3, 4]);
        assert_eq!(frame.image.len(), 24);
        assert!(frame.is_well_formed());
        assert_eq!(&frame.image[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_malformed_frame_detected() {
        let frame = Frame {
            width: 2,
            height: 2,
            image: vec![0; 15],
        };
        assert!(!frame.is_well_formed());
    }

    #[test]
    fn test_generated_assets_counts_and_order() {
        let assets = GeneratedAssets::default();
        let idle = assets.frames(0, AnimationKind::Idle);
        let death = assets.frames(0, AnimationKind::Death);
        assert_eq!(idle.len(), 4);
        assert_eq!(death.len(), 8);
        for (i, frame) in death.iter().enumerate() {
            assert_eq!(frame.image[3], i as u8);
        }
    }

    #[test]
    fn test_tiers_wrap() {
        assert_eq!(tier_for(0), 0);
        assert_eq!(tier_for(6), 6);
        assert_eq!(tier_for(7), 0);
        assert_eq!(tier_for(15), 1);

        let assets = GeneratedAssets::default();
        assert_ne!(
            assets.frames(0, AnimationKind::Idle)[0],
            assets.frames(1, AnimationKind::Idle)[0]
        );
    }
}
