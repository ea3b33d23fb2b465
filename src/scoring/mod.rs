//! Scoring module - the host-side score counter fed by shot events

use bevy::prelude::*;

use crate::events::ShotEvent;

/// Running tally for the match
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
    pub baskets: u32,
    pub misses: u32,
}

impl Score {
    /// Apply one event. Returns true if the tally changed.
    pub fn record(&mut self, event: &ShotEvent) -> bool {
        match event {
            ShotEvent::Scored { points } => {
                self.points += points;
                self.baskets += 1;
                info!("SCORE {}pts! Total: {} ({} made, {} missed)", points, self.points, self.baskets, self.misses);
                true
            }
            ShotEvent::ShotMissed { .. } => {
                self.misses += 1;
                info!("MISS. Total: {} ({} made, {} missed)", self.points, self.baskets, self.misses);
                true
            }
            _ => false,
        }
    }

    /// Fraction of launched shots that scored
    pub fn accuracy(&self) -> f32 {
        let attempts = self.baskets + self.misses;
        if attempts == 0 {
            0.0
        } else {
            self.baskets as f32 / attempts as f32
        }
    }
}
