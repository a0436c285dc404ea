use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
///
/// The arena only holds two kinds of objects, but keeping the groups explicit
/// means a second ball or an obstacle can be filtered in later without
/// touching the builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// The dynamic ball
    Ball = 0b0000_0010,

    /// The static arena boundary (edge loop)
    Boundary = 0b0000_0100,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        // Define what each group can interact with
        let filter = match self {
            // The ball bounces off the boundary
            CollisionGroups::Ball => Group::from_bits_truncate(
                CollisionGroups::Boundary as u32 | CollisionGroups::Default as u32,
            ),

            // The boundary stops the ball
            CollisionGroups::Boundary => Group::from_bits_truncate(
                CollisionGroups::Ball as u32 | CollisionGroups::Default as u32,
            ),

            // Default interacts with everything
            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Contact event delivered to game logic after a physics step
#[derive(Debug, Clone, Copy)]
pub enum CollisionEvent {
    /// Two colliders started touching
    Started {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },

    /// Two colliders stopped touching
    Stopped {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl CollisionEvent {
    /// Check whether this event involves the given collider
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        match self {
            CollisionEvent::Started {
                collider1,
                collider2,
            }
            | CollisionEvent::Stopped {
                collider1,
                collider2,
            } => *collider1 == handle || *collider2 == handle,
        }
    }

    /// Check whether this is a contact-started event
    pub fn is_started(&self) -> bool {
        matches!(self, CollisionEvent::Started { .. })
    }
}

/// Queue for storing collision events during a physics step
pub struct CollisionEventQueue {
    events: Arc<Mutex<Vec<CollisionEvent>>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::with_capacity(8))),
        }
    }

    /// Clear all events (call at start of a physics step)
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Get all collision events from this step
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Add a collision event
    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Default for CollisionEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

// Implement rapier2d's EventHandler trait for our event queue
impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        match event {
            rapier2d::prelude::CollisionEvent::Started(h1, h2, _flags) => {
                self.push(CollisionEvent::Started {
                    collider1: h1,
                    collider2: h2,
                });
            }
            rapier2d::prelude::CollisionEvent::Stopped(h1, h2, _flags) => {
                self.push(CollisionEvent::Stopped {
                    collider1: h1,
                    collider2: h2,
                });
            }
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
        // Contact forces are not surfaced to game logic
    }
}
