//! The render event queue.
//!
//! Producers anywhere in the engine append with [`EventQueue::push`]; the
//! renderer drains the queue once per frame with [`EventQueue::drain`].
//! Draining is destructive: each event is delivered exactly once.

use waypoint_types::RenderEvent;

/// An ordered, drainable buffer of [`RenderEvent`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQueue {
    events: Vec<RenderEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append an event.
    pub fn push(&mut self, event: RenderEvent) {
        self.events.push(event);
    }

    /// Take every queued event in the order it was pushed.
    pub fn drain(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queued events, oldest first, without removing them.
    pub fn pending(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Number of queued events.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the queue is empty.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use waypoint_types::SkillType;

    use super::*;

    #[test]
    fn drain_preserves_order_and_empties() {
        let mut queue = EventQueue::new();
        queue.push(RenderEvent::UnlockedSkill {
            skill: SkillType::Study,
        });
        queue.push(RenderEvent::EndOfContent);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                RenderEvent::UnlockedSkill {
                    skill: SkillType::Study
                },
                RenderEvent::EndOfContent,
            ]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }
}
