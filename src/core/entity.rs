//=========================================================================
// Entity Service
//=========================================================================
//
// Signature-keyed table of game objects.
//
// Entities are ticked in insertion order. A scene owns the signatures it
// adds and removes them on exit.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::subsystem::{Subsystem, SubsystemError};

//=== Entity Trait ========================================================

/// A game object updated once per frame.
pub trait Entity: Any {
    fn tick(&mut self, delta_seconds: f32);

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

//=== EntityService =======================================================

struct Slot {
    signature: String,
    entity: Box<dyn Entity>,
}

/// Owns every live entity.
pub struct EntityService {
    slots: Vec<Slot>,
    running: bool,
}

impl EntityService {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            running: false,
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Adds `entity` under `signature`.
    ///
    /// An existing entity with the same signature is replaced in place and
    /// keeps its tick position.
    pub fn add<E: Entity>(&mut self, signature: impl Into<String>, entity: E) {
        let signature = signature.into();
        let entity: Box<dyn Entity> = Box::new(entity);

        match self.position(&signature) {
            Some(index) => {
                warn!("Entity `{}` replaced", signature);
                self.slots[index].entity = entity;
            }
            None => {
                debug!("Entity `{}` added", signature);
                self.slots.push(Slot { signature, entity });
            }
        }
    }

    /// Removes the entity under `signature`. Returns `false` if absent.
    pub fn remove(&mut self, signature: &str) -> bool {
        match self.position(signature) {
            Some(index) => {
                self.slots.remove(index);
                debug!("Entity `{}` removed", signature);
                true
            }
            None => false,
        }
    }

    /// Advances every entity by `delta_seconds`.
    pub fn tick(&mut self, delta_seconds: f32) {
        if !self.running {
            return;
        }
        for slot in &mut self.slots {
            slot.entity.tick(delta_seconds);
        }
    }

    //--- Queries ----------------------------------------------------------

    pub fn contains(&self, signature: &str) -> bool {
        self.position(signature).is_some()
    }

    /// Entity under `signature`, if it has type `E`.
    pub fn get<E: Entity>(&self, signature: &str) -> Option<&E> {
        self.position(signature)
            .and_then(|index| self.slots[index].entity.as_any().downcast_ref::<E>())
    }

    pub fn get_mut<E: Entity>(&mut self, signature: &str) -> Option<&mut E> {
        let index = self.position(signature)?;
        self.slots[index].entity.as_any_mut().downcast_mut::<E>()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn position(&self, signature: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.signature == signature)
    }
}

//=== Subsystem ===========================================================

impl Subsystem for EntityService {
    fn name(&self) -> &'static str {
        "entity"
    }

    fn startup(&mut self) -> Result<(), SubsystemError> {
        self.running = true;
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.slots.is_empty() {
            debug!("Dropping {} live entities", self.slots.len());
        }
        self.slots.clear();
        self.running = false;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Counter {
        ticks: u32,
    }

    impl Entity for Counter {
        fn tick(&mut self, _delta_seconds: f32) {
            self.ticks += 1;
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Recorder {
        name: &'static str,
        journal: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Entity for Recorder {
        fn tick(&mut self, _delta_seconds: f32) {
            self.journal.borrow_mut().push(self.name);
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn running() -> EntityService {
        let mut service = EntityService::new();
        service.startup().unwrap();
        service
    }

    #[test]
    fn tick_runs_in_insertion_order() {
        let mut service = running();
        let journal = Rc::new(RefCell::new(Vec::new()));
        for name in ["bird", "pipe", "ground"] {
            service.add(name, Recorder { name, journal: journal.clone() });
        }

        service.tick(0.016);

        assert_eq!(*journal.borrow(), vec!["bird", "pipe", "ground"]);
    }

    #[test]
    fn typed_lookup_downcasts() {
        let mut service = running();
        service.add("counter", Counter { ticks: 0 });
        service.tick(0.016);

        assert_eq!(service.get::<Counter>("counter").map(|c| c.ticks), Some(1));
        assert!(service.get::<Recorder>("counter").is_none());

        if let Some(counter) = service.get_mut::<Counter>("counter") {
            counter.ticks = 10;
        }
        assert_eq!(service.get::<Counter>("counter").map(|c| c.ticks), Some(10));
    }

    #[test]
    fn add_replaces_same_signature() {
        let mut service = running();
        service.add("counter", Counter { ticks: 3 });
        service.add("counter", Counter { ticks: 7 });

        assert_eq!(service.len(), 1);
        assert_eq!(service.get::<Counter>("counter").map(|c| c.ticks), Some(7));
    }

    #[test]
    fn remove_and_shutdown_clear_entities() {
        let mut service = running();
        service.add("a", Counter { ticks: 0 });
        service.add("b", Counter { ticks: 0 });

        assert!(service.remove("a"));
        assert!(!service.remove("a"));
        assert!(service.contains("b"));

        service.shutdown();
        assert!(service.is_empty());
    }
}
