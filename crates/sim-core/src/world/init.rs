use super::*;
use contracts::{Faction, Realm};

impl World {
    /// Bare world at the reference starting state, with an empty registry.
    pub fn new() -> Self {
        Self {
            matrix_control: 1.0,
            zion_defense: 0.4,
            smith_factor: 0.0,
            humans_free: 1_000,
            humans_enslaved: 1_000_000_000,
            peace: false,
            prophecy_valid: true,
            neo_awake: false,
            neo_alive: true,
            trinity_alive: true,
            zion_alive: true,
            characters: BTreeMap::new(),
            log: Vec::new(),
        }
    }

    /// World seeded with the principal trilogy cast, all inside the Matrix.
    pub fn with_trilogy_cast() -> Self {
        let mut world = Self::new();
        world.add(Character::new("Neo", Faction::Human, Realm::Matrix, 20));
        world.add(Character::new("Trinity", Faction::Human, Realm::Matrix, 50));
        world.add(Character::new("Morpheus", Faction::Human, Realm::Matrix, 45));
        world.add(Character::new("Smith", Faction::Program, Realm::Matrix, 80));
        world.add(Character::new("Oracle", Faction::Program, Realm::Matrix, 70));
        world.add(Character::new("Architect", Faction::Program, Realm::Matrix, 90));
        world.add(Character::new("Keymaker", Faction::Program, Realm::Matrix, 20));
        world.add(Character::new("Merovingian", Faction::Program, Realm::Matrix, 65));
        world.add(Character::new("Persephone", Faction::Program, Realm::Matrix, 55));
        world
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
