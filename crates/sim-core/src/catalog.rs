//! Fixed library of trilogy plot beats and machine-conflict mechanics. Each
//! constructor bakes its parameters into the event's closures; the shared
//! clamp keeps the three continuous metrics inside [0, 1].

use std::collections::BTreeSet;

use contracts::{ArchitectChoice, Movie, Realm, ScenarioConfig, Theme};

use crate::event::Event;

fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

pub fn awaken_neo() -> Event {
    Event {
        movie: Movie::Matrix,
        name: "Neo awakens (Red Pill)",
        desc: "Morpheus frees Neo; reality revealed as simulation.".to_string(),
        themes: BTreeSet::from([
            Theme::RealityIllusion,
            Theme::MessianicGnosis,
            Theme::FreeWill,
        ]),
        myth: vec!["Gnosis (revelation)".to_string()],
        pre: None,
        effect: Some(Box::new(|world| {
            world.neo_awake = true;
            let neo = world.character_mut("Neo")?;
            neo.realm = Realm::Real;
            neo.power = neo.power.max(30);
            world.humans_free += 1;
            world.matrix_control = clamp01(world.matrix_control - 0.02);
            Ok(())
        })),
    }
}

pub fn train_neo() -> Event {
    Event {
        movie: Movie::Matrix,
        name: "Training (Kung Fu, Bullet Time)",
        desc: "Neo bends Matrix rules via training.".to_string(),
        themes: BTreeSet::from([Theme::RealityIllusion, Theme::ControlSystems]),
        myth: Vec::new(),
        pre: Some(Box::new(|world| world.neo_awake)),
        effect: Some(Box::new(|world| {
            let neo = world.character_mut("Neo")?;
            neo.realm = Realm::Matrix;
            neo.power = neo.power.max(60);
            Ok(())
        })),
    }
}

pub fn rescue_morpheus() -> Event {
    Event {
        movie: Movie::Matrix,
        name: "Rescue Morpheus",
        desc: "Neo and Trinity rescue Morpheus from Agents.".to_string(),
        themes: BTreeSet::from([Theme::LoveSacrifice, Theme::ControlSystems]),
        myth: Vec::new(),
        pre: Some(Box::new(|world| world.neo_awake && world.trinity_alive)),
        effect: Some(Box::new(|world| {
            let neo = world.character_mut("Neo")?;
            neo.power = neo.power.max(70);
            world.matrix_control = clamp01(world.matrix_control - 0.03);
            Ok(())
        })),
    }
}

pub fn neo_ascends() -> Event {
    Event {
        movie: Movie::Matrix,
        name: "Ascension: stop bullets & fly",
        desc: "Neo sees the code; Agent Smith becomes a free anomaly.".to_string(),
        themes: BTreeSet::from([
            Theme::MessianicGnosis,
            Theme::RealityIllusion,
            Theme::SmithShadow,
        ]),
        myth: vec!["Messiah motif".to_string()],
        pre: Some(Box::new(|world| world.neo_awake)),
        effect: Some(Box::new(|world| {
            let neo = world.character_mut("Neo")?;
            neo.power = neo.power.max(90);
            world.matrix_control = clamp01(world.matrix_control - 0.05);
            world.smith_factor = world.smith_factor.max(0.05);
            Ok(())
        })),
    }
}

pub fn merovingian_persephone() -> Event {
    Event {
        movie: Movie::Reloaded,
        name: "Merovingian & Persephone",
        desc: "Persephone's 'truth kiss' opens access to the Keymaker.".to_string(),
        themes: BTreeSet::from([Theme::UnderworldPassages, Theme::ControlSystems]),
        myth: vec!["Persephone (Underworld queen)".to_string()],
        pre: None,
        effect: None,
    }
}

pub fn keymaker_freed() -> Event {
    Event {
        movie: Movie::Reloaded,
        name: "Keymaker freed",
        desc: "Backdoors to system internals become accessible.".to_string(),
        themes: BTreeSet::from([Theme::ControlSystems]),
        myth: vec!["Janus (doors/thresholds)".to_string()],
        pre: None,
        effect: Some(Box::new(|world| {
            world.matrix_control = clamp01(world.matrix_control - 0.04);
            Ok(())
        })),
    }
}

pub fn architect_choice(choice: ArchitectChoice) -> Event {
    let desc = match choice {
        ArchitectChoice::Trinity => "Neo chooses TRINITY (break cycle)",
        ArchitectChoice::Zion => "Neo chooses ZION (reset loop)",
    };
    Event {
        movie: Movie::Reloaded,
        name: "The Architect (choice)",
        desc: desc.to_string(),
        themes: BTreeSet::from([Theme::FreeWill, Theme::Determinism, Theme::ControlSystems]),
        myth: vec!["Demiurge (Gnosis)".to_string()],
        pre: None,
        effect: Some(Box::new(move |world| {
            match choice {
                ArchitectChoice::Zion => {
                    world.zion_defense = 1.0;
                    world.matrix_control = 1.0;
                    world.prophecy_valid = true;
                }
                ArchitectChoice::Trinity => {
                    world.prophecy_valid = false;
                    world.matrix_control = clamp01(world.matrix_control - 0.02);
                }
            }
            Ok(())
        })),
    }
}

pub fn save_trinity() -> Event {
    Event {
        movie: Movie::Reloaded,
        name: "Save Trinity",
        desc: "Love over system logic; Trinity revived.".to_string(),
        themes: BTreeSet::from([Theme::LoveSacrifice]),
        myth: Vec::new(),
        pre: Some(Box::new(|world| world.trinity_alive)),
        effect: Some(Box::new(|world| {
            world.matrix_control = clamp01(world.matrix_control - 0.02);
            Ok(())
        })),
    }
}

pub fn smith_spreads(rate: f64) -> Event {
    Event {
        movie: Movie::Reloaded,
        name: "Smith spreads",
        desc: "Smith replicates across programs and humans.".to_string(),
        themes: BTreeSet::from([Theme::SmithShadow, Theme::ControlSystems]),
        myth: Vec::new(),
        pre: None,
        effect: Some(Box::new(move |world| {
            world.smith_factor = clamp01(world.smith_factor + rate);
            world.matrix_control = clamp01(world.matrix_control - 0.05);
            Ok(())
        })),
    }
}

pub fn zion_assault(intensity: f64) -> Event {
    Event {
        movie: Movie::Revolutions,
        name: "Sentinel assault on Zion",
        desc: "Sentinels erode Zion's defenses; docks under siege.".to_string(),
        themes: BTreeSet::from([Theme::ControlSystems]),
        myth: Vec::new(),
        pre: None,
        effect: Some(Box::new(move |world| {
            world.zion_defense = clamp01(world.zion_defense - intensity);
            world.zion_alive = world.zion_defense > 0.0;
            Ok(())
        })),
    }
}

pub fn smith_copies_oracle() -> Event {
    Event {
        movie: Movie::Revolutions,
        name: "Smith copies the Oracle",
        desc: "Smith gains 'sight' yet grows unstable.".to_string(),
        themes: BTreeSet::from([Theme::SmithShadow]),
        myth: vec!["Seer/Oracle".to_string()],
        pre: None,
        effect: Some(Box::new(|world| {
            world.smith_factor = clamp01(world.smith_factor + 0.25);
            Ok(())
        })),
    }
}

pub fn machines_negotiate() -> Event {
    Event {
        movie: Movie::Revolutions,
        name: "Machines negotiate (Deus Ex Machina)",
        desc: "Neo offers: end Smith ⇄ ceasefire + choice for humans.".to_string(),
        themes: BTreeSet::from([Theme::HumanMachineSymbiosis, Theme::FreeWill]),
        myth: vec!["Deus ex machina (theater)".to_string()],
        pre: None,
        effect: None,
    }
}

pub fn final_fight(bonus: i64) -> Event {
    Event {
        movie: Movie::Revolutions,
        name: "Final fight: Neo vs Smith",
        desc: "Neo sacrifices; backreaction deletes Smith (if power ≥ threshold).".to_string(),
        themes: BTreeSet::from([
            Theme::LoveSacrifice,
            Theme::SmithShadow,
            Theme::MessianicGnosis,
        ]),
        myth: Vec::new(),
        pre: None,
        effect: Some(Box::new(move |world| {
            // effective power floors at 90; Neo's stored power is untouched
            let neo_power = world.character("Neo")?.power.max(90);
            // integer truncation, not rounding
            let threshold = (60.0 + 40.0 * world.smith_factor) as i64;
            let score = neo_power.saturating_add(bonus);
            if score >= threshold {
                world.smith_factor = 0.0;
                world.matrix_control = 0.5;
                world.character_mut("Neo")?.alive = false;
                world.neo_alive = false;
            } else {
                world.smith_factor = clamp01(world.smith_factor + 0.2);
            }
            Ok(())
        })),
    }
}

pub fn peace_accord() -> Event {
    Event {
        movie: Movie::Revolutions,
        name: "Peace accord",
        desc: "Ceasefire: humans may leave the Matrix (if Smith is gone).".to_string(),
        themes: BTreeSet::from([Theme::HumanMachineSymbiosis, Theme::FreeWill]),
        myth: Vec::new(),
        pre: None,
        effect: Some(Box::new(|world| {
            // exact equality on purpose: the fight's success branch assigns 0.0
            if world.smith_factor == 0.0 {
                world.peace = true;
            }
            Ok(())
        })),
    }
}

/// The canon replay order, Matrix through Revolutions, parameterized by the
/// scenario knobs.
pub fn trilogy_script(config: &ScenarioConfig) -> Vec<Event> {
    vec![
        awaken_neo(),
        train_neo(),
        rescue_morpheus(),
        neo_ascends(),
        merovingian_persephone(),
        keymaker_freed(),
        architect_choice(config.architect_choice),
        save_trinity(),
        smith_spreads(config.smith_rate),
        zion_assault(config.zion_intensity),
        smith_copies_oracle(),
        machines_negotiate(),
        final_fight(config.final_bonus),
        peace_accord(),
    ]
}
