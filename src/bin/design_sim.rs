//! Headless design-engine demo
//!
//! Three empires research at different speeds for a stretch of turns while
//! their shipyards keep re-deciding what to build. Every design decision
//! is logged; run with RUST_LOG=debug for the full story.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use voidforge::catalog::ComponentCatalog;
use voidforge::core::types::EmpireId;
use voidforge::empire::{Colony, Empire, Relation};
use voidforge::race::Race;
use voidforge::shipdesign::upgrade::run_design_turn;

const TURNS: u32 = 60;
const SEED: u64 = 0xF0C5;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Voidforge design simulation");

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);

    let setups = [
        ("Terran Concord", Race::Terran),
        ("Vakkar Warhost", Race::Vakkar),
        ("Quellix Veil", Race::Quellix),
    ];

    let mut eras: Vec<u8> = vec![2, 2, 2];
    let mut empires: Vec<Empire> = setups
        .iter()
        .enumerate()
        .map(|(i, (name, race))| {
            let id = EmpireId(i as u32 + 1);
            let mut empire = Empire::new(id, *name, *race, ComponentCatalog::with_era(eras[i]));
            for c in 0..6 {
                empire.colonies.push(Colony {
                    name: format!("{} {}", name, c + 1),
                    production: rng.gen_range(20.0..120.0),
                });
            }
            empire
        })
        .collect();

    // Everyone knows everyone; relations drift over the run
    let ids: Vec<EmpireId> = empires.iter().map(|e| e.id).collect();
    for empire in &mut empires {
        for &other in &ids {
            if other != empire.id {
                let mut rel = Relation::neutral(ComponentCatalog::with_era(2).snapshot());
                rel.score = rng.gen_range(-60..60);
                empire.relations.insert(other, rel);
            }
        }
    }

    for turn in 1..=TURNS {
        // Research advances unevenly
        for (i, empire) in empires.iter_mut().enumerate() {
            if rng.gen_bool(0.45) && eras[i] < 45 {
                eras[i] += 1;
                empire.catalog = ComponentCatalog::with_era(eras[i]);
            }
        }

        // Rivals see each other's current tech
        let snapshots: Vec<(EmpireId, _)> = empires.iter().map(|e| (e.id, e.catalog.snapshot())).collect();
        for empire in &mut empires {
            for (id, snapshot) in &snapshots {
                if let Some(rel) = empire.relations.get_mut(id) {
                    rel.tech = *snapshot;
                }
            }
        }

        // Halfway through, the Warhost picks a fight
        if turn == TURNS / 2 {
            let warhost = ids[1];
            let concord = ids[0];
            if let Some(rel) = empires[0].relations.get_mut(&warhost) {
                rel.at_war = true;
                rel.hostile = true;
            }
            if let Some(rel) = empires[1].relations.get_mut(&concord) {
                rel.at_war = true;
                rel.hostile = true;
            }
            tracing::info!(turn, "war breaks out");
        }

        for empire in &mut empires {
            let events = run_design_turn(empire, turn);
            for event in &events {
                tracing::info!(empire = %empire.name, turn, ?event, "design event");
            }

            // The yards keep building whatever is active
            for (slot, _) in empire.designs.iter() {
                let built = empire.fleet.built(slot);
                empire.fleet.set_built(slot, built + rng.gen_range(0..3));
            }
        }
    }

    println!("\n=== Fleet rosters after {} turns ===", TURNS);
    for empire in &empires {
        println!("{}:", empire.name);
        for (slot, design) in empire.designs.iter() {
            println!(
                "  [{}] {:<24} dmg/turn {:>8.1}  cost {:>7.0}{}",
                slot,
                design.name,
                design.per_turn_damage,
                design.unit_cost(&empire.catalog),
                if design.obsolete { "  (obsolete)" } else { "" }
            );
        }
    }

    // Machine-readable dump for downstream tooling
    let rosters: Vec<(String, Vec<&voidforge::shipdesign::ShipDesign>)> = empires
        .iter()
        .map(|e| (e.name.clone(), e.designs.iter().map(|(_, d)| d).collect()))
        .collect();
    match serde_json::to_string_pretty(&rosters) {
        Ok(json) => println!("\n{}", json),
        Err(err) => tracing::warn!(%err, "roster serialization failed"),
    }
}
