//! Upgrade decision integration tests
//!
//! Full lifecycle scenarios: bootstrap, the stability guard, cheap
//! replacement, obsolescence with deferral under hostile contact,
//! colony-ship transit rules, and scout fast-path replacement.

use voidforge::catalog::ComponentCatalog;
use voidforge::core::types::{EmpireId, HullSize, Mission};
use voidforge::empire::{Colony, Empire, Relation};
use voidforge::race::Race;
use voidforge::shipdesign::events::DesignEvent;
use voidforge::shipdesign::synthesis::{synthesize, DesignContext};
use voidforge::shipdesign::upgrade::run_design_turn;

fn empire(era: u8) -> Empire {
    let mut empire = Empire::new(
        EmpireId(1),
        "Concord",
        Race::Terran,
        ComponentCatalog::with_era(era),
    );
    empire.colonies = vec![
        Colony { name: "Home".into(), production: 120.0 },
        Colony { name: "Forge".into(), production: 80.0 },
    ];
    empire
}

fn replaced(events: &[DesignEvent], mission: Mission) -> bool {
    events
        .iter()
        .any(|e| matches!(e, DesignEvent::Replaced { mission: m, .. } if *m == mission))
}

fn marked_obsolete(events: &[DesignEvent], mission: Mission) -> bool {
    events
        .iter()
        .any(|e| matches!(e, DesignEvent::MarkedObsolete { mission: m, .. } if *m == mission))
}

fn deferred(events: &[DesignEvent], mission: Mission) -> bool {
    events
        .iter()
        .any(|e| matches!(e, DesignEvent::Deferred { mission: m } if *m == mission))
}

fn any_real_change(events: &[DesignEvent]) -> bool {
    events.iter().any(|e| {
        matches!(
            e,
            DesignEvent::Installed { .. }
                | DesignEvent::Replaced { .. }
                | DesignEvent::MarkedObsolete { .. }
        )
    })
}

#[test]
fn stability_guard_holds_a_settled_design() {
    let mut empire = empire(10);
    run_design_turn(&mut empire, 1);

    // Budget-normalized selection lands the fighter on a small hull,
    // which the guard's absolute free-space floor always covers
    let fighter = empire.designs.active(Mission::Fighter).unwrap();
    assert_eq!(fighter.hull, HullSize::Small);
    let life_before = fighter.remaining_life;

    let events = run_design_turn(&mut empire, 2);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, DesignEvent::StabilitySkip { mission: Mission::Fighter })),
        "guard must fire with nothing new unlocked: {:?}",
        events
    );
    assert!(!any_real_change(&events));
    let fighter = empire.designs.active(Mission::Fighter).unwrap();
    assert_eq!(fighter.remaining_life, life_before + 1, "guard ticks the stability counter");
}

#[test]
fn cheap_fighter_is_replaced_immediately() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    let slot = empire.designs.active_slot(Mission::Fighter).unwrap();
    let unit_cost = {
        let active = empire.designs.active(Mission::Fighter).unwrap();
        active.unit_cost(&empire.catalog)
    };
    // Keep the committed value at or under the fighter threshold
    let built = (100.0 / unit_cost).floor() as u32;
    empire.fleet.set_built(slot, built);

    // A new drive unlocks: guard off, candidate differs
    empire.catalog = ComponentCatalog::with_era(10);

    let events = run_design_turn(&mut empire, 2);
    assert!(
        replaced(&events, Mission::Fighter),
        "committed value {} x {} is under threshold: {:?}",
        unit_cost,
        built,
        events
    );
    assert_eq!(empire.fleet.built(slot), 0, "replacement scraps the committed hulls");
}

#[test]
fn expensive_fleet_is_obsoleted_not_scrapped() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    let slot = empire.designs.active_slot(Mission::Destroyer).unwrap();
    empire.fleet.set_built(slot, 1000);
    empire.catalog = ComponentCatalog::with_era(20);

    let events = run_design_turn(&mut empire, 2);
    assert!(marked_obsolete(&events, Mission::Destroyer), "{:?}", events);
    assert!(!replaced(&events, Mission::Destroyer));

    // The candidate went into the free slot and took over the role
    let new_slot = empire.designs.active_slot(Mission::Destroyer).unwrap();
    assert_ne!(new_slot, slot);
    let parked = empire.designs.get(slot).unwrap();
    assert!(parked.obsolete);
    assert_eq!(empire.fleet.built(slot), 1000, "fielded hulls stay until the countdown runs out");
}

#[test]
fn war_with_no_free_slot_defers_replacement() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    // Occupy the last free slot so nothing can move aside
    let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
    let filler = synthesize(&ctx, Mission::Scout, HullSize::Small, &empire.assess_targets());
    let free = empire.designs.free_slot().unwrap();
    empire.designs.install_active(free, filler).unwrap();
    assert!(empire.designs.free_slot().is_none());

    let slot = empire.designs.active_slot(Mission::Destroyer).unwrap();
    empire.fleet.set_built(slot, 1000);

    // Hostiles at the border, better tech on the bench
    let mut rel = Relation::neutral(ComponentCatalog::with_era(5).snapshot());
    rel.at_war = true;
    rel.hostile = true;
    empire.relations.insert(EmpireId(2), rel);
    empire.catalog = ComponentCatalog::with_era(20);

    let events = run_design_turn(&mut empire, 2);
    assert!(marked_obsolete(&events, Mission::Destroyer), "{:?}", events);
    assert!(deferred(&events, Mission::Destroyer), "{:?}", events);
    assert!(!replaced(&events, Mission::Destroyer));

    let active = empire.designs.active(Mission::Destroyer).unwrap();
    assert!(active.obsolete);
    let countdown = active.remaining_life;
    assert!(countdown > 0);

    // Deferral holds while the contact lasts, until the countdown expires
    let mut replaced_on = None;
    for turn in 3..=(3 + countdown as u32 + 2) {
        let events = run_design_turn(&mut empire, turn);
        if replaced(&events, Mission::Destroyer) {
            replaced_on = Some(turn);
            break;
        }
    }
    let turn = replaced_on.expect("the countdown must force the replacement through");
    assert!(
        turn as i32 >= 3 + countdown,
        "replaced on turn {} before the {}-turn countdown ran out",
        turn,
        countdown
    );
    assert!(!empire.designs.active(Mission::Destroyer).unwrap().obsolete);
}

#[test]
fn peace_with_no_free_slot_scraps_immediately() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    let ctx = DesignContext { catalog: &empire.catalog, race: &empire.weights };
    let filler = synthesize(&ctx, Mission::Scout, HullSize::Small, &empire.assess_targets());
    let free = empire.designs.free_slot().unwrap();
    empire.designs.install_active(free, filler).unwrap();

    let slot = empire.designs.active_slot(Mission::Destroyer).unwrap();
    empire.fleet.set_built(slot, 1000);
    empire.catalog = ComponentCatalog::with_era(20);

    let events = run_design_turn(&mut empire, 2);
    assert!(marked_obsolete(&events, Mission::Destroyer), "{:?}", events);
    assert!(
        replaced(&events, Mission::Destroyer),
        "no hostile contact means the swap happens in place: {:?}",
        events
    );
    assert_eq!(empire.designs.active_slot(Mission::Destroyer), Some(slot));
}

#[test]
fn upgrade_decisions_are_idempotent() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    empire.catalog = ComponentCatalog::with_era(12);
    let first = run_design_turn(&mut empire, 2);
    assert!(any_real_change(&first), "the tech jump must register: {:?}", first);

    let second = run_design_turn(&mut empire, 3);
    assert!(
        !any_real_change(&second),
        "an immediate rerun must detect identical modules: {:?}",
        second
    );
}

#[test]
fn colony_design_waits_for_ships_in_transit() {
    let mut empire = empire(10);
    run_design_turn(&mut empire, 1);

    let slot = empire.designs.active_slot(Mission::ColonyShip).unwrap();
    empire.fleet.set_outbound(slot, 3);
    empire.catalog = ComponentCatalog::with_era(45);

    let events = run_design_turn(&mut empire, 2);
    assert!(marked_obsolete(&events, Mission::ColonyShip), "{:?}", events);
    assert!(!replaced(&events, Mission::ColonyShip));

    // The settlers arrive; the swap goes through
    empire.fleet.set_outbound(slot, 0);
    let events = run_design_turn(&mut empire, 3);
    assert!(replaced(&events, Mission::ColonyShip), "{:?}", events);
}

#[test]
fn scouts_chase_strictly_faster_drives() {
    let mut empire = empire(5);
    run_design_turn(&mut empire, 1);

    // Nothing new: no scout churn
    let events = run_design_turn(&mut empire, 2);
    assert!(!replaced(&events, Mission::Scout));

    // Warp 2 unlocks
    empire.catalog = ComponentCatalog::with_era(10);
    let events = run_design_turn(&mut empire, 3);
    assert!(replaced(&events, Mission::Scout), "{:?}", events);

    let scout = empire.designs.active(Mission::Scout).unwrap();
    assert_eq!(scout.engine, empire.catalog.fastest_engine());
}
