mod common;

use common::{RecordingHooks, monster, player, session, session_with, terrain};
use game_time::state::HitModifier;
use game_time::{
    Actor, Appearance, Armor, CellFlags, DamageMethod, DamageOutcome, DamageType, Duration,
    EntityId, GameConfig, GameEnv, Inventory, LifecycleError, LifecycleState, Position,
    SoundKind, Species, SpeciesFlags, SpeedTier, StatusEffectKind,
};

fn humanoid_player(armor: Armor) -> Actor {
    let species = Species::new("human").with_flags(SpeciesFlags::CAN_LEAVE_CORPSE | SpeciesFlags::HUMANOID);
    Actor::player("you", species, Position::new(1, 1))
        .with_hp(10)
        .with_inventory(Inventory::new().with_body_armor(armor))
}

fn state_of(session: &game_time::GameSession, id: EntityId) -> LifecycleState {
    session.actor(id).map(|actor| actor.state).unwrap()
}

#[test]
fn armor_reduces_physical_damage_but_never_below_one() {
    let mut session = session();
    session.add_actor(humanoid_player(Armor::new("leather", 3, 20))).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    let outcome = session
        .apply_damage(&mut env, EntityId::PLAYER, 5, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert_eq!(outcome, DamageOutcome::Survived);
    let hp = session.actor(EntityId::PLAYER).unwrap().hp.current;
    assert_eq!(hp, 8);

    // Fully absorbed hits still get one point through.
    session
        .apply_damage(&mut env, EntityId::PLAYER, 2, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert_eq!(session.actor(EntityId::PLAYER).unwrap().hp.current, 7);

    // Armor ignores other damage types.
    session
        .apply_damage(&mut env, EntityId::PLAYER, 2, DamageType::Fire, DamageMethod::Other)
        .unwrap();
    assert_eq!(session.actor(EntityId::PLAYER).unwrap().hp.current, 5);
}

#[test]
fn worn_out_armor_leaves_its_slot() {
    let mut session = session();
    session.add_actor(humanoid_player(Armor::new("rags", 3, 2))).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session
        .apply_damage(&mut env, EntityId::PLAYER, 5, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    drop(env);

    let player = session.actor(EntityId::PLAYER).unwrap();
    assert!(player.inventory.body_armor().is_none());
    assert_eq!(player.hp.current, 7);
    assert_eq!(hooks.destroyed_armor, vec![(EntityId::PLAYER, 0)]);
    assert!(hooks.said("My rags is torn apart!"));
    assert_eq!(hooks.interrupts, 1);
}

#[test]
fn killing_blow_leaves_a_corpse_unless_overkill() {
    let mut session = session_with(GameConfig::default(), false);
    session.add_actor(player()).unwrap();
    session.add_actor(monster(1, SpeedTier::Normal)).unwrap();
    session.add_actor(monster(2, SpeedTier::Normal)).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::seeing();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    // 10 max hp: 12 is exactly 5/4, 13 is over it.
    let died = session
        .apply_damage(&mut env, EntityId(1), 12, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert!(died.died());
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Corpse);
    assert_eq!(session.actor(EntityId(1)).unwrap().appearance, Appearance::Corpse);

    session
        .apply_damage(&mut env, EntityId(2), 13, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert_eq!(state_of(&session, EntityId(2)), LifecycleState::Destroyed);
    assert_eq!(session.actor(EntityId(2)).unwrap().appearance, Appearance::Hidden);
    drop(env);

    assert!(hooks.said("The rat dies."));
    assert_eq!(hooks.deaths, vec![(EntityId(1), true), (EntityId(2), true)]);
}

#[test]
fn corpseless_species_are_always_destroyed() {
    let mut session = session();
    let wisp = Actor::monster(
        EntityId(1),
        Species::new("wisp").with_flags(SpeciesFlags::empty()),
        Position::new(3, 3),
    );
    session.add_actor(wisp).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Destroyed);
}

#[test]
fn dying_over_a_chasm_loses_everything() {
    let mut session = session();
    let species = Species::new("orc").with_flags(SpeciesFlags::CAN_LEAVE_CORPSE | SpeciesFlags::HUMANOID);
    let orc = Actor::monster(EntityId(1), species, Position::new(4, 4))
        .with_inventory(Inventory::new().with_body_armor(Armor::new("mail", 1, 50)));
    session.add_actor(orc).unwrap();

    let mut terrain = terrain();
    terrain.set(Position::new(4, 4), CellFlags::BOTTOMLESS | CellFlags::LOS_PASSABLE);
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session
        .apply_damage(&mut env, EntityId(1), 30, DamageType::Pure, DamageMethod::Other)
        .unwrap();
    drop(env);

    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Destroyed);
    assert!(hooks.gore.is_empty());
    assert!(hooks.drops.is_empty());
    assert!(hooks.sounds.iter().any(|s| s.kind == SoundKind::AgonizedScream));
}

#[test]
fn humanoid_death_drops_items_and_gore_when_destroyed() {
    let mut session = session();
    let species = Species::new("orc").with_flags(SpeciesFlags::HUMANOID);
    let orc = Actor::monster(EntityId(1), species, Position::new(4, 4))
        .with_inventory(Inventory::new().with_body_armor(Armor::new("mail", 1, 50)));
    session.add_actor(orc).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    drop(env);

    assert_eq!(hooks.drops, vec![(Position::new(4, 4), 1)]);
    assert_eq!(hooks.gore, vec![Position::new(4, 4)]);
    assert!(session.actor(EntityId(1)).unwrap().inventory.is_empty());
}

#[test]
fn corpse_hits_break_or_thud() {
    for (lucky, amount, broken, sound) in [
        (false, 1, false, SoundKind::CorpseThud),
        (false, 7, true, SoundKind::CorpseCrack),
        (true, 1, true, SoundKind::CorpseCrack),
    ] {
        let mut session = session_with(GameConfig::default(), lucky);
        session.add_actor(monster(1, SpeedTier::Normal)).unwrap();
        session.actor_mut(EntityId(1)).unwrap().state = LifecycleState::Corpse;

        let mut terrain = terrain();
        let mut hooks = RecordingHooks::default();
        let mut env = GameEnv::new(&mut terrain, &mut hooks);

        let outcome = session
            .apply_damage(&mut env, EntityId(1), amount, DamageType::Physical, DamageMethod::Kick)
            .unwrap();
        drop(env);

        assert_eq!(outcome, DamageOutcome::Survived);
        let state = state_of(&session, EntityId(1));
        assert_eq!(state == LifecycleState::Destroyed, broken, "amount {amount}, lucky {lucky}");
        assert_eq!(hooks.sounds.last().map(|s| s.kind), Some(sound));
        assert!(hooks.deaths.is_empty());
    }
}

#[test]
fn immune_resistant_and_destroyed_targets_are_untouched() {
    let mut session = session();
    session
        .add_actor(player().with_status(StatusEffectKind::ResistFire, Duration::Permanent))
        .unwrap();
    session.add_actor(monster(1, SpeedTier::Normal)).unwrap();
    session.add_actor(monster(2, SpeedTier::Normal)).unwrap();
    session.actor_mut(EntityId(2)).unwrap().state = LifecycleState::Destroyed;

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    for (id, damage_type) in [
        (EntityId::PLAYER, DamageType::Fire),
        (EntityId(1), DamageType::Light),
        (EntityId(2), DamageType::Physical),
    ] {
        let outcome = session
            .apply_damage(&mut env, id, 50, damage_type, DamageMethod::Other)
            .unwrap();
        assert_eq!(outcome, DamageOutcome::Survived);
    }
    drop(env);

    assert_eq!(session.actor(EntityId::PLAYER).unwrap().hp.current, 10);
    assert_eq!(session.actor(EntityId(1)).unwrap().hp.current, 10);
    assert!(hooks.said("You resist."));
}

#[test]
fn light_hurts_light_sensitive_actors() {
    let mut session = session();
    session
        .add_actor(
            monster(1, SpeedTier::Normal)
                .with_status(StatusEffectKind::LightSensitive, Duration::Permanent),
        )
        .unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session
        .apply_damage(&mut env, EntityId(1), 4, DamageType::Light, DamageMethod::Other)
        .unwrap();
    assert_eq!(session.actor(EntityId(1)).unwrap().hp.current, 6);
}

#[test]
fn spirit_depletion_reaches_the_same_end_states() {
    let mut session = session();
    session.add_actor(monster(1, SpeedTier::Normal).with_spirit(3)).unwrap();
    let ghost = Actor::monster(
        EntityId(2),
        Species::new("ghost").with_flags(SpeciesFlags::empty()),
        Position::new(5, 5),
    )
    .with_spirit(3);
    session.add_actor(ghost).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::seeing();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    let outcome = session
        .apply_damage(&mut env, EntityId(1), 5, DamageType::Spirit, DamageMethod::Other)
        .unwrap();
    assert_eq!(outcome, DamageOutcome::Died);
    assert_eq!(session.actor(EntityId(1)).unwrap().spirit.current, 0);
    assert_eq!(session.actor(EntityId(1)).unwrap().hp.current, 10);
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Corpse);

    let outcome = session.hit_spirit(&mut env, EntityId(2), 3).unwrap();
    assert_eq!(outcome, DamageOutcome::Died);
    assert_eq!(state_of(&session, EntityId(2)), LifecycleState::Destroyed);
    drop(env);

    assert!(hooks.said("The rat has no spirit left!"));
    assert!(hooks.gore.is_empty());
}

#[test]
fn invulnerable_player_takes_no_damage() {
    let config = GameConfig::default().with_player_invulnerable(true);
    let mut session = common::session_with(config, true);
    session.add_actor(player()).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    let hit = session
        .apply_damage(&mut env, EntityId::PLAYER, 99, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    let drain = session.hit_spirit(&mut env, EntityId::PLAYER, 99).unwrap();
    assert_eq!((hit, drain), (DamageOutcome::Survived, DamageOutcome::Survived));

    let player = session.actor(EntityId::PLAYER).unwrap();
    assert_eq!(player.hp.current, 10);
    assert_eq!(player.spirit.current, 10);
    assert!(player.is_alive());
}

#[test]
fn death_clears_leader_and_target_references() {
    let mut session = session();
    session.add_actor(player()).unwrap();
    let leader = Actor::monster(
        EntityId(1),
        Species::new("chieftain").with_death_message("collapses in a heap."),
        Position::new(3, 3),
    );
    session.add_actor(leader).unwrap();
    let mut follower = monster(2, SpeedTier::Normal);
    if let Some(state) = follower.monster_state_mut() {
        state.leader = Some(EntityId(1));
    }
    session.add_actor(follower).unwrap();
    if let Some(state) = session.actor_mut(EntityId::PLAYER).unwrap().player_state_mut() {
        state.target = Some(EntityId(1));
    }

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::seeing();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    drop(env);

    assert!(!session.actor(EntityId(2)).unwrap().follows(EntityId(1)));
    let target = session
        .actor(EntityId::PLAYER)
        .and_then(|p| p.player_state())
        .and_then(|s| s.target);
    assert_eq!(target, None);
    assert!(hooks.said("The chieftain collapses in a heap."));
    assert_eq!(hooks.redraws, 1);
}

#[test]
fn monsters_dying_on_visible_traps_are_destroyed() {
    let mut session = session();
    session.add_actor(monster(1, SpeedTier::Normal)).unwrap();
    let position = session.actor(EntityId(1)).unwrap().position;

    let mut terrain = terrain();
    terrain.set(position, CellFlags::FLOOR | CellFlags::VISIBLE_TRAP);
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Destroyed);
}

#[test]
fn corpses_slide_off_cells_that_cannot_hold_them() {
    let mut session = session();
    let mut rat = monster(1, SpeedTier::Normal);
    rat.position = Position::new(5, 5);
    session.add_actor(rat).unwrap();

    let mut terrain = terrain();
    terrain.set(Position::new(5, 5), CellFlags::LOS_PASSABLE | CellFlags::FLUID);
    terrain.set(Position::new(4, 4), CellFlags::WALL);
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    let corpse = session.actor(EntityId(1)).unwrap();
    assert!(corpse.is_corpse());
    assert_eq!(corpse.position, Position::new(4, 5));
}

#[test]
fn burning_outlives_its_bearer() {
    let mut session = session();
    session
        .add_actor(
            monster(1, SpeedTier::Normal)
                .with_status(StatusEffectKind::Burning, Duration::Turns(5))
                .with_status(StatusEffectKind::Hasted, Duration::Turns(5)),
        )
        .unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    session.die(&mut env, EntityId(1), false, true, true).unwrap();
    let corpse = session.actor(EntityId(1)).unwrap();
    assert!(corpse.status.has(StatusEffectKind::Burning));
    assert!(!corpse.status.has(StatusEffectKind::Hasted));
}

#[test]
fn unknown_targets_are_reported() {
    let mut session = session();
    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    assert_eq!(
        session.apply_damage(&mut env, EntityId(9), 1, DamageType::Physical, DamageMethod::Melee),
        Err(LifecycleError::ActorNotFound(EntityId(9)))
    );
    assert_eq!(
        session.die(&mut env, EntityId(9), true, true, true),
        Err(LifecycleError::ActorNotFound(EntityId(9)))
    );
}

#[test]
fn huge_hit_points_do_not_overflow_thresholds() {
    let mut session = session();
    let giant = monster(1, SpeedTier::Normal).with_hp(500_000_000);
    session.add_actor(giant).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    let outcome = session
        .apply_damage(&mut env, EntityId(1), 500_000_000, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert_eq!(outcome, DamageOutcome::Died);
    // 500M is not above 5/4 of max hp, so a corpse is left.
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Corpse);
}

#[test]
fn scaled_hit_modifiers_do_not_overflow() {
    let mut session = session();
    let species = Species::new("brittle golem").with_hit_modifier(HitModifier::Percent(150));
    let golem = Actor::monster(EntityId(1), species, Position::new(3, 3)).with_hp(10);
    session.add_actor(golem).unwrap();

    let mut terrain = terrain();
    let mut hooks = RecordingHooks::default();
    let mut env = GameEnv::new(&mut terrain, &mut hooks);

    let outcome = session
        .apply_damage(&mut env, EntityId(1), 20_000_000, DamageType::Physical, DamageMethod::Melee)
        .unwrap();
    assert_eq!(outcome, DamageOutcome::Died);
    assert_eq!(state_of(&session, EntityId(1)), LifecycleState::Destroyed);
}
