use std::cell::RefCell;
use std::rc::Rc;

use dungeon_core::{
    Action, Actor, AttackAction, Behavior, BehaviorKind, Energy, EntityId, Game, GameFlags,
    ItemLocation, ItemTick, PlayerBehavior, Position, RestAction, SimConfig, Speed, TileGrid,
    World,
};

type Log = Rc<RefCell<Vec<EntityId>>>;

/// Rests every turn and records who was offered a turn.
#[derive(Debug)]
struct Logging(Log);

impl Behavior for Logging {
    fn kind(&self) -> BehaviorKind {
        BehaviorKind::OneShot
    }

    fn next_action(&mut self, actor: &Actor, _world: &World) -> Option<Box<dyn Action>> {
        self.0.borrow_mut().push(actor.id);
        Some(Box::new(RestAction::new(actor.id)))
    }
}

fn world(rows: &[&str]) -> World {
    World::new(TileGrid::from_ascii(rows.iter().copied(), true).unwrap(), 11)
}

fn logged(actor: Actor, log: &Log) -> Actor {
    actor
        .with_behavior(Box::new(Logging(log.clone())))
        .with_energy(Energy::new(0))
}

fn monster(world: &mut World, x: i32, speed: Speed, health: u32) -> Actor {
    let id = world.allocate_id().unwrap();
    Actor::monster(id, "kobold", Position::new(x, 0), speed, health, 1)
}

fn step_until_turn(game: &mut Game, turn: u64) {
    while game.world().turn() < turn {
        let result = game.step().unwrap();
        assert!(result.is_continue(), "unexpected yield {result:?}");
    }
}

#[test]
fn double_speed_actor_acts_twice_per_tick() {
    let log = Log::default();
    let mut world = world(&["......"]);
    world
        .place(logged(Actor::player(Position::new(0, 0), Speed::NORMAL, 10, 1), &log))
        .unwrap();
    let fast = monster(&mut world, 2, Speed::DOUBLE, 5);
    let fast_id = fast.id;
    world.place(logged(fast, &log)).unwrap();
    let slow = monster(&mut world, 4, Speed::NORMAL, 5);
    let slow_id = slow.id;
    world.place(logged(slow, &log)).unwrap();

    let mut game = Game::new(world, SimConfig::default()).unwrap();

    // Nobody starts with energy: the first pass ends in a tick boundary.
    step_until_turn(&mut game, 1);
    assert!(log.borrow().is_empty());

    step_until_turn(&mut game, 2);
    assert_eq!(
        *log.borrow(),
        vec![EntityId::PLAYER, fast_id, fast_id, slow_id]
    );
}

#[test]
fn actor_killed_mid_pass_is_removed_without_skipping_the_next() {
    let log = Log::default();
    let mut world = world(&["......"]);

    let victim = monster(&mut world, 1, Speed::NORMAL, 1);
    let victim_id = victim.id;
    let survivor = monster(&mut world, 3, Speed::NORMAL, 5);
    let survivor_id = survivor.id;

    world
        .place(
            Actor::player(Position::new(0, 0), Speed::NORMAL, 10, 5)
                .with_behavior(Box::new(PlayerBehavior::with_action(Box::new(
                    AttackAction::new(EntityId::PLAYER, victim_id),
                ))))
                .with_energy(Energy::new(60)),
        )
        .unwrap();
    world
        .place(logged(victim, &log).with_energy(Energy::new(60)))
        .unwrap();
    world
        .place(logged(survivor, &log).with_energy(Energy::new(60)))
        .unwrap();

    let mut game = Game::new(world, SimConfig::default()).unwrap();

    let result = game.process().unwrap();
    assert_eq!(result.flags, GameFlags::NEEDS_PAUSE);
    assert!(!game.world().actor(victim_id).unwrap().is_alive());

    let result = game.process().unwrap();
    assert!(result.needs_input());
    assert_eq!(result.actor, Some(EntityId::PLAYER));
    assert_eq!(*log.borrow(), vec![survivor_id]);
    assert!(game.world().actor(victim_id).is_none());
    assert_eq!(game.world().actors().len(), 2);
}

#[test]
fn scheduler_waits_on_the_player_until_input_arrives() {
    let mut world = world(&["...."]);
    world
        .place(Actor::player(Position::new(0, 0), Speed::NORMAL, 10, 1))
        .unwrap();
    let mut game = Game::new(world, SimConfig::default()).unwrap();

    let result = game.process().unwrap();
    assert_eq!(result, dungeon_core::GameResult::needs_user_input(EntityId::PLAYER));
    let cursor = game.scheduler().cursor();

    // Pumping again without input does not move the scheduler.
    let again = game.process().unwrap();
    assert_eq!(again, result);
    assert_eq!(game.scheduler().cursor(), cursor);

    game.supply_player_action(Box::new(dungeon_core::WalkAction::new(
        EntityId::PLAYER,
        dungeon_core::Direction::East,
    )))
    .unwrap();
    let result = game.process().unwrap();
    assert!(result.needs_input());
    assert_eq!(game.world().player_position(), Some(Position::new(1, 0)));
    assert_eq!(game.world().turn(), 2);
}

#[test]
fn item_clock_burns_light_sources_at_its_own_pace() {
    let log = Log::default();
    let mut world = world(&["...."]);
    world
        .place(logged(Actor::player(Position::new(0, 0), Speed::NORMAL, 10, 1), &log))
        .unwrap();
    let torch = world.add_item(
        "torch",
        ItemLocation::Floor(Position::new(2, 0)),
        Some(ItemTick::Burning { fuel: 1 }),
    );
    let mut game = Game::new(world, SimConfig::default()).unwrap();

    let result = game.process().unwrap();
    assert_eq!(result.flags, GameFlags::NEEDS_PAUSE);
    assert_eq!(
        game.effects().as_slice(),
        &[dungeon_core::Effect::LightOut { item: torch }]
    );
    // The slowest tier needs four tick boundaries to afford one tick, and the
    // item clock runs after every actor has spent its energy.
    assert_eq!(game.world().turn(), 4);
    assert_eq!(log.borrow().len(), 4);
    assert_eq!(game.world().item(torch).and_then(|item| item.tick), None);
}

#[test]
fn behavior_without_an_action_is_fatal() {
    #[derive(Debug)]
    struct Broken;

    impl Behavior for Broken {
        fn kind(&self) -> BehaviorKind {
            BehaviorKind::Monster
        }

        fn next_action(&mut self, _actor: &Actor, _world: &World) -> Option<Box<dyn Action>> {
            None
        }
    }

    let mut world = world(&["...."]);
    world
        .place(
            Actor::player(Position::new(0, 0), Speed::NORMAL, 10, 1)
                .with_behavior(Box::new(Broken))
                .with_energy(Energy::new(60)),
        )
        .unwrap();
    let mut game = Game::new(world, SimConfig::default()).unwrap();

    let err = game.process().unwrap_err();
    assert!(matches!(
        err,
        dungeon_core::SimError::NoAction {
            behavior: BehaviorKind::Monster,
            ..
        }
    ));
}
