//! Turn sequencing: player action, enemy reaction, field-of-view
//! refresh.

use serde::{Deserialize, Serialize};

use crate::action::{self, Action, ActionResult, TargetRequest};
use crate::consts::FOV_RADIUS;
use crate::data::{colors, templates};
use crate::entity::{EntityId, EntityStore};
use crate::error::GameError;
use crate::map::{fov, generation, DungeonConfig, GameMap};
use crate::message::MessageLog;
use crate::rng::GameRng;

/// The whole simulation state for a run: one floor at a time, plus
/// everything that persists across floors. Serializable as a unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: DungeonConfig,
    pub map: GameMap,
    pub store: EntityStore,
    pub player: EntityId,
    pub log: MessageLog,
    pub rng: GameRng,
    pub current_floor: u32,
    pub turns: u64,
    pub game_over: bool,
}

impl GameState {
    pub fn new(seed: u64) -> Result<Self, GameError> {
        Self::with_config(DungeonConfig::default(), seed)
    }

    pub fn with_config(config: DungeonConfig, seed: u64) -> Result<Self, GameError> {
        let mut rng = GameRng::new(seed);
        let floor = generation::generate(&config, 1, 1, &mut rng)?;
        let mut store = floor.store;
        let (px, py) = floor.spawn;
        let player = store.spawn(templates::player(), px, py);

        let mut log = MessageLog::new();
        log.add(
            "Hello and welcome, adventurer, to yet another dungeon!",
            colors::WELCOME_TEXT,
        );

        let mut state = Self {
            config,
            map: floor.map,
            store,
            player,
            log,
            rng,
            current_floor: 1,
            turns: 0,
            game_over: false,
        };
        state.refresh_fov();
        Ok(state)
    }

    /// Recompute visibility from the player's cell. Explored cells
    /// accumulate; visible cells are rebuilt from scratch.
    pub fn refresh_fov(&mut self) {
        if let Some((x, y)) = self.store.get(self.player).map(|p| (p.x, p.y)) {
            fov::compute(&mut self.map, x, y, FOV_RADIUS);
        }
    }

    /// Take the stairs: regenerate the floor below and carry the
    /// player (inventory, equipment, stats) onto it.
    pub(crate) fn descend(&mut self) -> Result<ActionResult, GameError> {
        let on_stairs = self
            .store
            .get(self.player)
            .is_some_and(|p| self.map.downstairs == Some((p.x, p.y)));
        if !on_stairs {
            return Ok(ActionResult::Impossible(
                "There are no stairs here.".into(),
            ));
        }
        // Generate before touching the current floor: a generation
        // failure must leave the state intact, player included.
        let next = self.current_floor + 1;
        let floor =
            generation::generate(&self.config, next, self.store.next_id(), &mut self.rng)?;
        let Some(mut player) = self.store.remove(self.player) else {
            return Ok(ActionResult::NoTime);
        };
        self.current_floor = next;
        self.map = floor.map;
        self.store = floor.store;
        player.x = floor.spawn.0;
        player.y = floor.spawn.1;
        self.store.insert(player);
        self.refresh_fov();
        self.log
            .add("You descend the staircase.", colors::DESCEND);
        Ok(ActionResult::Success)
    }

    /// Give every actor except the player its turn, in a snapshot
    /// order fixed before the sweep. Each AI is taken out of its
    /// entity while deciding so it can read the rest of the store.
    fn run_enemy_turns(&mut self) -> Result<(), GameError> {
        for id in self.store.ids() {
            if id == self.player {
                continue;
            }
            if self.game_over {
                break;
            }
            let Some(entity) = self.store.get_mut(id) else {
                continue;
            };
            if !entity.is_actor() {
                continue;
            }
            let Some(mut ai) = entity.ai.take() else {
                continue;
            };
            let was_confused = ai.is_confused();
            let action = ai.decide(&self.map, &self.store, id, self.player, &mut self.rng);
            if was_confused && !ai.is_confused() {
                if let Some(name) = self.store.get(id).map(|e| e.name.clone()) {
                    self.log
                        .info(format!("The {name} is no longer confused."));
                }
            }
            if let Some(entity) = self.store.get_mut(id) {
                if entity.ai.is_none() {
                    entity.ai = Some(ai);
                }
            }
            action::resolve(self, id, action)?;
        }
        Ok(())
    }

    pub fn requires_level_up(&self) -> bool {
        self.store
            .get(self.player)
            .and_then(|p| p.level.as_ref())
            .is_some_and(|l| l.requires_level_up())
    }

    /// Level-up choice: +20 max HP (and current HP).
    pub fn increase_max_hp(&mut self) {
        if !self.requires_level_up() {
            return;
        }
        if let Some(player) = self.store.get_mut(self.player) {
            if let Some(fighter) = player.fighter.as_mut() {
                fighter.max_hp += 20;
                fighter.hp += 20;
            }
        }
        self.log.info("Your health improves!");
        self.advance_level();
    }

    /// Level-up choice: +1 base power.
    pub fn increase_power(&mut self) {
        if !self.requires_level_up() {
            return;
        }
        if let Some(player) = self.store.get_mut(self.player) {
            if let Some(fighter) = player.fighter.as_mut() {
                fighter.base_power += 1;
            }
        }
        self.log.info("You feel stronger!");
        self.advance_level();
    }

    /// Level-up choice: +1 base defense.
    pub fn increase_defense(&mut self) {
        if !self.requires_level_up() {
            return;
        }
        if let Some(player) = self.store.get_mut(self.player) {
            if let Some(fighter) = player.fighter.as_mut() {
                fighter.base_defense += 1;
            }
        }
        self.log.info("Your movements are getting swifter!");
        self.advance_level();
    }

    fn advance_level(&mut self) {
        if let Some(level) = self
            .store
            .get_mut(self.player)
            .and_then(|p| p.level.as_mut())
        {
            level.increase_level();
        }
    }
}

/// What the external layer should do after a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickResult {
    /// Keep playing; render the new state.
    Continue,
    /// The submitted item needs a target cell; re-submit the same
    /// `UseItem` with `target` filled in.
    NeedsTarget(TargetRequest),
    /// Terminal: the player is dead.
    PlayerDied(String),
    /// Orderly shutdown was requested.
    Quit,
}

/// Drives one player action per tick and everything that follows from
/// it.
pub struct GameLoop {
    state: GameState,
}

impl GameLoop {
    pub fn new(seed: u64) -> Result<Self, GameError> {
        Ok(Self {
            state: GameState::new(seed)?,
        })
    }

    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Resolve one player action. Turn-consuming actions are followed
    /// by every enemy's turn and a field-of-view refresh; rejected
    /// ones leave the turn counter alone.
    pub fn tick(&mut self, action: Action) -> Result<TickResult, GameError> {
        if self.state.game_over {
            return Ok(match action {
                Action::Escape => TickResult::Quit,
                _ => TickResult::PlayerDied("YOU DIED!".into()),
            });
        }

        let player = self.state.player;
        match action::resolve(&mut self.state, player, action)? {
            ActionResult::Quit => Ok(TickResult::Quit),
            ActionResult::NeedsTarget(request) => Ok(TickResult::NeedsTarget(request)),
            ActionResult::Impossible(message) => {
                self.state.log.add(message, colors::IMPOSSIBLE);
                Ok(TickResult::Continue)
            }
            ActionResult::NoTime => Ok(TickResult::Continue),
            ActionResult::Success => {
                if !self.state.game_over {
                    self.state.run_enemy_turns()?;
                }
                self.state.refresh_fov();
                self.state.turns += 1;
                if self.state.game_over {
                    Ok(TickResult::PlayerDied("YOU DIED!".into()))
                } else {
                    Ok(TickResult::Continue)
                }
            }
        }
    }
}

#[cfg(test)]
impl GameState {
    /// Open rectangular floor with the player standing mid-field and
    /// visibility computed. Keeps action tests independent of the
    /// generator.
    pub(crate) fn arena(width: i32, height: i32) -> Self {
        use crate::map::TileKind;

        let mut map = GameMap::new(width, height);
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, TileKind::Floor);
            }
        }
        let mut store = EntityStore::new();
        let player = store.spawn(templates::player(), width / 2, height / 2);
        let mut state = Self {
            config: DungeonConfig::default(),
            map,
            store,
            player,
            log: MessageLog::new(),
            rng: GameRng::new(7),
            current_floor: 1,
            turns: 0,
            game_over: false,
        };
        state.refresh_fov();
        state
    }

    pub(crate) fn spawn_at(
        &mut self,
        entity: crate::entity::Entity,
        x: i32,
        y: i32,
    ) -> EntityId {
        self.store.spawn(entity, x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::templates;
    use crate::map::TileKind;

    fn loop_from(state: GameState) -> GameLoop {
        GameLoop::from_state(state)
    }

    #[test]
    fn test_new_game_greets_and_sees() {
        let game = GameLoop::new(42).unwrap();
        let state = game.state();
        assert_eq!(state.turns, 0);
        assert!(
            state
                .log
                .messages()
                .iter()
                .any(|m| m.text.contains("welcome"))
        );
        let player = state.store.get(state.player).unwrap();
        assert!(state.map.is_visible(player.x, player.y));
    }

    #[test]
    fn test_wait_consumes_a_turn() {
        let mut game = loop_from(GameState::arena(9, 9));
        assert_eq!(game.tick(Action::Wait).unwrap(), TickResult::Continue);
        assert_eq!(game.state().turns, 1);
    }

    #[test]
    fn test_wall_bump_preserves_the_turn() {
        let mut game = loop_from(GameState::arena(9, 9));
        game.state.map.set_tile(5, 4, TileKind::Wall);
        assert_eq!(
            game.tick(Action::Move { dx: 1, dy: 0 }).unwrap(),
            TickResult::Continue
        );
        assert_eq!(game.state().turns, 0);
        assert!(game.state().log.messages().is_empty());
    }

    #[test]
    fn test_impossible_action_preserves_the_turn_but_logs() {
        let mut game = loop_from(GameState::arena(9, 9));
        game.tick(Action::Pickup).unwrap();
        assert_eq!(game.state().turns, 0);
        assert_eq!(game.state().log.messages().len(), 1);
    }

    #[test]
    fn test_escape_quits() {
        let mut game = loop_from(GameState::arena(9, 9));
        assert_eq!(game.tick(Action::Escape).unwrap(), TickResult::Quit);
    }

    #[test]
    fn test_enemies_take_a_turn_after_the_player() {
        let mut state = GameState::arena(11, 11);
        let orc = state.spawn_at(templates::orc(), 9, 5);
        state.refresh_fov();
        let mut game = loop_from(state);
        game.tick(Action::Wait).unwrap();
        let orc = game.state().store.get(orc).unwrap();
        // the orc saw the player and closed in
        assert!(orc.chebyshev_distance(5, 5) < 4);
    }

    #[test]
    fn test_adjacent_enemy_fights_back() {
        let mut state = GameState::arena(9, 9);
        state.spawn_at(templates::orc(), 5, 4);
        state.refresh_fov();
        let mut game = loop_from(state);
        game.tick(Action::Wait).unwrap();
        let player = game.state().store.get(game.state().player).unwrap();
        // orc power 3 vs player defense 2
        assert_eq!(player.fighter.as_ref().unwrap().hp, 29);
    }

    #[test]
    fn test_rejected_action_gives_enemies_no_turn() {
        let mut state = GameState::arena(9, 9);
        state.spawn_at(templates::orc(), 5, 4);
        state.refresh_fov();
        let mut game = loop_from(state);
        game.tick(Action::Pickup).unwrap();
        let player = game.state().store.get(game.state().player).unwrap();
        assert_eq!(player.fighter.as_ref().unwrap().hp, 30);
    }

    #[test]
    fn test_player_death_is_terminal() {
        let mut state = GameState::arena(9, 9);
        let orc = state.spawn_at(templates::orc(), 5, 4);
        if let Some(f) = state.store.get_mut(orc).and_then(|e| e.fighter.as_mut()) {
            f.base_power = 100;
        }
        state.refresh_fov();
        let mut game = loop_from(state);
        match game.tick(Action::Wait).unwrap() {
            TickResult::PlayerDied(_) => {}
            other => panic!("expected PlayerDied, got {other:?}"),
        }
        // further gameplay input is refused
        match game.tick(Action::Wait).unwrap() {
            TickResult::PlayerDied(_) => {}
            other => panic!("expected PlayerDied, got {other:?}"),
        }
        assert_eq!(game.tick(Action::Escape).unwrap(), TickResult::Quit);
    }

    #[test]
    fn test_descend_requires_standing_on_stairs() {
        let mut game = loop_from(GameState::arena(9, 9));
        game.tick(Action::Descend).unwrap();
        assert!(
            game.state()
                .log
                .last()
                .unwrap()
                .text
                .contains("no stairs")
        );
        assert_eq!(game.state().current_floor, 1);
    }

    #[test]
    fn test_descend_carries_the_player_down() {
        let mut game = GameLoop::new(1234).unwrap();
        // teleport onto the stairs rather than walking the maze
        let stairs = game.state().map.downstairs.unwrap();
        let player = game.state.player;
        if let Some(p) = game.state.store.get_mut(player) {
            p.x = stairs.0;
            p.y = stairs.1;
        }
        let before = game.state().store.get(player).unwrap().fighter.clone();
        assert_eq!(game.tick(Action::Descend).unwrap(), TickResult::Continue);
        assert_eq!(game.state().current_floor, 2);
        let after = game.state().store.get(player).unwrap();
        assert_eq!(after.fighter, before);
        assert!(game.state().map.is_visible(after.x, after.y));
    }

    #[test]
    fn test_descend_keeps_entity_ids_unique() {
        for seed in 0..8 {
            let mut game = GameLoop::new(seed).unwrap();
            let stairs = game.state().map.downstairs.unwrap();
            let player = game.state.player;
            if let Some(p) = game.state.store.get_mut(player) {
                p.x = stairs.0;
                p.y = stairs.1;
            }
            game.tick(Action::Descend).unwrap();

            let mut ids = game.state().store.ids();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total, "seed {seed}: duplicate ids after descend");
            // the player id still resolves to the player, not a spawn
            assert_eq!(game.state().store.get(player).unwrap().glyph, '@');
        }
    }

    #[test]
    fn test_failed_descend_leaves_the_state_intact() {
        let mut game = GameLoop::new(7).unwrap();
        let stairs = game.state().map.downstairs.unwrap();
        let player = game.state.player;
        if let Some(p) = game.state.store.get_mut(player) {
            p.x = stairs.0;
            p.y = stairs.1;
        }
        // no room can fit, so generating the next floor must fail
        game.state.config.room_min_size = game.state.config.map_width;
        assert!(game.tick(Action::Descend).is_err());
        assert_eq!(game.state().current_floor, 1);
        assert!(game.state().store.get(player).is_some());
        assert_eq!(game.state().map.downstairs, Some(stairs));
    }

    #[test]
    fn test_explored_accumulates_across_moves() {
        let mut game = loop_from(GameState::arena(21, 9));
        let mut explored: Vec<(i32, i32)> = Vec::new();
        for _ in 0..6 {
            game.tick(Action::Move { dx: 1, dy: 0 }).unwrap();
            for &(x, y) in &explored {
                assert!(game.state().map.is_explored(x, y));
            }
            for x in 0..21 {
                for y in 0..9 {
                    if game.state().map.is_explored(x, y) && !explored.contains(&(x, y)) {
                        explored.push((x, y));
                    }
                }
            }
        }
    }

    #[test]
    fn test_level_up_flow() {
        let mut state = GameState::arena(9, 9);
        if let Some(l) = state
            .store
            .get_mut(state.player)
            .and_then(|p| p.level.as_mut())
        {
            l.add_xp(400);
        }
        assert!(state.requires_level_up());
        state.increase_max_hp();
        let player = state.store.get(state.player).unwrap();
        assert_eq!(player.fighter.as_ref().unwrap().max_hp, 50);
        assert_eq!(player.level.as_ref().unwrap().current_level, 2);
        assert!(!state.requires_level_up());
        // choices are inert without a pending level-up
        state.increase_power();
        assert_eq!(state.store.get(state.player).unwrap().power(), 5);
    }

    #[test]
    fn test_same_seed_same_dungeon() {
        let a = GameLoop::new(99).unwrap();
        let b = GameLoop::new(99).unwrap();
        for y in 0..a.state().map.height() {
            for x in 0..a.state().map.width() {
                assert_eq!(a.state().map.tile(x, y), b.state().map.tile(x, y));
            }
        }
        assert_eq!(a.state().store.len(), b.state().store.len());
    }
}
