//! End-to-end runs through `Game` with headless capabilities

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use skyhop::audio::{SoundEffect, SoundSink};
use skyhop::consts::FRAME_MS;
use skyhop::persistence::{FileStorage, MemoryStorage, Storage};
use skyhop::platform::{Clock, KeyState, ManualClock};
use skyhop::renderer::{DrawCall, RecordingDraw};
use skyhop::sim::{Autopilot, Enemy, EnemyKind, GameState, Modifier, Platform, PlatformField, Viewport};
use skyhop::tuning::ModifierChances;
use skyhop::{FrameOutcome, Game, HighScores, Tuning};

#[derive(Clone, Default)]
struct Cues(Rc<RefCell<Vec<SoundEffect>>>);

impl Cues {
    fn played(&self) -> Vec<SoundEffect> {
        self.0.borrow().clone()
    }
}

impl SoundSink for Cues {
    fn play(&self, effect: SoundEffect) {
        self.0.borrow_mut().push(effect);
    }
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

/// A run whose only platform sits under the player's feet
fn ledge_state(modifier: Option<Modifier>) -> GameState {
    let tuning = Tuning {
        chances: ModifierChances::none(),
        ..Tuning::default()
    };
    let mut state = GameState::new(7, viewport(), tuning, 0.0);
    let feet = state.player.pos.y + state.player.size.y;
    let mut ledge = Platform::plain(42, Vec2::new(state.player.pos.x - 40.0, feet), 100.0);
    if let Some(modifier) = modifier {
        ledge.modifier = modifier;
    }
    let mut field = PlatformField::empty();
    field.platforms = vec![ledge];
    state.field = field;
    state
}

/// A run that ends on the first frame: a static enemy stands where the player lands
fn doomed_state() -> GameState {
    let mut state = ledge_state(None);
    let player_x = state.player.pos.x;
    let ledge = &mut state.field.platforms[0];
    let mut enemy = Enemy::spawn(ledge.index, ledge.span(), EnemyKind::Static, 0.0);
    enemy.pos.x = player_x;
    ledge.modifier = Modifier::Enemy(enemy);
    state
}

fn jump() -> KeyState {
    KeyState {
        jump: true,
        ..KeyState::default()
    }
}

#[test]
fn jump_plays_a_cue() {
    let cues = Cues::default();
    let mut game = Game::with_state(ledge_state(None), MemoryStorage::new(), cues.clone());
    let clock = ManualClock::new(0.0);

    clock.advance(FRAME_MS);
    assert_eq!(game.frame(KeyState::default(), clock.now_ms()), FrameOutcome::Running);
    assert!(cues.played().is_empty(), "landing is silent");

    clock.advance(FRAME_MS);
    game.frame(jump(), clock.now_ms());
    assert_eq!(cues.played(), vec![SoundEffect::Jump]);
    assert!(game.state().player.vel.y < 0.0);
}

#[test]
fn enemy_hit_ends_run_with_cues_and_rank() {
    let cues = Cues::default();
    let mut game = Game::with_state(doomed_state(), MemoryStorage::new(), cues.clone());

    let outcome = game.frame(KeyState::default(), FRAME_MS);
    assert_eq!(outcome, FrameOutcome::Ended { score: 0, rank: Some(1) });
    assert_eq!(cues.played(), vec![SoundEffect::Hit, SoundEffect::GameOver]);

    // Nothing more happens
    assert_eq!(game.frame(jump(), 2.0 * FRAME_MS), outcome);
    assert_eq!(cues.played().len(), 2);

    let storage = game.into_storage();
    assert_eq!(
        storage.get_item(HighScores::STORAGE_KEY).unwrap().as_deref(),
        Some("[0]")
    );
}

#[test]
fn leaderboard_carries_over_between_runs() {
    let mut storage = MemoryStorage::new();
    let mut board = HighScores::new();
    board.add_score(250);
    board.add_score(80);
    board.save(&mut storage).unwrap();

    let mut game = Game::with_state(doomed_state(), storage, Cues::default());
    assert_eq!(game.high_scores().top_score(), Some(250));

    let outcome = game.frame(KeyState::default(), FRAME_MS);
    assert_eq!(outcome, FrameOutcome::Ended { score: 0, rank: Some(3) });

    let again = Game::with_state(doomed_state(), game.into_storage(), Cues::default());
    assert_eq!(again.high_scores().scores(), &[250, 80, 0]);
}

#[test]
fn leaderboard_persists_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();

    let mut game = Game::with_state(doomed_state(), storage, Cues::default());
    game.frame(KeyState::default(), FRAME_MS);
    assert!(game.is_over());

    let reopened = FileStorage::open(dir.path()).unwrap();
    assert_eq!(HighScores::load(&reopened).scores(), &[0]);
}

#[test]
fn render_walks_whole_scene() {
    let mut game = Game::new(
        11,
        viewport(),
        Tuning::default(),
        0.0,
        MemoryStorage::new(),
        Cues::default(),
    );
    game.frame(KeyState::default(), FRAME_MS);

    let mut draw = RecordingDraw::new();
    game.render(&mut draw);

    assert_eq!(draw.calls.first(), Some(&DrawCall::Clear));
    assert_eq!(draw.calls.last(), Some(&DrawCall::Score(game.score())));
    let platforms = draw
        .calls
        .iter()
        .filter(|c| matches!(c, DrawCall::Platform { .. }))
        .count();
    assert_eq!(platforms, Tuning::default().platform_count);
    assert!(draw.calls.contains(&DrawCall::Player));
}

#[test]
fn same_seed_same_run() {
    fn play(seed: u64) -> (u64, Vec2, Vec<u64>) {
        let clock = ManualClock::new(0.0);
        let mut game = Game::new(
            seed,
            viewport(),
            Tuning::default(),
            clock.now_ms(),
            MemoryStorage::new(),
            Cues::default(),
        );
        let mut bot = Autopilot::new();
        for _ in 0..600 {
            clock.advance(FRAME_MS);
            let keys = bot.decide(game.state());
            if game.frame(keys, clock.now_ms()) != FrameOutcome::Running {
                break;
            }
        }
        let indices = game.state().field.iter().map(|p| p.index).collect();
        (game.score(), game.state().player.pos, indices)
    }

    assert_eq!(play(99), play(99));
}
