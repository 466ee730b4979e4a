//! Skyhop entry point
//!
//! Native: headless runner that plays one seeded run with the autopilot.
//! Web: canvas bootstrap and requestAnimationFrame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, Window};

    use skyhop::audio::AudioManager;
    use skyhop::persistence::LocalStorage;
    use skyhop::platform::{Clock, InputLatch, Key, MonotonicClock};
    use skyhop::renderer::CanvasDraw;
    use skyhop::sim::Viewport;
    use skyhop::{FrameOutcome, Game, Settings, Tuning};

    struct App {
        game: Game<LocalStorage, AudioManager>,
        input: InputLatch,
        clock: MonotonicClock,
        draw: CanvasDraw,
        canvas: HtmlCanvasElement,
    }

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    fn window_size(window: &Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
        (w as f32, h as f32)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Skyhop starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()?;
        let (width, height) = window_size(&window);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let storage = LocalStorage::new();
        let settings = Settings::load(&storage);
        let audio = AudioManager::new(&settings);
        let clock = MonotonicClock::new();

        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        let game = Game::new(
            seed,
            Viewport::new(width, height),
            Tuning::default(),
            clock.now_ms(),
            storage,
            audio,
        );
        log::info!("Game initialized with seed: {seed}");

        let app = Rc::new(RefCell::new(App {
            game,
            input: InputLatch::new(),
            clock,
            draw: CanvasDraw::new(ctx, settings.show_labels),
            canvas,
        }));

        setup_input_handlers(&window, app.clone())?;
        setup_resize_handler(&window, app.clone())?;
        start_loop(app)?;

        log::info!("Skyhop running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    event.prevent_default();
                    app.borrow_mut().input.press(key);
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    app.borrow_mut().input.release(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_resize_handler(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else { return };
            let (w, h) = window_size(&window);
            let mut app = app.borrow_mut();
            app.canvas.set_width(w as u32);
            app.canvas.set_height(h as u32);
            app.game.resize(w, h);
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(callback: &FrameCallback) {
        let Some(window) = web_sys::window() else { return };
        if let Some(closure) = callback.borrow().as_ref() {
            let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        }
    }

    fn start_loop(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = callback.clone();

        *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            let outcome = {
                let mut guard = app.borrow_mut();
                let App {
                    game,
                    input,
                    clock,
                    draw,
                    ..
                } = &mut *guard;
                let outcome = game.frame(input.sample(), clock.now_ms());
                game.render(draw);
                outcome
            };

            match outcome {
                FrameOutcome::Running => request_animation_frame(&next),
                FrameOutcome::Ended { score, rank } => {
                    match rank {
                        Some(rank) => log::info!("Game over: {score} (rank {rank})"),
                        None => log::info!("Game over: {score}"),
                    }
                    // Drop the loop closure; reload the page to play again
                    next.borrow_mut().take();
                }
            }
        }));

        request_animation_frame(&callback);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    web_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};

    use skyhop::audio::NullAudio;
    use skyhop::consts::FRAME_MS;
    use skyhop::persistence::FileStorage;
    use skyhop::platform::{Clock, KeyState, ManualClock};
    use skyhop::sim::{Autopilot, Viewport};
    use skyhop::{FrameOutcome, Game, Tuning};

    #[derive(Clone, Copy, Debug, ValueEnum)]
    enum Bot {
        /// Climb with the demo autopilot
        Autopilot,
        /// Press nothing
        Idle,
    }

    #[derive(Parser, Debug)]
    #[command(name = "skyhop")]
    #[command(about = "Headless Skyhop runner: plays one seeded run and records the score")]
    struct Cli {
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stop after this many frames if the run is still going
        #[arg(long, default_value_t = 36_000)]
        frames: u64,
        #[arg(long, default_value_t = 800.0)]
        width: f32,
        #[arg(long, default_value_t = 600.0)]
        height: f32,
        /// JSON tuning file; defaults apply to missing fields
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Directory holding the leaderboard
        #[arg(long, default_value = ".skyhop")]
        data_dir: PathBuf,
        #[arg(long, value_enum, default_value_t = Bot::Autopilot)]
        bot: Bot,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read tuning file {}", path.display()))?;
        Tuning::from_json(&json).with_context(|| format!("invalid tuning file {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let cli = Cli::parse();
        let tuning = load_tuning(cli.tuning.as_ref())?;
        let storage = FileStorage::open(cli.data_dir.clone())
            .with_context(|| format!("failed to open data dir {}", cli.data_dir.display()))?;

        let clock = ManualClock::new(0.0);
        let mut game = Game::new(
            cli.seed,
            Viewport::new(cli.width, cli.height),
            tuning,
            clock.now_ms(),
            storage,
            NullAudio,
        );
        let mut autopilot = Autopilot::new();

        let mut outcome = FrameOutcome::Running;
        let mut frames = 0;
        while frames < cli.frames {
            clock.advance(FRAME_MS);
            let keys = match cli.bot {
                Bot::Autopilot => autopilot.decide(game.state()),
                Bot::Idle => KeyState::default(),
            };
            outcome = game.frame(keys, clock.now_ms());
            frames += 1;
            if outcome != FrameOutcome::Running {
                break;
            }
        }

        match outcome {
            FrameOutcome::Running => {
                log::info!("Frame limit reached at score {}", game.score());
                println!("seed {} still alive after {frames} frames, score {}", cli.seed, game.score());
            }
            FrameOutcome::Ended { score, rank } => {
                let rank = rank.map_or_else(|| "unranked".to_string(), |r| format!("rank {r}"));
                println!("seed {} ended after {frames} frames, score {score} ({rank})", cli.seed);
            }
        }
        if let Some(best) = game.high_scores().top_score() {
            println!("best score on record: {best}");
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
