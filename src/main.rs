//! Rocket Dodge entry point
//!
//! On wasm this mounts the game on the page's `#rocketGame` canvas and runs
//! the animation-frame loop. Natively it runs a headless session with a
//! simple autopilot, which is handy for checking balance changes.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, PointerEvent,
    };

    use rocket_dodge::platform::{DomCarousel, LocalStore};
    use rocket_dodge::sim::{Direction, InputEvent, Key};
    use rocket_dodge::{Error, Game, Result, Theme, Tuning};

    const CANVAS_ID: &str = "rocketGame";

    /// Game plus the DOM handles it draws into
    struct Shell {
        game: Game<LocalStore, DomCarousel>,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        document: Document,
        last_time: Option<f64>,
    }

    impl Shell {
        /// Match the backing store to the CSS size and pixel ratio
        fn resize(&mut self) {
            let rect = self.canvas.get_bounding_client_rect();
            let (width, height) = (rect.width(), rect.height());
            if width <= 0.0 || height <= 0.0 {
                return;
            }
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            self.canvas.set_width((width * dpr) as u32);
            self.canvas.set_height((height * dpr) as u32);
            let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
            self.game.resize(width as f32, height as f32);
        }

        /// Canvas-relative CSS pixels for a pointer event
        fn local_point(&self, event: &PointerEvent) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                (f64::from(event.client_x()) - rect.left()) as f32,
                (f64::from(event.client_y()) - rect.top()) as f32,
            )
        }

        fn theme(&self) -> Theme {
            let attr = self
                .document
                .document_element()
                .and_then(|root| root.get_attribute("data-theme"));
            Theme::from_attr(attr.as_deref())
        }

        fn frame(&mut self, time: f64) {
            let dt = self
                .last_time
                .map(|last| ((time - last) / 1000.0).max(0.0))
                .unwrap_or(0.0);
            self.last_time = Some(time);

            let active = self.game.carousel().slide_active();
            self.game.tick(dt as f32, active);

            let palette = self.theme().palette();
            let Shell { game, ctx, .. } = self;
            game.render(ctx, palette);
        }
    }

    fn mount() -> Result<Rc<RefCell<Shell>>> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        let document = window.document().ok_or(Error::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(Error::MissingElement("#rocketGame"))?
            .dyn_into()
            .map_err(|_| Error::MissingElement("#rocketGame canvas"))?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(Error::NoContext)?
            .dyn_into()
            .map_err(|_| Error::NoContext)?;
        canvas.style().set_property("touch-action", "none")?;

        let tuning = Tuning::from_json_or_default(canvas.get_attribute("data-tuning").as_deref());
        let carousel = DomCarousel::find(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(tuning, LocalStore::new(), carousel, seed);
        log::info!("Game initialized with seed: {}", seed);

        let shell = Rc::new(RefCell::new(Shell {
            game,
            canvas,
            ctx,
            document,
            last_time: None,
        }));
        shell.borrow_mut().resize();

        setup_resize(&window, shell.clone());
        setup_buttons(shell.clone());
        setup_keyboard(&window, shell.clone());
        setup_pointer(shell.clone());

        Ok(shell)
    }

    fn setup_resize(window: &web_sys::Window, shell: Rc<RefCell<Shell>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            shell.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(shell: Rc<RefCell<Shell>>) {
        let buttons = match shell
            .borrow()
            .document
            .query_selector_all(".hero-game-controls .game-key")
        {
            Ok(list) => list,
            Err(_) => return,
        };

        for i in 0..buttons.length() {
            let Some(button) = buttons
                .item(i)
                .and_then(|n| n.dyn_into::<web_sys::Element>().ok())
            else {
                continue;
            };
            let Some(direction) = button
                .get_attribute("data-dir")
                .as_deref()
                .and_then(Direction::from_attr)
            else {
                log::warn!("Control button without a valid data-dir");
                continue;
            };

            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().game.push_input(InputEvent::Nudge(direction));
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &web_sys::Window, shell: Rc<RefCell<Shell>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(key) = Key::from_key_name(&event.key()) else {
                return;
            };
            let mut s = shell.borrow_mut();
            if s.game.handles_key(key) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                s.game.push_input(InputEvent::Key(key));
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_pointer(shell: Rc<RefCell<Shell>>) {
        let canvas = shell.borrow().canvas.clone();

        {
            let shell = shell.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut s = shell.borrow_mut();
                let (x, y) = s.local_point(&event);
                s.game.push_input(InputEvent::PointerDown { x, y });
                let _ = target.set_pointer_capture(event.pointer_id());
            });
            let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut s = shell.borrow_mut();
                let (x, y) = s.local_point(&event);
                s.game.push_input(InputEvent::PointerMove { x, y });
            });
            let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let shell = shell.clone();
            let target = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                shell.borrow_mut().game.push_input(InputEvent::PointerUp);
                let _ = target.release_pointer_capture(event.pointer_id());
            });
            let _ = canvas.add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                shell.borrow_mut().game.push_input(InputEvent::PointerUp);
            });
            let _ = canvas.add_event_listener_with_callback("pointercancel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(shell: Rc<RefCell<Shell>>, time: f64) {
        shell.borrow_mut().frame(time);
        request_animation_frame(shell);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        match mount() {
            Ok(shell) => {
                request_animation_frame(shell);
                log::info!("Rocket game running");
            }
            // Pages without the game slide are normal; stay quiet
            Err(e) => log::info!("Rocket game not mounted: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rocket_dodge::platform::{MemoryStore, PinLog};
    use rocket_dodge::renderer::hud_text;
    use rocket_dodge::sim::{Direction, GameState, InputEvent, Key};
    use rocket_dodge::{Game, Tuning};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Frames between autopilot corrections
    const STEER_EVERY: u32 = 6;

    /// Steer away from the closest obstacle coming up on the rocket
    fn autopilot(state: &GameState) -> Option<Direction> {
        let rocket = &state.rocket;
        let threat = state
            .obstacles
            .iter()
            .filter(|o| o.pos > rocket.pos - 0.05 && o.pos < rocket.pos + 0.25)
            .min_by(|a, b| a.pos.total_cmp(&b.pos))?;

        if threat.offset >= rocket.offset {
            Some(Direction::Down)
        } else {
            Some(Direction::Up)
        }
    }

    pub fn run(seconds: f32, seed: u64) {
        let mut game = Game::new(Tuning::default(), MemoryStore::new(), PinLog::default(), seed);
        game.resize(960.0, 540.0);

        let frames = (seconds / FRAME_DT).round() as u32;
        let mut runs = 1;
        for frame in 0..frames {
            if game.state().game_over {
                log::info!("Run {} ended: {}", runs, hud_text(game.state()));
                game.push_input(InputEvent::Key(Key::Confirm));
                runs += 1;
            } else if frame % STEER_EVERY == 0 {
                if let Some(direction) = autopilot(game.state()) {
                    game.push_input(InputEvent::Nudge(direction));
                }
            }
            game.tick(FRAME_DT, true);
        }

        let state = game.state();
        log::info!(
            "Simulated {:.1}s over {} run(s): {} ({} obstacles live, game over: {})",
            seconds,
            runs,
            hud_text(state),
            state.obstacles.len(),
            state.game_over
        );
        println!("{}", hud_text(state));
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(30.0);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    log::info!("Rocket Dodge (headless) starting, seed {}", seed);
    headless::run(seconds, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
