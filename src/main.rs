//! Duo Runner entry point
//!
//! Host glue only: scheduling, input wiring, overlays and drawing. All
//! gameplay decisions live in `duo_runner::sim` and are reached exclusively
//! through the session control methods and `tick`.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use duo_runner::consts::*;
    use duo_runner::sim::{GameEvent, GameState, Phase, tick};

    /// Host instance: one session plus the canvas it is drawn to
    struct Host {
        state: GameState,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
    }

    impl Host {
        /// Advance by a raw wall-clock delta; `tick` clamps it.
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            self.last_time = time;
            tick(&mut self.state, dt);
        }

        /// React to drained core events by flipping overlays and the HUD.
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.take_events() {
                match event {
                    GameEvent::ScoreChanged(score) => {
                        if let Some(el) = document.get_element_by_id("score") {
                            el.set_text_content(Some(&score.to_string()));
                        }
                    }
                    GameEvent::Lost => show(document, "gameOverOverlay"),
                    GameEvent::Won => show(document, "finalOverlay"),
                    // The door is drawn from the snapshot each frame
                    GameEvent::EndingProgress(_) => {}
                }
            }
        }

        fn render(&self) {
            let ctx = &self.ctx;
            let state = &self.state;
            ctx.clear_rect(0.0, 0.0, FIELD_WIDTH as f64, FIELD_HEIGHT as f64);

            // Ground strip
            fill(ctx, "rgba(255,111,174,.45)");
            ctx.fill_rect(0.0, (GROUND_Y + 50.0) as f64, FIELD_WIDTH as f64, 6.0);

            for sign in &state.signs {
                self.draw_sign(sign);
            }
            for obstacle in &state.obstacles {
                self.draw_obstacle(obstacle);
            }
            if state.phase == Phase::Ending {
                self.draw_door();
            }
            self.draw_player();
            for heart in &state.hearts {
                self.draw_particle(heart, "rgba(255,111,174,.85)");
            }
            for piece in &state.confetti {
                self.draw_particle(piece, "rgba(127,225,211,.9)");
            }
        }

        fn draw_player(&self) {
            let ctx = &self.ctx;
            let p = self.state.player.rect();
            fill(ctx, "rgba(255,255,255,.95)");
            ctx.fill_rect(p.x as f64, p.y as f64, p.w as f64, p.h as f64);

            // The pair: two round heads side by side
            fill(ctx, "rgba(59,43,53,.85)");
            for cx in [p.x + 22.0, p.x + 48.0] {
                ctx.begin_path();
                ctx.arc(cx as f64, (p.y + 28.0) as f64, 8.0, 0.0, std::f64::consts::TAU)
                    .ok();
                ctx.fill();
            }
        }

        fn draw_obstacle(&self, obstacle: &duo_runner::sim::Obstacle) {
            let ctx = &self.ctx;
            let r = obstacle.rect;
            fill(ctx, "rgba(255,255,255,.95)");
            ctx.fill_rect(r.x as f64, r.y as f64, r.w as f64, r.h as f64);
            fill(ctx, "rgba(59,43,53,.90)");
            ctx.set_font("900 12px ui-sans-serif, system-ui");
            ctx.set_text_align("center");
            ctx.fill_text(
                obstacle.kind.label(),
                (r.x + r.w / 2.0) as f64,
                (r.y + 22.0) as f64,
            )
            .ok();
        }

        fn draw_sign(&self, sign: &duo_runner::sim::Sign) {
            let ctx = &self.ctx;
            let grace = self.state.tuning.sign_ttl_grace;
            // Fade out over the grace margin once the TTL has expired
            let alpha = ((sign.ttl + grace) / grace).clamp(0.0, 1.0).min(0.9);
            ctx.set_global_alpha(alpha as f64);
            fill(ctx, "rgba(255,111,174,.12)");
            ctx.fill_rect(sign.x as f64, sign.y as f64, SIGN_W as f64, 34.0);
            fill(ctx, "rgba(59,43,53,.90)");
            ctx.set_font("700 12px ui-sans-serif, system-ui");
            ctx.set_text_align("center");
            ctx.fill_text(
                sign.text,
                (sign.x + SIGN_W / 2.0) as f64,
                (sign.y + 21.0) as f64,
            )
            .ok();
            ctx.set_global_alpha(1.0);
        }

        fn draw_door(&self) {
            let Some(ending) = self.state.ending else {
                return;
            };
            let ctx = &self.ctx;
            let (x, y, w, h) = ((DOOR_X + 110.0) as f64, (GROUND_Y - 120.0) as f64, 110.0, 170.0);
            fill(ctx, "rgba(255,221,130,.35)");
            ctx.fill_rect(x, y, w, h);
            // Panel slides aside as the door opens
            fill(ctx, "rgba(59,43,53,.30)");
            ctx.fill_rect(x, y, w * (1.0 - ending.door_open as f64), h);
        }

        fn draw_particle(&self, p: &duo_runner::sim::Particle, color: &str) {
            let ctx = &self.ctx;
            ctx.save();
            ctx.set_global_alpha(p.alpha() as f64);
            fill(ctx, color);
            ctx.translate(p.pos.x as f64, p.pos.y as f64).ok();
            ctx.rotate(p.rot as f64).ok();
            let s = p.size as f64;
            ctx.fill_rect(-s / 2.0, -s / 2.0, s, s);
            ctx.restore();
        }
    }

    fn fill(ctx: &CanvasRenderingContext2d, color: &str) {
        ctx.set_fill_style(&JsValue::from_str(color));
    }

    fn show(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.class_list().add_1("show").ok();
        }
    }

    fn hide(document: &Document, id: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.class_list().remove_1("show").ok();
        }
    }

    fn hide_all_overlays(document: &Document) {
        for id in [
            "startOverlay",
            "pauseOverlay",
            "gameOverOverlay",
            "finalOverlay",
        ] {
            hide(document, id);
        }
    }

    fn begin_session(host: &Rc<RefCell<Host>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        hide_all_overlays(&document);
        if let Some(el) = document.get_element_by_id("score") {
            el.set_text_content(Some("0"));
        }
        host.borrow_mut().state.start();
    }

    /// Wire a click handler on a button id
    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) {
        let document = web_sys::window().unwrap().document().unwrap();
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(host: Rc<RefCell<Host>>, time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut h = host.borrow_mut();
            h.update(time);
            h.handle_events(&document);
            h.render();
        }
        request_animation_frame(host);
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");
        log::info!("Duo Runner starting...");

        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("canvas#game not found")
            .dyn_into()
            .unwrap();
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .unwrap()
            .unwrap()
            .dyn_into()
            .unwrap();

        let seed = js_sys::Date::now() as u64;
        let host = Rc::new(RefCell::new(Host {
            state: GameState::new(seed),
            ctx,
            last_time: 0.0,
        }));

        show(&document, "startOverlay");

        for id in ["btnStart", "btnRetry", "btnFinalRestart"] {
            let host = host.clone();
            on_click(id, move |_| begin_session(&host));
        }

        {
            let host = host.clone();
            on_click("btnPause", move |_| {
                let document = web_sys::window().unwrap().document().unwrap();
                let mut h = host.borrow_mut();
                h.state.pause();
                if h.state.phase == Phase::Paused {
                    show(&document, "pauseOverlay");
                }
            });
        }
        {
            let host = host.clone();
            on_click("btnResume", move |_| {
                let document = web_sys::window().unwrap().document().unwrap();
                host.borrow_mut().state.resume();
                hide(&document, "pauseOverlay");
            });
        }

        // Tap anywhere on the canvas to jump
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                host.borrow_mut().state.request_jump();
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Space = jump, Escape = pause
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let document = web_sys::window().unwrap().document().unwrap();
                match event.code().as_str() {
                    "Space" => host.borrow_mut().state.request_jump(),
                    "Escape" => {
                        let mut h = host.borrow_mut();
                        h.state.pause();
                        if h.state.phase == Phase::Paused {
                            show(&document, "pauseOverlay");
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_host::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use duo_runner::Tuning;
    use duo_runner::consts::*;
    use duo_runner::sim::{GameEvent, GameState, Phase, tick};

    env_logger::init();

    // Optional balance override next to the binary
    let tuning = match std::fs::read_to_string("tuning.json") {
        Ok(json) => match serde_json::from_str::<Tuning>(&json) {
            Ok(t) => {
                log::info!("loaded tuning.json override");
                t
            }
            Err(err) => {
                log::warn!("ignoring malformed tuning.json: {err}");
                Tuning::default()
            }
        },
        Err(_) => Tuning::default(),
    };

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(20240907);
    log::info!("headless demo, seed {seed}");

    let mut state = GameState::with_tuning(seed, tuning);
    state.start();

    // Naive pilot: first jump when the lead obstacle gets close, second jump
    // near the apex. Good enough to clear most traffic.
    const DT: f32 = 1.0 / 60.0;
    let mut ticks_since_jump: Option<u32> = None;
    for _ in 0..(240.0 / DT) as u32 {
        let approaching = state
            .obstacles
            .iter()
            .find(|o| !o.scored)
            .map(|o| o.rect.x);
        if state.player.grounded && approaching.is_some_and(|x| x <= PLAYER_X + 76.0) {
            state.request_jump();
            ticks_since_jump = Some(0);
        } else if let Some(t) = ticks_since_jump.as_mut() {
            *t += 1;
            if *t == 26 {
                state.request_jump();
                ticks_since_jump = None;
            }
        }

        tick(&mut state, DT);
        for event in state.take_events() {
            match event {
                GameEvent::ScoreChanged(score) => log::info!("score {score}"),
                GameEvent::Lost => log::info!("lost"),
                GameEvent::Won => log::info!("won"),
                GameEvent::EndingProgress(frac) => log::debug!("door {frac:.2}"),
            }
        }
        if matches!(state.phase, Phase::Lost) || state.ending.is_some_and(|e| e.door_open >= 1.0) {
            break;
        }
    }

    println!(
        "demo finished: phase {:?}, score {}, elapsed {:.1}s",
        state.phase, state.score, state.elapsed
    );
}
