//! Circle Lab entry point
//!
//! Browser host on wasm; a small scoring CLI natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::{Rc, Weak};

    use glam::DVec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, PointerEvent};

    use circle_lab::audio::{AudioManager, SoundCue};
    use circle_lab::controller::Update;
    use circle_lab::effects::Confetti;
    use circle_lab::platform::web::RafScheduler;
    use circle_lab::sim::{PointerKind, PointerSample, SessionEvent, SessionInput, SessionPhase};
    use circle_lab::ui::{STROKE_COLOR, WIN_STROKE_COLOR};
    use circle_lab::{FrameSnapshot, Point, SessionController, Settings};

    /// Game instance holding all browser-side state
    struct Game {
        controller: SessionController<RafScheduler>,
        document: Document,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        audio: AudioManager,
        confetti: Option<Confetti>,
        /// Host time the win flash ends (ms)
        win_flash_until: Option<f64>,
        /// Pending `setTimeout` that opens the prize dialog
        modal_timer: Option<i32>,
        last_frame_ms: Option<f64>,
        /// Canvas size in CSS pixels
        size: DVec2,
        dpr: f64,
    }

    impl Game {
        /// Match the backing store to the CSS size
        fn fit_canvas(&mut self) {
            let window = web_sys::window();
            self.dpr = window.map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
            self.size = DVec2::new(
                self.canvas.client_width() as f64,
                self.canvas.client_height() as f64,
            );
            self.canvas.set_width((self.size.x * self.dpr) as u32);
            self.canvas.set_height((self.size.y * self.dpr) as u32);
            if let Some(confetti) = &mut self.confetti {
                confetti.resize(self.size.as_vec2());
            }
        }

        /// Canvas-local position of a pointer event
        fn local_pos(&self, event: &PointerEvent) -> Point {
            let rect = self.canvas.get_bounding_client_rect();
            DVec2::new(
                event.client_x() as f64 - rect.left(),
                event.client_y() as f64 - rect.top(),
            )
        }

        fn pointer_sample(&self, event: &PointerEvent) -> PointerSample {
            let kind = PointerKind::from_pointer_type(&event.pointer_type());
            let coalesced: Vec<Point> = event
                .get_coalesced_events()
                .iter()
                .filter_map(|e| e.dyn_into::<PointerEvent>().ok())
                .map(|e| self.local_pos(&e))
                .collect();
            PointerSample::new(event.pointer_id(), kind, self.local_pos(event))
                .with_coalesced(coalesced)
        }

        fn handle(&mut self, input: SessionInput, now_ms: f64) {
            let update = self.controller.handle(input, now_ms);
            self.react(&update, now_ms);
        }

        /// Cosmetic reactions: sound, confetti, claim form
        fn react(&mut self, update: &Update, now_ms: f64) {
            for event in &update.events {
                if let Some(cue) = SoundCue::for_event(event) {
                    self.audio.play(cue, self.controller.settings());
                }
                match event {
                    SessionEvent::StrokeStarted { .. } | SessionEvent::Reset => {
                        self.confetti = None;
                        self.win_flash_until = None;
                        self.cancel_prize_modal();
                        self.set_hidden("prize-modal", true);
                    }
                    SessionEvent::Evaluated(verdict) => {
                        if verdict.won && self.controller.settings().effective_celebrations() {
                            let origin = (self.size * 0.5).as_vec2();
                            self.confetti = Some(Confetti::burst(
                                js_sys::Date::now() as u64,
                                origin,
                                self.size.as_vec2(),
                            ));
                            self.win_flash_until =
                                Some(now_ms + self.controller.settings().win_flash_ms as f64);
                        }
                        if verdict.won {
                            self.publish_claim();
                        }
                    }
                    _ => {}
                }
            }
        }

        /// Hand a winning verdict to the registration form
        fn publish_claim(&mut self) {
            let Some(ticket) = self.controller.prize_claim() else {
                return;
            };
            match ticket.to_json() {
                Ok(json) => {
                    log::info!("Claim ticket: {}", json);
                    if let Some(el) = self.document.get_element_by_id("claim-ticket") {
                        el.set_text_content(Some(&json));
                    }
                }
                Err(e) => log::warn!("Failed to encode claim ticket: {}", e),
            }

            let delay = self.controller.settings().modal_delay_ms as i32;
            let document = self.document.clone();
            let show = Closure::once_into_js(move || {
                if let Some(el) = document.get_element_by_id("prize-modal") {
                    let _ = el.set_attribute("class", "");
                }
            });
            self.cancel_prize_modal();
            self.modal_timer = web_sys::window().and_then(|window| {
                window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(
                        show.unchecked_ref(),
                        delay,
                    )
                    .ok()
            });
        }

        fn cancel_prize_modal(&mut self) {
            if let (Some(id), Some(window)) = (self.modal_timer.take(), web_sys::window()) {
                window.clear_timeout_with_handle(id);
            }
        }

        /// Flip mute and persist the change
        fn toggle_mute(&mut self) {
            let mut settings = self.controller.settings().clone();
            settings.muted = !settings.muted;
            settings.save();
            log::info!("Sound {}", if settings.muted { "off" } else { "on" });
            if let Some(btn) = self.document.get_element_by_id("mute-btn") {
                btn.set_text_content(Some(if settings.muted { "Sound off" } else { "Sound on" }));
            }
            self.controller.set_settings(settings);
        }

        fn set_hidden(&self, id: &str, hidden: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
            }
        }

        /// Pending redraw is running
        fn frame(&mut self, time: f64) {
            let snapshot = self.controller.on_frame(time);
            let dt = self
                .last_frame_ms
                .map(|last| ((time - last) / 1000.0) as f32)
                .unwrap_or(0.0)
                .clamp(0.0, 0.1);
            self.last_frame_ms = Some(time);

            self.render(&snapshot, time);
            self.update_hud(&snapshot);

            let mut animating = false;
            if let Some(confetti) = &mut self.confetti {
                confetti.step(dt);
                if confetti.is_done() {
                    self.confetti = None;
                } else {
                    animating = true;
                }
            }
            if self.win_flash_until.is_some_and(|until| time < until) {
                animating = true;
            } else {
                self.win_flash_until = None;
            }
            if animating {
                self.controller.request_redraw();
            } else {
                self.last_frame_ms = None;
            }
        }

        fn render(&self, snapshot: &FrameSnapshot, time: f64) {
            let ctx = &self.ctx;
            let _ = ctx.set_transform(self.dpr, 0.0, 0.0, self.dpr, 0.0, 0.0);
            ctx.clear_rect(0.0, 0.0, self.size.x, self.size.y);

            if let Some(until) = self.win_flash_until {
                let remaining = ((until - time) / 1000.0).max(0.0);
                let alpha = 0.12 * (0.5 + 0.5 * (remaining * 6.0).sin());
                ctx.set_fill_style_str(&snapshot.color.rgba(alpha as f32));
                ctx.fill_rect(0.0, 0.0, self.size.x, self.size.y);
            }

            if let Some(guide) = &snapshot.guide {
                ctx.set_stroke_style_str(&snapshot.color.rgba(0.2));
                ctx.set_line_width(1.0);
                ctx.begin_path();
                let _ = ctx.arc(guide.center.x, guide.center.y, guide.radius, 0.0, TAU);
                ctx.stroke();

                // Crosshair on the fitted center
                ctx.begin_path();
                ctx.move_to(guide.center.x - 6.0, guide.center.y);
                ctx.line_to(guide.center.x + 6.0, guide.center.y);
                ctx.move_to(guide.center.x, guide.center.y - 6.0);
                ctx.line_to(guide.center.x, guide.center.y + 6.0);
                ctx.stroke();
            }

            if snapshot.path.len() >= 2 {
                ctx.set_line_cap("round");
                ctx.set_line_join("round");

                // Glow
                ctx.set_stroke_style_str(&snapshot.color.rgba(0.35));
                ctx.set_line_width(14.0);
                trace_path(ctx, &snapshot.path);
                ctx.stroke();

                // Core
                let core = if snapshot.phase == SessionPhase::Won {
                    WIN_STROKE_COLOR
                } else {
                    STROKE_COLOR
                };
                ctx.set_stroke_style_str(core);
                ctx.set_line_width(4.0);
                trace_path(ctx, &snapshot.path);
                ctx.stroke();
            }

            if let Some(confetti) = &self.confetti {
                for p in confetti.particles() {
                    ctx.set_fill_style_str(p.color_hex());
                    ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
                }
            }
        }

        fn update_hud(&self, snapshot: &FrameSnapshot) {
            if let Some(el) = self.document.get_element_by_id("status") {
                el.set_text_content(Some(&snapshot.status));
            }
            if let Some(el) = self.document.get_element_by_id("score") {
                let text = snapshot
                    .score
                    .map(|s| format!("{}%", s))
                    .unwrap_or_else(|| "--".to_string());
                el.set_text_content(Some(&text));
            }
        }
    }

    fn trace_path(ctx: &CanvasRenderingContext2d, path: &[Point]) {
        ctx.begin_path();
        if let Some((first, rest)) = path.split_first() {
            ctx.move_to(first.x, first.y);
            for p in rest {
                ctx.line_to(p.x, p.y);
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Circle Lab starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let game = Rc::new_cyclic(|weak: &Weak<RefCell<Game>>| {
            let weak = weak.clone();
            let scheduler = RafScheduler::new(Rc::new(move |time: f64| {
                if let Some(game) = weak.upgrade() {
                    game.borrow_mut().frame(time);
                }
            }));
            RefCell::new(Game {
                controller: SessionController::new(settings, scheduler),
                document: document.clone(),
                canvas: canvas.clone(),
                ctx,
                audio: AudioManager::new(),
                confetti: None,
                win_flash_until: None,
                modal_timer: None,
                last_frame_ms: None,
                size: DVec2::ZERO,
                dpr: 1.0,
            })
        });

        {
            let mut g = game.borrow_mut();
            g.fit_canvas();
            g.controller.request_redraw();
        }

        setup_pointer_handlers(&canvas, &game);
        setup_resize_handler(&window, &game);
        setup_reset_button(&document, &game);
        setup_mute_button(&document, &game);

        log::info!("Circle Lab running!");
        Ok(())
    }

    fn setup_pointer_handlers(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        type ToInput = fn(PointerSample) -> SessionInput;
        let handlers: [(&str, ToInput); 5] = [
            ("pointerdown", SessionInput::Down),
            ("pointermove", SessionInput::Move),
            ("pointerup", SessionInput::Up),
            ("pointercancel", SessionInput::Cancel),
            ("pointerleave", SessionInput::Leave),
        ];

        for (name, to_input) in handlers {
            let game = game.clone();
            let target = canvas.clone();
            let is_down = name == "pointerdown";
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if is_down {
                    g.audio.resume();
                    let _ = target.set_pointer_capture(event.pointer_id());
                }
                let sample = g.pointer_sample(&event);
                g.handle(to_input(sample), event.time_stamp());
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(window: &web_sys::Window, game: &Rc<RefCell<Game>>) {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.handle(SessionInput::Resize, now_ms());
            g.fit_canvas();
            g.controller.request_redraw();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_reset_button(document: &Document, game: &Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("reset-btn") else {
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let mut g = game.borrow_mut();
            g.handle(SessionInput::Reset, now_ms());
            g.controller.request_redraw();
            log::info!("Session reset");
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_mute_button(document: &Document, game: &Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("mute-btn") else {
            return;
        };
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().toggle_mute();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use circle_lab::platform::ManualFrames;
    use circle_lab::sim::{PointerKind, PointerSample, SessionInput};
    use circle_lab::{Point, SessionController, Settings, circle_points};

    env_logger::init();
    log::info!("Circle Lab (native) starting...");

    // Optional argument: JSON array of [x, y] pairs
    let points: Vec<Point> = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read stroke file {}", path))?;
            let raw: Vec<[f64; 2]> = serde_json::from_str(&json)
                .with_context(|| format!("{} is not a JSON array of [x, y] points", path))?;
            raw.into_iter().map(Point::from).collect()
        }
        None => {
            log::info!("No stroke file given, scoring a synthetic circle");
            circle_points(Point::new(200.0, 200.0), 120.0, 64, 0.0)
        }
    };
    let Some((&first, rest)) = points.split_first() else {
        anyhow::bail!("stroke has no points");
    };

    let mut controller = SessionController::new(Settings::load(), ManualFrames::new());
    let sample = |pos| PointerSample::new(1, PointerKind::Mouse, pos);

    let mut now = 0.0;
    controller.handle(SessionInput::Down(sample(first)), now);
    for &pos in rest {
        now += 16.0;
        controller.handle(SessionInput::Move(sample(pos)), now);
        for _ in controller.scheduler_mut().take_due() {
            let snapshot = controller.on_frame(now);
            if let Some(score) = snapshot.live_update {
                log::debug!("Live score {} at {}ms", score, now);
            }
        }
    }
    controller.handle(SessionInput::Up(sample(*points.last().unwrap_or(&first))), now);

    let verdict = controller
        .verdict()
        .context("stroke was not evaluated")?;
    println!("Score: {}%", verdict.score);
    match verdict.tier {
        Some(tier) => println!(
            "Won tier {}: {}",
            tier.level(),
            controller.settings().prize_label(tier)
        ),
        None => println!("No prize"),
    }
    if let Some(ticket) = controller.claim_ticket() {
        println!("{}", ticket.to_json()?);
    }
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
