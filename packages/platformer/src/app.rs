//! Windowed game, driven by the winit event loop.

use crate::{
    board::BoardId,
    camera::{VIEW_W, VIEW_H},
    frame_clock::FrameClock,
    game_state::GameState,
    input::KeyboardInput,
    render::{
        Renderer,
        RenderSnapshot,
        TraceRenderer,
    },
    settings::Settings,
};
use std::time::Instant;
use anyhow::{
    Context,
    Error,
    Result,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{
        ElementState,
        StartCause,
        WindowEvent,
    },
    event_loop::{
        ActiveEventLoop,
        ControlFlow,
        EventLoop,
    },
    keyboard::PhysicalKey,
    window::{
        Window,
        WindowId,
    },
};


const TITLE: &'static str = "Tiny Platformer";


/// Window title summarizing the game state.
pub fn window_title(snapshot: &RenderSnapshot) -> String {
    let mut title = format!(
        "{} | {} | {:.0}%",
        TITLE,
        snapshot.board.id,
        snapshot.progress.fraction * 100.0,
    );
    if let Some(label) = snapshot.door_label {
        title.push_str(&format!(" | Up: enter {}", label));
    }
    if let Some(ref buffer) = snapshot.cheat_buffer {
        title.push_str(&format!(" | /{}", buffer));
    }
    title
}

/// Renderer which shows status in the window title, and logs the HUD.
#[derive(Debug)]
pub struct TitleRenderer {
    window: Window,
    title: String,
    hud: TraceRenderer,
}

impl TitleRenderer {
    pub fn new(window: Window) -> Self {
        TitleRenderer {
            window,
            title: String::new(),
            hud: TraceRenderer::new(),
        }
    }
}

impl Renderer for TitleRenderer {
    fn draw(&mut self, snapshot: &RenderSnapshot) -> Result<()> {
        let title = window_title(snapshot);
        if title != self.title {
            self.window.set_title(&title);
            self.title = title;
        }
        self.hud.draw(snapshot)
    }
}


/// Winit application state.
pub struct App {
    state: GameState,
    input: KeyboardInput,
    clock: FrameClock,
    renderer: Option<TitleRenderer>,
    frame_due: bool,
    error: Option<Error>,
}

impl App {
    pub fn new(settings: &Settings, max_frames: Option<u64>) -> Self {
        App {
            state: GameState::new(BoardId::from_name(&settings.start_board), settings.tuning()),
            input: KeyboardInput::new(),
            clock: FrameClock::new(settings.fps, max_frames),
            renderer: None,
            frame_due: false,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: Error) {
        error!(%e, "stopping game");
        self.error = Some(e);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn new_events(&mut self, event_loop: &ActiveEventLoop, cause: StartCause) {
        self.frame_due = matches!(
            cause,
            StartCause::ResumeTimeReached { .. } | StartCause::Init
        );
        if self.frame_due {
            let target = self.clock.next_frame_target(Instant::now());
            event_loop.set_control_flow(ControlFlow::WaitUntil(target));
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(LogicalSize::new(VIEW_W as f64, VIEW_H as f64))
            .with_resizable(false);
        match event_loop.create_window(attributes).context("unable to create window") {
            Ok(window) => {
                info!("window created");
                self.renderer = Some(TitleRenderer::new(window));
            }
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => event_loop.exit(),
            WindowEvent::Focused(false) => {
                for event in self.input.release_all() {
                    self.state.apply_event(event);
                }
            }
            WindowEvent::KeyboardInput {
                event,
                is_synthetic: false,
                ..
            } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let input_event = match event.state {
                        ElementState::Pressed => self.input
                            .on_key_press(key, event.text.as_deref()),
                        ElementState::Released => self.input.on_key_release(key),
                    };
                    if let Some(input_event) = input_event {
                        self.state.apply_event(input_event);
                    }
                }
            }
            _ => (),
        }

        if self.state.quit_requested() {
            info!("quit requested");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_due {
            return;
        }
        self.frame_due = false;
        let renderer = match self.renderer.as_mut() {
            Some(renderer) => renderer,
            None => return,
        };

        let dt = self.clock.begin_frame(Instant::now());
        self.state.update(dt, self.input.horizontal());
        let drawn = renderer.draw(&self.state.snapshot(self.input.cheat_buffer()));
        if let Err(e) = drawn {
            self.fail(event_loop, e);
            return;
        }

        if self.clock.end_frame() {
            info!(frames = self.clock.frames(), "frame cap reached");
            event_loop.exit();
        }
    }
}

/// Open a window and run the game in it until quit, or until `max_frames` frames if given.
pub fn run_window(settings: &Settings, max_frames: Option<u64>) -> Result<()> {
    let event_loop = EventLoop::new().context("unable to create event loop")?;
    let mut app = App::new(settings, max_frames);
    event_loop.run_app(&mut app).context("event loop error")?;
    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}


#[test]
fn test_window_title() {
    let state = GameState::new(BoardId::Annex, crate::movement::Tuning::default());
    let title = window_title(&state.snapshot(None));
    assert_eq!(title, "Tiny Platformer | annex | 40%");
    let title = window_title(&state.snapshot(Some("g9")));
    assert!(title.ends_with(" | /g9"));
}
