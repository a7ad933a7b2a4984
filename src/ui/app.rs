//! Main TUI application state and logic

use super::panes::{self, PaletteHit, PaletteHitboxes, SheetPhase};
use crate::execution::{
    DispatchUpdate, ExecutionDispatcher, ExecutionGateway, OutputLog, SourceMode,
};
use crate::session::{EditAction, SheetEvent, Session};
use crate::sheet::{glyph_controls, Direction as CursorDirection, Token, MAX_LINES};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// The main application state
pub struct App<G> {
    pub session: Session,
    dispatcher: ExecutionDispatcher<G>,
    pub output: OutputLog,
    pub output_scroll: usize,
    source_mode: SourceMode,

    /// Tokens behind the fixed glyph row
    glyphs: Vec<Token>,

    /// Palette slot chosen with the arrow keys
    pub selected_slot: usize,

    /// Button rectangles from the last draw
    hitboxes: PaletteHitboxes,

    blink_interval: Duration,
    last_blink: Instant,

    /// The next finished run is the whole-sheet run of a completed chapter
    awaiting_final_output: bool,

    pub should_quit: bool,
    pub status_message: String,
    pub status_is_error: bool,
}

impl<G: ExecutionGateway> App<G> {
    pub fn new(
        mut session: Session,
        dispatcher: ExecutionDispatcher<G>,
        source_mode: SourceMode,
        blink_interval: Duration,
    ) -> Self {
        let events = session.start();
        let mut app = App {
            session,
            dispatcher,
            output: OutputLog::new(),
            output_scroll: 0,
            source_mode,
            glyphs: glyph_controls(),
            selected_slot: 0,
            hitboxes: PaletteHitboxes::default(),
            blink_interval,
            last_blink: Instant::now(),
            awaiting_final_output: false,
            should_quit: false,
            status_message: String::from("Build the highlighted line"),
            status_is_error: false,
        };
        app.handle_sheet_events(events);
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.last_blink.elapsed() >= self.blink_interval {
                self.session.toggle_cursor_blink();
                self.last_blink = Instant::now();
            }

            self.poll_execution();

            // Poll with a timeout so blinking and run output keep updating
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key_event(key);
                    }
                    Event::Mouse(mouse) => self.handle_mouse_event(mouse),
                    _ => {}
                }
            }
        }

        self.dispatcher.cancel();
        Ok(())
    }

    fn phase(&self) -> SheetPhase {
        if self.dispatcher.is_busy() {
            SheetPhase::Running
        } else if self.session.worksheet().is_chapter_complete() {
            SheetPhase::Complete
        } else {
            SheetPhase::Typing
        }
    }

    fn exercise_label(&self) -> String {
        let key = self.session.key();
        format!("{} {}.{}", key.language, key.lesson + 1, key.chapter + 1)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();
        let palette_height = panes::pane_height(self.session.palette().rows());

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(palette_height),
                Constraint::Length(1),
            ])
            .split(size);

        // Sheet (left) | Output (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let is_typing = !self.session.worksheet().is_chapter_complete();

        panes::render_sheet_pane(
            frame,
            columns[0],
            self.session.worksheet(),
            self.session.title(),
            is_typing,
        );

        panes::render_output_pane(
            frame,
            columns[1],
            &self.output,
            self.dispatcher.is_busy(),
            &mut self.output_scroll,
        );

        self.hitboxes = panes::render_palette_pane(
            frame,
            main_chunks[1],
            self.session.palette(),
            &self.glyphs,
            self.selected_slot,
            is_typing,
        );

        panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.exercise_label(),
            &self.status_message,
            self.phase(),
            self.status_is_error,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::F(n @ 1..=12) => {
                self.insert_slot(usize::from(n) - 1);
            }
            KeyCode::Up => {
                self.selected_slot = self.selected_slot.saturating_sub(1);
            }
            KeyCode::Down => {
                let last = self.session.palette().len().saturating_sub(1);
                self.selected_slot = (self.selected_slot + 1).min(last);
            }
            KeyCode::Enter => {
                self.insert_slot(self.selected_slot);
            }
            KeyCode::Left => self.edit(EditAction::MoveCursor(CursorDirection::Left)),
            KeyCode::Right => self.edit(EditAction::MoveCursor(CursorDirection::Right)),
            KeyCode::Backspace => self.edit(EditAction::Backspace),
            KeyCode::Tab => self.insert_glyph("\t"),
            KeyCode::Char(c) => {
                let mut buf = [0u8; 4];
                self.insert_glyph(c.encode_utf8(&mut buf));
            }
            _ => {}
        }
    }

    /// Handle mouse clicks on palette and glyph buttons
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        match self.hitboxes.hit(mouse.column, mouse.row) {
            Some(PaletteHit::Slot(slot)) => {
                self.selected_slot = slot;
                self.insert_slot(slot);
            }
            Some(PaletteHit::Glyph(token)) => self.edit(EditAction::Insert(token)),
            None => {}
        }
    }

    fn insert_slot(&mut self, slot: usize) {
        let events = self.session.insert_from_palette(slot);
        self.handle_sheet_events(events);
    }

    fn insert_glyph(&mut self, text: &str) {
        if let Some(token) = self.glyphs.iter().find(|t| t.text == text).cloned() {
            self.edit(EditAction::Insert(token));
        }
    }

    fn edit(&mut self, action: EditAction) {
        let events = self.session.apply(action);
        self.handle_sheet_events(events);
    }

    fn handle_sheet_events(&mut self, events: Vec<SheetEvent>) {
        // Only one run per batch: a chapter completion supersedes the line run.
        let mut run_through = None;

        for event in events {
            match event {
                SheetEvent::LineComplete {
                    line,
                    requires_execution,
                } => {
                    self.status_message = format!("Line {} complete", line + 1);
                    self.status_is_error = false;
                    if requires_execution {
                        run_through = Some(line);
                    }
                }
                SheetEvent::ActiveLineChanged(_) => {
                    self.selected_slot = 0;
                }
                SheetEvent::ChapterComplete => {
                    self.status_message = String::from("Chapter complete");
                    self.status_is_error = false;
                    self.awaiting_final_output = !self.session.expected_output().is_empty();
                    run_through = Some(MAX_LINES - 1);
                }
            }
        }

        if let Some(line) = run_through {
            self.start_run(line);
        }
    }

    fn start_run(&mut self, through: usize) {
        let source = self.session.source_through(through, self.source_mode);
        self.output.begin_run();
        self.output_scroll = usize::MAX;
        if self.dispatcher.submit(source) {
            self.status_message.push_str(", previous run cancelled");
        }
    }

    /// Apply run ticks and results to the output view
    pub fn poll_execution(&mut self) {
        for update in self.dispatcher.poll() {
            match update {
                DispatchUpdate::Tick => self.output.append_marker(),
                DispatchUpdate::Finished(result) => {
                    self.output.record(&result);
                    self.output_scroll = usize::MAX;

                    if self.awaiting_final_output {
                        self.awaiting_final_output = false;
                        let matched = result
                            .as_ref()
                            .is_ok_and(|r| r.matches_expected(self.session.expected_output()));
                        self.status_is_error = !matched;
                        self.status_message = if matched {
                            String::from("Chapter complete, output matches")
                        } else {
                            String::from("Chapter complete, output differs from expected")
                        };
                    } else if let Err(err) = &result {
                        self.status_is_error = true;
                        self.status_message = format!("Run failed: {}", err);
                    }
                }
            }
        }
    }
}
