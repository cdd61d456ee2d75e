use std::io::Write;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use crossterm::{
    cursor,
    event::{self, Event as CrossTermEvent, KeyCode, KeyEvent},
    style, terminal, ExecutableCommand, QueueableCommand,
};

use crate::engine::board::{Board, Idx};
use crate::engine::session::{GameSession, Phase};
use crate::engine::shift::Direction;
use crate::engine::spawn::Difficulty;
use crate::error::Result;
use crate::scores::{JsonScoreStore, ScoreRecord};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

enum Event {
    UserInput(UserInput),
    Tick,
}

enum UserInput {
    Direction(Direction),
    CycleDifficulty,
    GrowBoard,
    ShrinkBoard,
    LongerRounds,
    ShorterRounds,
    Reset,
    Quit,
}

/// Screen puts the terminal into raw mode on the alternate screen and
/// restores it when dropped, whatever path the event loop exits through.
struct Screen<T: Write> {
    w: T,
}

impl<T: Write> Screen<T> {
    fn new(mut w: T) -> Result<Self> {
        terminal::enable_raw_mode()?;
        w.execute(terminal::EnterAlternateScreen)?;
        w.execute(cursor::Hide)?;
        Ok(Self { w })
    }
}

impl<T: Write> Drop for Screen<T> {
    fn drop(&mut self) {
        self.w.execute(cursor::Show).expect("showing cursor");
        self.w
            .execute(terminal::LeaveAlternateScreen)
            .expect("leaving alternate screen");
        terminal::disable_raw_mode().expect("disabling raw mode");
    }
}

/// Slide48 hosts a GameSession in the terminal: key presses stand in for
/// the swipe decoder, a plain board printout stands in for the canvas, and
/// finished rounds land in the score store.
pub(crate) struct Slide48 {
    session: GameSession,
    store: JsonScoreStore,
    round_millis: u64,
    match_duration: Duration,
    match_start: Instant,
    status: String,
}

impl Slide48 {
    pub(crate) fn new(
        mut session: GameSession,
        store: JsonScoreStore,
        round_millis: u64,
        match_duration: Duration,
    ) -> Self {
        session.on_score_change(|old, new| log::debug!("score {} -> {}", old, new));
        Self {
            session,
            store,
            round_millis,
            match_duration,
            match_start: Instant::now(),
            status: String::from("merge your way to 2048"),
        }
    }

    pub(crate) fn run(mut self, w: impl Write) -> Result<()> {
        let mut screen = Screen::new(w)?;
        self.match_start = Instant::now();
        self.draw(&mut screen)?;

        loop {
            let event = next_event()?;
            self.session.tick(self.match_start.elapsed().as_millis() as u64);
            match event {
                Event::UserInput(UserInput::Quit) => break,
                Event::UserInput(UserInput::Reset) => self.reset(),
                Event::UserInput(UserInput::Direction(d)) => self.shift(d),
                Event::UserInput(UserInput::CycleDifficulty) => self.cycle_difficulty(),
                Event::UserInput(UserInput::GrowBoard) => self.resize_board(1),
                Event::UserInput(UserInput::ShrinkBoard) => self.resize_board(-1),
                Event::UserInput(UserInput::LongerRounds) => self.adjust_round_duration(5_000),
                Event::UserInput(UserInput::ShorterRounds) => self.adjust_round_duration(-5_000),
                Event::Tick => {}
            }
            self.draw(&mut screen)?;
        }

        Ok(())
    }

    fn shift(&mut self, direction: Direction) {
        let outcome = self.session.submit_move(&direction);
        if outcome.moved && outcome.score_delta > 0 {
            self.status = format!("+{}", outcome.score_delta);
        }
        if outcome.won {
            self.status = String::from("2048! keep playing, or press r to bank the score");
        }
        if outcome.lost {
            self.status = format!(
                "no moves left, final score {} - press r for a new round",
                self.session.score()
            );
            // only the move that ended the round banks the score; rejected
            // moves in the lost state also report lost
            if outcome.moved {
                self.save_score("lost");
            }
        }
    }

    fn reset(&mut self) {
        // a winner's score is banked at reset so play can continue freely
        if self.session.phase() == Phase::Won {
            self.save_score("won");
        }
        self.session.reset_game();
        self.status = String::from("new round");
    }

    fn cycle_difficulty(&mut self) {
        let next = match self.session.difficulty() {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        };
        self.session.set_difficulty(next.clone());
        // applies to upcoming spawns; the board keeps playing
        self.status = format!("difficulty {}", next);
    }

    fn resize_board(&mut self, delta: isize) {
        let current = self.session.board().size();
        let next = current.saturating_add_signed(delta).clamp(2, 8);
        if next != current {
            // a size change is always a fresh round
            self.session.set_board_size(next);
        }
        self.status = format!("{0}x{0} board", self.session.board().size());
    }

    fn adjust_round_duration(&mut self, delta: i64) {
        let next = self.round_millis.saturating_add_signed(delta);
        self.session.set_round_duration(next);
        if next > 0 {
            self.round_millis = next;
        }
        self.status = format!("{:.0}s per move", self.round_millis as f64 / 1000.0);
    }

    fn save_score(&mut self, cause: &str) {
        let record = ScoreRecord {
            points: self.session.score(),
            timestamp_millis: unix_millis(),
            label: format!(
                "{} {1}x{1} {2}",
                cause,
                self.session.board().size(),
                self.session.difficulty()
            ),
        };
        if let Err(e) = self.store.save(&record) {
            log::error!("score record not saved: {}", e);
            self.status = format!("score not saved: {}", e);
        }
    }

    fn draw<T: Write>(&self, screen: &mut Screen<T>) -> Result<()> {
        let w = &mut screen.w;
        w.queue(terminal::BeginSynchronizedUpdate)?;
        w.queue(terminal::Clear(terminal::ClearType::All))?;

        let header = format!(
            "slide48   score {:<8} moves {}",
            self.session.score(),
            self.session.move_count()
        );
        let round_seconds = self.session.time_remaining() as f64 / 1000.0;
        let elapsed = self.match_start.elapsed().as_millis();
        let progress = (elapsed * 100 / self.match_duration.as_millis()).min(100);
        let readouts = format!(
            "{} difficulty   round {:>4.1}s{}   match {:>3}%",
            self.session.difficulty(),
            round_seconds,
            if self.session.round_expired() { "!" } else { " " },
            progress
        );

        let mut line = 0u16;
        for text in [header.as_str(), readouts.as_str(), ""] {
            w.queue(cursor::MoveTo(0, line))?;
            w.queue(style::Print(text))?;
            line += 1;
        }
        line = render_board(w, self.session.board(), line)?;
        let help = "arrows/hjkl move - r reset - d difficulty - +/- size - [/] timer - q quit";
        for text in ["", self.status.as_str(), help] {
            w.queue(cursor::MoveTo(0, line))?;
            w.queue(style::Print(text))?;
            line += 1;
        }

        w.queue(terminal::EndSynchronizedUpdate)?;
        w.flush()?;
        Ok(())
    }
}

fn render_board(w: &mut impl Write, board: &Board, first_line: u16) -> Result<u16> {
    let size = board.size();
    let mut line = first_line;
    for r in 0..size {
        let mut row = String::with_capacity(size * 7);
        for c in 0..size {
            match board.get(&Idx(r, c)) {
                0 => row.push_str("     ."),
                value => row.push_str(&format!("{:>6}", value)),
            }
        }
        w.queue(cursor::MoveTo(0, line))?;
        w.queue(style::Print(row))?;
        line += 1;
    }
    Ok(line)
}

fn next_event() -> Result<Event> {
    loop {
        if !event::poll(POLL_INTERVAL)? {
            return Ok(Event::Tick);
        }
        match event::read()? {
            CrossTermEvent::Key(ke) => match handle_key_event(ke) {
                Some(input) => return Ok(Event::UserInput(input)),
                None => continue,
            },
            CrossTermEvent::Resize(_, _) => return Ok(Event::Tick),
            _ => continue,
        }
    }
}

fn handle_key_event(ke: KeyEvent) -> Option<UserInput> {
    let KeyEvent { code, .. } = ke;
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(UserInput::Direction(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UserInput::Direction(Direction::Right)),
        KeyCode::Up | KeyCode::Char('k') => Some(UserInput::Direction(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UserInput::Direction(Direction::Down)),
        KeyCode::Char('d') => Some(UserInput::CycleDifficulty),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(UserInput::GrowBoard),
        KeyCode::Char('-') => Some(UserInput::ShrinkBoard),
        KeyCode::Char(']') => Some(UserInput::LongerRounds),
        KeyCode::Char('[') => Some(UserInput::ShorterRounds),
        KeyCode::Char('r') => Some(UserInput::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(UserInput::Quit),
        _ => None,
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}
