use std::fmt::Write as _;
use std::io;

use clap::ValueEnum;
use sapper_core::{GameOverView, MenuView, Outcome, PlayView, Renderer, Tile, View};
use serde_json::{Map, Value};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Collects what every phase drew during one update and prints it when it differs from the
/// last printed frame.
#[derive(Debug)]
pub struct TerminalRenderer {
    format: Format,
    reveal_all: bool,
    pending: Vec<(String, String)>,
    last: Option<String>,
}

impl TerminalRenderer {
    pub fn new(format: Format, reveal_all: bool) -> Self {
        Self {
            format,
            reveal_all,
            pending: Vec::new(),
            last: None,
        }
    }

    /// Writes the frame collected since the previous call, returns whether anything was written.
    pub fn present(&mut self, out: &mut impl io::Write) -> io::Result<bool> {
        let mut sections = std::mem::take(&mut self.pending);
        if sections.is_empty() {
            return Ok(false);
        }
        // registry order is unspecified
        sections.sort_by(|a, b| a.0.cmp(&b.0));

        let frame = match self.format {
            Format::Text => sections
                .into_iter()
                .map(|(_, section)| section)
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Json => format!(
                "[{}]",
                sections
                    .into_iter()
                    .map(|(_, section)| section)
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        };
        if self.last.as_ref() == Some(&frame) {
            return Ok(false);
        }

        match self.format {
            Format::Text => writeln!(out, "{}\n", frame.trim_end())?,
            Format::Json => writeln!(out, "{}", frame)?,
        }
        self.last = Some(frame);
        Ok(true)
    }

    fn text(&self, view: View<'_>) -> String {
        match view {
            View::Blank => String::new(),
            View::Menu(menu) => text_menu(menu),
            View::Play(play) => text_play(play, self.reveal_all),
            View::GameOver(over) => text_game_over(over),
        }
    }

    fn json(&self, key: &str, view: View<'_>) -> String {
        let mut map = match serde_json::to_value(view) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                log::warn!("view of {:?} serialized to a non-object: {}", key, other);
                Map::new()
            }
            Err(err) => {
                log::error!("could not serialize view of {:?}: {}", key, err);
                Map::new()
            }
        };
        map.insert("key".into(), key.into());
        if let View::Play(play) = view {
            match serde_json::to_value(play.tiles(self.reveal_all)) {
                Ok(tiles) => {
                    map.insert("tiles".into(), tiles);
                }
                Err(err) => log::error!("could not serialize tiles: {}", err),
            }
        }
        Value::Object(map).to_string()
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, key: &str, view: View<'_>) {
        let section = match self.format {
            Format::Text => self.text(view),
            Format::Json => self.json(key, view),
        };
        self.pending.push((key.to_owned(), section));
    }
}

fn text_menu(menu: MenuView<'_>) -> String {
    let mut text = String::new();
    for (row, item) in menu.items.iter().enumerate() {
        let _ = writeln!(text, "{:>3}  {}", row, item);
    }
    text
}

fn text_play(play: PlayView<'_>, reveal_all: bool) -> String {
    let mut text = format!(
        "{}  [{}]  {}\n",
        play.difficulty,
        format_counter(play.mines_remaining),
        format_timer(play.elapsed_secs)
    );
    for row in play.tiles(reveal_all) {
        text.extend(row.into_iter().map(tile_char));
        text.push('\n');
    }
    text
}

fn text_game_over(over: GameOverView) -> String {
    let headline = match over.outcome {
        Outcome::Win => "You win!",
        Outcome::Lose => "You lose!",
    };
    format!(
        "{}\nYou found {} mines!\n  0  [Exit]\n",
        headline, over.mines_found
    )
}

fn tile_char(tile: Tile) -> char {
    match tile {
        Tile::Unknown => '#',
        Tile::Flag => 'F',
        Tile::Empty => '.',
        Tile::Number(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Tile::Mine => '*',
        Tile::Detonated => 'X',
    }
}

/// Three character wide counter, clamped to what such a display can show.
pub fn format_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

pub fn format_timer(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
