//! Line-driven terminal front end for a browsing session.
//!
//! Each input line is one keyboard, pointer, or gamepad event. Metadata
//! fetches run concurrently with input, and a virtual gamepad is polled on
//! the configured frame interval so a held stick repeats like a real one.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{FuturesUnordered, StreamExt};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, watch};
use tokio::task::LocalSet;

use retbro_lib::gamepad::GamepadSample;
use retbro_lib::loader::LOADED_STATUS;
use retbro_lib::{
    Command, DetailPane, Effect, InputUnifier, Key, MetadataResponse, Mode,
    PointerEvent, PollLoop, Provider, Session, View,
};

use super::{AppContext, print_record};
use crate::error::CliError;

/// Rows of the title list shown around the cursor.
const LIST_WINDOW: usize = 10;

const HELP: &str = "Commands: left right up down enter esc | hover N | click N | /text (filter) \
                    | pad X Y | press B | show | help | quit";

/// One parsed line of terminal input.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BrowseInput {
    Key(Key),
    /// Pointer over the Nth item (0-based) of the current list.
    Hover(usize),
    Click(usize),
    Filter(String),
    /// Move the virtual stick and leave it there.
    Stick { x: f32, y: f32 },
    /// Tap a virtual gamepad button.
    Press(usize),
    Show,
    Help,
    Quit,
}

fn parse_position(arg: Option<&str>, verb: &str) -> Result<usize, String> {
    let n: usize = arg
        .ok_or_else(|| format!("'{}' needs an item number", verb))?
        .trim_start_matches('#')
        .parse()
        .map_err(|_| format!("'{}' needs an item number", verb))?;
    n.checked_sub(1)
        .ok_or_else(|| "item numbers start at 1".to_string())
}

fn parse_axis(arg: Option<&str>) -> Result<f32, String> {
    let value: f32 = arg
        .ok_or_else(|| "'pad' needs X and Y".to_string())?
        .parse()
        .map_err(|_| "'pad' takes numbers between -1 and 1".to_string())?;
    Ok(value.clamp(-1.0, 1.0))
}

/// Parse one input line. Blank lines are `Ok(None)`.
pub(crate) fn parse_input(line: &str) -> Result<Option<BrowseInput>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(query) = line.strip_prefix('/') {
        return Ok(Some(BrowseInput::Filter(query.to_string())));
    }

    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default().to_lowercase();
    let input = match verb.as_str() {
        "left" => BrowseInput::Key(Key::Left),
        "right" => BrowseInput::Key(Key::Right),
        "up" => BrowseInput::Key(Key::Up),
        "down" => BrowseInput::Key(Key::Down),
        "enter" => BrowseInput::Key(Key::Enter),
        "esc" | "escape" => BrowseInput::Key(Key::Escape),
        "hover" => BrowseInput::Hover(parse_position(words.next(), "hover")?),
        "click" => BrowseInput::Click(parse_position(words.next(), "click")?),
        "pad" => BrowseInput::Stick {
            x: parse_axis(words.next())?,
            y: parse_axis(words.next())?,
        },
        "press" => BrowseInput::Press(
            words
                .next()
                .and_then(|b| b.parse().ok())
                .ok_or_else(|| "'press' needs a button number".to_string())?,
        ),
        "show" | "ls" => BrowseInput::Show,
        "help" | "?" => BrowseInput::Help,
        "quit" | "q" | "exit" => BrowseInput::Quit,
        other => return Err(format!("Unknown command '{}' (try 'help')", other)),
    };
    Ok(Some(input))
}

/// Gamepad state set from the terminal and read by the poll loop.
#[derive(Debug, Default)]
pub(crate) struct VirtualPad {
    connected: bool,
    axes: [f32; 2],
    tapped: Option<usize>,
}

impl VirtualPad {
    pub(crate) fn set_stick(&mut self, x: f32, y: f32) {
        self.connected = true;
        self.axes = [x, y];
    }

    pub(crate) fn tap(&mut self, button: usize) {
        self.connected = true;
        self.tapped = Some(button);
    }

    /// Current sample. A tapped button reads as pressed exactly once.
    pub(crate) fn sample(&mut self) -> Option<GamepadSample> {
        if !self.connected {
            return None;
        }
        let mut sample = match self.tapped.take() {
            Some(button) => GamepadSample::with_button(button),
            None => GamepadSample::default(),
        };
        sample.axes = self.axes;
        Some(sample)
    }
}

/// Commands for a pointer event. Clicking a title hovers it first, so the
/// launch picks the clicked row.
fn pointer_commands(input: &InputUnifier, index: usize, click: bool, mode: Mode) -> Vec<Command> {
    let events = match (mode, click) {
        (Mode::Browsing, false) => vec![PointerEvent::HoverSystem(index)],
        (Mode::Browsing, true) => vec![PointerEvent::ClickSystem(index)],
        (Mode::Overlay, false) => vec![PointerEvent::HoverTitle(index)],
        (Mode::Overlay, true) => vec![
            PointerEvent::HoverTitle(index),
            PointerEvent::ClickTitle(index),
        ],
    };
    events
        .into_iter()
        .filter_map(|event| input.pointer(event, mode))
        .collect()
}

fn render(view: &View) {
    match view.mode {
        Mode::Browsing => {
            for (i, tile) in view.systems.iter().enumerate() {
                let marker = if tile.selected { ">" } else { " " };
                let line = format!("{} {:>3}. {}", marker, i + 1, tile.name);
                if tile.selected {
                    log::info!("{}", line.if_supports_color(Stdout, |t| t.bold()));
                } else {
                    log::info!("{}", line);
                }
            }
        }
        Mode::Overlay => {
            let system = view
                .selected_system()
                .map(|s| s.name.as_str())
                .unwrap_or_default();
            let filter = if view.filter.is_empty() {
                String::new()
            } else {
                format!(" /{}", view.filter)
            };
            log::info!(
                "{}{}",
                system.if_supports_color(Stdout, |t| t.bold()),
                filter.if_supports_color(Stdout, |t| t.yellow()),
            );
            render_titles(view);
            crate::logging::log_blank();
            render_detail(&view.detail);
        }
    }
}

fn render_titles(view: &View) {
    let cursor = view.titles.iter().position(|t| t.selected).unwrap_or(0);
    let start = cursor.saturating_sub(LIST_WINDOW / 2);
    let end = (start + LIST_WINDOW).min(view.titles.len());
    let start = end.saturating_sub(LIST_WINDOW);

    if start > 0 {
        log::info!("  {}", "...".if_supports_color(Stdout, |t| t.dimmed()));
    }
    for (i, row) in view.titles.iter().enumerate().take(end).skip(start) {
        let marker = if row.selected { ">" } else { " " };
        let line = format!("{} {:>3}. {}", marker, i + 1, row.display_name);
        if row.selected {
            log::info!("{}", line.if_supports_color(Stdout, |t| t.bold()));
        } else {
            log::info!("{}", line);
        }
    }
    if end < view.titles.len() {
        log::info!(
            "  {}",
            format!("... {} more", view.titles.len() - end).if_supports_color(Stdout, |t| t.dimmed())
        );
    }
}

fn render_detail(detail: &DetailPane) {
    match detail {
        DetailPane::Prompt => log::info!("Select a ROM to see details."),
        DetailPane::Loading { title } => log::info!(
            "{}",
            format!("Loading info for {}...", title).if_supports_color(Stdout, |t| t.dimmed())
        ),
        DetailPane::Ready(record) => print_record(record),
        DetailPane::NoResults => {
            log::info!("{}", "No results".if_supports_color(Stdout, |t| t.yellow()))
        }
    }
}

/// Run an interactive session until `quit`, end of input, or a launch.
pub(crate) async fn run_browse(ctx: &AppContext, source: &str) -> Result<(), CliError> {
    let catalog = ctx.load_catalog(source).await?;
    if catalog.is_empty() {
        log::warn!("No ROMs found in the file.");
        return Ok(());
    }
    let session = ctx.session(catalog)?;
    LocalSet::new().run_until(browse_loop(ctx, session)).await
}

async fn browse_loop(ctx: &AppContext, mut session: Session<Provider>) -> Result<(), CliError> {
    let input = Rc::new(RefCell::new(InputUnifier::new(
        ctx.settings.input.gamepad_config(),
    )));

    let pad = Rc::new(RefCell::new(VirtualPad::default()));
    let (mode_tx, mode_rx) = watch::channel(session.mode());
    let (pad_tx, mut pad_rx) = mpsc::unbounded_channel();
    let source = {
        let pad = Rc::clone(&pad);
        move || pad.borrow_mut().sample()
    };
    let _poller = PollLoop::start(
        source,
        Rc::clone(&input),
        ctx.settings.input.poll_interval(),
        mode_rx,
        pad_tx,
    );

    log::info!("{}", LOADED_STATUS);
    log::info!("{}", HELP.if_supports_color(Stdout, |t| t.dimmed()));
    crate::logging::log_blank();
    render(&session.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: FuturesUnordered<LocalBoxFuture<'static, MetadataResponse>> =
        FuturesUnordered::new();

    loop {
        let mode = session.mode();
        let effects: Vec<Effect> = tokio::select! {
            Some(response) = pending.next(), if !pending.is_empty() => {
                if session.apply(response) {
                    render(&session.view());
                }
                continue;
            }
            Some(command) = pad_rx.recv() => vec![session.handle(command)],
            line = lines.next_line() => {
                let Some(line) = line? else {
                    log::debug!("End of input");
                    return Ok(());
                };
                let parsed = match parse_input(&line) {
                    Ok(Some(parsed)) => parsed,
                    Ok(None) => continue,
                    Err(msg) => {
                        log::warn!("{}", msg);
                        continue;
                    }
                };
                match parsed {
                    BrowseInput::Quit => return Ok(()),
                    BrowseInput::Help => {
                        log::info!("{}", HELP);
                        continue;
                    }
                    BrowseInput::Show => Vec::new(),
                    BrowseInput::Key(key) => input
                        .borrow()
                        .key(key, mode)
                        .map(|command| vec![session.handle(command)])
                        .unwrap_or_default(),
                    BrowseInput::Hover(index) => pointer_commands(&input.borrow(), index, false, mode)
                        .into_iter()
                        .map(|command| session.handle(command))
                        .collect(),
                    BrowseInput::Click(index) => pointer_commands(&input.borrow(), index, true, mode)
                        .into_iter()
                        .map(|command| session.handle(command))
                        .collect(),
                    BrowseInput::Filter(query) => vec![session.set_filter(&query)],
                    BrowseInput::Stick { x, y } => {
                        pad.borrow_mut().set_stick(x, y);
                        continue;
                    }
                    BrowseInput::Press(button) => {
                        pad.borrow_mut().tap(button);
                        continue;
                    }
                }
            }
        };

        mode_tx.send_replace(session.mode());
        for effect in effects {
            match effect {
                Effect::None => {}
                Effect::Fetch(request) => pending.push(session.fetch(request).boxed_local()),
                Effect::Launch(handoff) => {
                    log::info!(
                        "{} Launching {} ({})",
                        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                        handoff.rom_url,
                        handoff.platform.display_name(),
                    );
                    println!("{}", handoff.navigation_url(&ctx.settings.player.page));
                    return Ok(());
                }
            }
        }
        render(&session.view());
    }
}

#[cfg(test)]
#[path = "../tests/browse_tests.rs"]
mod tests;
