//! Headless line-driven client.
//!
//! Reads one command per line from stdin, feeds it to the session and prints
//! the visible part of the map with the status line and any new messages.
//! Type `help` for the command list.
mod render;

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use runtime::{GameEvent, Intent, Session, SessionConfig};

const HELP: &str = "\
commands: w/a/s/d or move <dir>   f attack   q skill strike   e interact
          t town portal   i inventory   k skills   learn <skill>   select <skill|none>
          equip <n>   buy <n>   sell <n>   leave   r restart   help   quit";

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SessionConfig::from_env();
    let mut session = Session::load(&config)?;
    tracing::info!("Starting session from {}", config.data_dir.display());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", HELP)?;
    print_frame(&mut out, &mut session)?;

    let mut last_frame = Instant::now();
    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = line.trim();
        match command {
            "quit" | "q" => break,
            "help" | "?" => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            _ => {}
        }

        match command.parse::<Intent>() {
            Ok(intent) => session.handle_intent(intent),
            Err(err) => {
                writeln!(out, "{}", err)?;
                continue;
            }
        }

        let now = Instant::now();
        session.update(now - last_frame);
        last_frame = now;
        print_frame(&mut out, &mut session)?;
    }

    tracing::info!("Session ended");
    Ok(())
}

fn print_frame(out: &mut impl Write, session: &mut Session) -> io::Result<()> {
    for event in session.drain_events() {
        match event {
            GameEvent::Toast(text) => writeln!(out, "> {}", text)?,
            other => tracing::debug!("Event: {:?}", other),
        }
    }
    write!(out, "{}", render::frame(session))?;
    writeln!(out, "{}", render::status_line(session))?;
    out.flush()
}
