//! Read-eval-render loop

use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use battler_core::api::GameApi;
use battler_core::engine::{ApiEvent, Effect};
use battler_core::session::Session;

use crate::input::{help, parse_command, Command};
use crate::render::render;

/// Wait out timer effects until the session is idle again
pub fn settle<A: GameApi, W: Write>(
    session: &mut Session<A>,
    mut effect: Effect,
    out: &mut W,
) -> Result<()> {
    loop {
        effect = match effect {
            Effect::None => return Ok(()),
            Effect::EnableMovesAfter { delay_ms } => {
                write!(out, "{}", render(&session.view()))?;
                thread::sleep(Duration::from_millis(delay_ms as u64));
                session.deliver(ApiEvent::ResumeTimerElapsed)
            }
            Effect::ResetAfter { delay_ms } => {
                write!(out, "{}", render(&session.view()))?;
                thread::sleep(Duration::from_millis(delay_ms as u64));
                session.deliver(ApiEvent::ResetTimerElapsed)
            }
            // Session runs requests itself; this only happens if it stops early.
            Effect::Request(request) => {
                log::warn!(target: "battler", "unhandled request {}", request.path());
                return Ok(());
            }
        };
    }
}

/// Run until `quit` or end of input.
pub fn run<A: GameApi, R: BufRead, W: Write>(
    session: &mut Session<A>,
    input: R,
    mut out: W,
) -> Result<()> {
    let effect = session.start();
    settle(session, effect, &mut out)?;
    write!(out, "{}", render(&session.view()))?;
    writeln!(out, "{}", help(session.state().screen))?;

    for line in input.lines() {
        let line = line?;
        let screen = session.state().screen;
        match parse_command(&line, screen) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => {
                writeln!(out, "{}", help(screen))?;
                continue;
            }
            Ok(Command::Intent(intent)) => {
                // Rejections already surface as a notice in the view.
                match session.handle(intent) {
                    Ok(effect) => settle(session, effect, &mut out)?,
                    Err(err) if err.is_input_error() => {
                        log::debug!(target: "battler", "intent refused: {}", err)
                    }
                    Err(err) => log::warn!(target: "battler", "intent failed: {}", err),
                }
            }
            Err(message) => {
                writeln!(out, "{}", message)?;
                continue;
            }
        }
        write!(out, "{}", render(&session.view()))?;
        out.flush()?;
    }
    Ok(())
}
