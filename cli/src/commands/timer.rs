use anyhow::Result;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use cookwise_core::error::TimerError;
use cookwise_core::timer::{Timer, TimerEvent, TimerState};

use crate::render::RenderConfig;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run a countdown in the foreground. Reads one command per line from stdin:
/// `p` pauses, `s` starts, `r` resets, `q` quits and a number sets a new time.
pub(crate) async fn cmd_timer(seconds: &str, cfg: &RenderConfig) -> Result<()> {
    let mut timer = Timer::new();
    timer.set_time(seconds)?;
    timer.start()?;

    eprintln!(
        "{}",
        cfg.muted("p = pause, s = start, r = reset, <seconds> = set, q = quit")
    );
    println!("{}", timer.display());

    let mut ticker = Some(new_ticker());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            () = next_tick(&mut ticker) => match timer.tick() {
                Some(TimerEvent::Tick(_)) => println!("{}", timer.display()),
                Some(TimerEvent::Expired) => println!("{}", cfg.heading("Time's up!")),
                None => {}
            },
            line = lines.next_line(), if stdin_open => match line? {
                Some(input) => match apply_input(&mut timer, &input) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => report_state(&timer, cfg),
                    Err(e) => eprintln!("{e}"),
                },
                None => stdin_open = false,
            },
            _ = &mut ctrl_c => break,
        }

        // Only a running countdown keeps a tick source alive
        if timer.is_ticking() {
            if ticker.is_none() {
                ticker = Some(new_ticker());
            }
        } else {
            ticker = None;
            if !stdin_open {
                break;
            }
        }
    }

    Ok(())
}

fn new_ticker() -> Interval {
    let mut ticker = tokio::time::interval_at(Instant::now() + TICK, TICK);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

fn apply_input(timer: &mut Timer, input: &str) -> Result<Flow, TimerError> {
    match input.trim() {
        "" => {}
        "p" => timer.pause()?,
        "s" => timer.start()?,
        "r" => timer.reset(),
        "q" => return Ok(Flow::Quit),
        other => {
            timer.set_time(other)?;
        }
    }
    Ok(Flow::Continue)
}

fn report_state(timer: &Timer, cfg: &RenderConfig) {
    let display = timer.display();
    match timer.state() {
        TimerState::Idle => eprintln!("Timer reset"),
        TimerState::Set => eprintln!("Set to {display}. Press s to start"),
        TimerState::Running => eprintln!("Running: {display}"),
        TimerState::Paused => eprintln!("{}", cfg.muted(&format!("Paused at {display}"))),
        TimerState::Expired => eprintln!("{}", cfg.heading("Time's up!")),
    }
}
