use std::{
    ops::ControlFlow,
    sync::{Arc, Mutex, PoisonError},
    time::Instant,
};

use color_eyre::{eyre::eyre, Result};
use log::{error, info, warn};
use rainbow_snake::{
    client::ScoreClient,
    config::{Config, LEADERBOARD_DELAY},
    game::{autopilot, GameEvent, Session, Ticker},
    render::Screen,
    Error,
};

const REGISTRATION_ATTEMPTS: usize = 5;

/// Gives up on a round the autopilot has been circling for this long.
const MAX_TICKS: u64 = 5000;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

const MUTE_FLAG: &str = "--mute";

struct Options {
    nickname: String,
    rounds:   u32,
    mute:     bool,
}

struct Table {
    session: Session,
    screen:  Screen,
    ticks:   u64,
    mute:    bool,
}

/// `autoplay [--mute] [nickname] [rounds]`
fn parse_args<I>(args: I) -> Result<Options>
where
    I: IntoIterator<Item = String>,
{
    let (flags, args): (Vec<String>, Vec<String>) =
        args.into_iter().partition(|arg| arg.starts_with("--"));

    if let Some(unknown) = flags.iter().find(|flag| *flag != MUTE_FLAG) {
        return Err(eyre!("unknown flag {unknown}"));
    }

    let mut args = args.into_iter();
    let nickname = args.next().unwrap_or_else(|| "autopilot".to_owned());
    let rounds = args.next().map(|r| r.parse()).transpose()?.unwrap_or(1);
    Ok(Options {
        nickname,
        rounds,
        mute: !flags.is_empty(),
    })
}

/// Registers `nickname`, taking the server's suggestion whenever it's taken.
async fn register(client: &ScoreClient, nickname: String) -> Result<String> {
    let mut nickname = nickname;
    for _ in 0..REGISTRATION_ATTEMPTS {
        match client.register(&nickname).await {
            Ok(()) => return Ok(nickname),
            Err(Error::Conflict { suggestion, .. }) => {
                warn!("{} is taken, trying {}", nickname, suggestion);
                nickname = suggestion;
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(eyre!("no free nickname after {REGISTRATION_ATTEMPTS} attempts"))
}

fn on_tick(table: &mut Table) -> ControlFlow<()> {
    let Table {
        session,
        screen,
        ticks,
        mute,
    } = table;

    session.steer(autopilot::choose(session.state()));

    let now = Instant::now();
    let flow = session.advance(|event| {
        screen.apply(event, now);
        if let GameEvent::FoodEaten { .. } = event {
            if !*mute {
                // terminal bell
                print!("\x07");
            }
        }
    });
    *ticks += 1;

    let nickname = session.nickname().unwrap_or_default();
    print!("{CLEAR_SCREEN}{}", screen.draw(session.state(), nickname, now));

    if *ticks >= MAX_TICKS {
        ControlFlow::Break(())
    } else {
        flow
    }
}

async fn print_leaderboard(client: &ScoreClient, size: usize) {
    match client.leaderboard(size).await {
        Ok(entries) => {
            println!("Leaderboard");
            for (place, entry) in entries.iter().enumerate() {
                println!("{:>2}. {}: {}", place + 1, entry.nickname, entry.score);
            }
        }
        Err(e) => error!("failed to fetch leaderboard: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let options = parse_args(std::env::args().skip(1))?;
    let config = Config::from_env()?;
    let client = ScoreClient::new(config.server_url.clone());

    let nickname = register(&client, options.nickname).await?;

    let mut session = Session::new();
    session.start(nickname.clone())?;
    let table = Arc::new(Mutex::new(Table {
        session,
        screen: Screen::new(),
        ticks: 0,
        mute: options.mute,
    }));

    for round in 1..=options.rounds {
        info!("round {} of {}", round, options.rounds);

        let shared = table.clone();
        let mut ticker = Ticker::new(config.tick);
        ticker.start(move || {
            on_tick(&mut shared.lock().unwrap_or_else(PoisonError::into_inner))
        });
        ticker.finished().await;

        let (score, over) = {
            let guard = table.lock().unwrap_or_else(PoisonError::into_inner);
            let state = guard.session.state();
            (state.score, state.is_over)
        };

        client.submit_score(nickname.clone(), i64::try_from(score)?);
        tokio::time::sleep(LEADERBOARD_DELAY).await;
        print_leaderboard(&client, config.leaderboard_size).await;

        if !over {
            warn!("gave up after {} ticks without a crash", MAX_TICKS);
            break;
        }

        if round < options.rounds {
            let mut guard = table.lock().unwrap_or_else(PoisonError::into_inner);
            guard.session.reset()?;
            guard.screen.clear();
            guard.ticks = 0;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Result<Options> {
        parse_args(raw.iter().map(|arg| (*arg).to_owned()))
    }

    #[test]
    fn test_defaults() {
        let options = args(&[]).unwrap();
        assert_eq!(options.nickname, "autopilot");
        assert_eq!(options.rounds, 1);
        assert!(!options.mute);
    }

    #[test]
    fn test_mute_anywhere() {
        let options = args(&["fox", "--mute", "3"]).unwrap();
        assert_eq!(options.nickname, "fox");
        assert_eq!(options.rounds, 3);
        assert!(options.mute);
    }

    #[test]
    fn test_rejects_unknown_flags_and_bad_rounds() {
        assert!(args(&["--loud"]).is_err());
        assert!(args(&["fox", "many"]).is_err());
    }
}
