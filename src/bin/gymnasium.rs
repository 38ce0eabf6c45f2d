//! Plays a local game against a running snake server using the official
//! `battlesnake` CLI.

use std::{env, fmt, net::IpAddr, process::Command};

use cautious_snake::config::Config;
use color_eyre::{
    eyre::{bail, WrapErr},
    Result,
};
use log::info;
use reqwest::Url;

const DEFAULT_BOARD_SIZE: u64 = 11;

enum GameMode {
    Solo,
    Standard,
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Solo => "solo",
            Self::Standard => "standard",
        })
    }
}

struct PlayOptions {
    board_width:  u64,
    board_height: u64,
    mode:         GameMode,
}

struct Snake {
    name: String,
    url:  Url,
}

fn board_size(key: &str) -> Result<u64> {
    env::var(key).ok().map_or(Ok(DEFAULT_BOARD_SIZE), |size| {
        size.trim()
            .parse()
            .wrap_err_with(|| format!("{key}={size:?} is not a board size"))
    })
}

fn snake_url(config: &Config) -> Result<Url> {
    // the server binds to everything by default, but we have to dial
    // something concrete.
    let host = if config.host.is_unspecified() {
        IpAddr::from([127, 0, 0, 1])
    } else {
        config.host
    };
    let url = format!("http://{}", std::net::SocketAddr::new(host, config.port));
    url.parse().wrap_err_with(|| format!("bad snake url {url}"))
}

fn make_play_command(play_options: &PlayOptions, snakes: &[Snake]) -> Command {
    let mut cmd = Command::new("battlesnake");
    cmd.arg("play");

    cmd.arg("--width");
    cmd.arg(play_options.board_width.to_string());
    cmd.arg("--height");
    cmd.arg(play_options.board_height.to_string());

    for snake in snakes {
        cmd.arg("--name");
        cmd.arg(&snake.name);

        cmd.arg("--url");
        cmd.arg(snake.url.as_str());
    }

    cmd.arg("--gametype");
    cmd.arg(play_options.mode.to_string());

    cmd.arg("--browser");

    cmd
}

fn main() -> Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    let config = Config::from_env()?;
    let url = snake_url(&config)?;

    // two copies of ourselves make for a standard game, one plays solo.
    let copies = env::args().nth(1).map_or(Ok(1), |n| {
        n.parse::<usize>()
            .wrap_err_with(|| format!("{n:?} is not a number of snakes"))
    })?;
    if copies == 0 {
        bail!("need at least one snake to play");
    }

    let snakes: Vec<_> = (1..=copies)
        .map(|i| Snake {
            name: format!("🐕 big dog #{i}"),
            url:  url.clone(),
        })
        .collect();

    let mode = if copies == 1 {
        GameMode::Solo
    } else {
        GameMode::Standard
    };

    let play_options = PlayOptions {
        board_width:  board_size("BOARD_WIDTH")?,
        board_height: board_size("BOARD_HEIGHT")?,
        mode,
    };

    info!(
        "playing a {} game on a {}x{} board against {url}",
        play_options.mode, play_options.board_width, play_options.board_height
    );

    let status = make_play_command(&play_options, &snakes)
        .status()
        .wrap_err("couldn't run the battlesnake cli, is it installed?")?;

    if !status.success() {
        bail!("battlesnake cli exited with {status}");
    }

    Ok(())
}
