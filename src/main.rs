use game::{Game, GameState};
use sdl2::event::Event;
use std::collections::HashSet;
use std::time::{Duration, Instant};

mod game;

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

// dimensions of screen
const WIDTH: usize = 640;
const HEIGHT: usize = 480;

const TARGET_FPS: u64 = 30;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("FANCAST_LOG");
    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window("FANCAST", WIDTH as u32, HEIGHT as u32)
        .position_centered()
        .opengl()
        .build()?;

    window.set_resizable(false);
    window.set_maximum_size(WIDTH as u32, HEIGHT as u32)?;
    window.set_minimum_size(WIDTH as u32, HEIGHT as u32)?;
    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let mut events = sdl_ctx.event_pump().ah()?;

    let mut keys = HashSet::new();

    // initialize game
    log::info!("initializing game state");
    let mut game = Game::new(canvas)?;

    let delta = 1_000 / TARGET_FPS;

    'main_loop: loop {
        let prev = Instant::now();

        // handle events
        for ev in events.poll_iter() {
            match ev {
                Event::Quit { .. } => break 'main_loop,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    keys.insert(k);

                    if !repeat {
                        match game.game_state {
                            GameState::Playing | GameState::TopDown => game.playing_key_once(k),
                            GameState::Paused => game.game_state = GameState::Playing,
                        }

                        game.update = true;
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    keys.remove(&k);
                }
                Event::MouseMotion { x, y, .. } => {
                    game.mouse_moved(x, y);
                    game.update = true;
                }
                _ => {}
            }
        }

        for k in keys.iter() {
            match game.game_state {
                GameState::Playing | GameState::TopDown => {
                    game.playing_key(*k);
                    game.update = true;
                }
                GameState::Paused => {}
            }
        }

        // draw game
        if game.update {
            if let Err(err) = match game.game_state {
                GameState::Playing | GameState::TopDown => game.playing_draw(),
                GameState::Paused => game.pause_draw(),
            } {
                log::error!("error while in game state {:?}: {err}", game.game_state);
                Err(err)?;
            }
            game.canvas.present();

            game.update = false;

            let after = Instant::now();
            let diff = after - prev;

            if diff < Duration::from_millis(delta) {
                std::thread::sleep(Duration::from_millis(delta) - diff);
            }
        }
    }

    Ok(())
}
