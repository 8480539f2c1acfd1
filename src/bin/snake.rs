//! Snake entry point

use macroquad::time::{get_frame_time, get_time};
use macroquad::window::{Conf, next_frame};

use retro_arcade::audio::{AudioManager, SoundEffect};
use retro_arcade::consts::{SNAKE_HEIGHT, SNAKE_WIDTH, TUNING_ENV};
use retro_arcade::platform::{FixedStep, input};
use retro_arcade::renderer;
use retro_arcade::snake::{SnakeState, StepOutcome, handle_input, step};
use retro_arcade::{HighScoreFile, Settings, SnakeTuning, clock_seed, tuning};

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake Game".to_owned(),
        window_width: SNAKE_WIDTH as i32,
        window_height: SNAKE_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Snake starting...");

    let tuning: SnakeTuning = tuning::load_from_env(TUNING_ENV, "snake tuning");
    let settings = Settings::load();
    let mut audio = AudioManager::load(&settings).await;

    let mut state = SnakeState::new(clock_seed(), tuning, HighScoreFile::default());
    let mut clock = FixedStep::from_hz(state.speed());

    loop {
        if !handle_input(&mut state, &input::poll_snake()) {
            break;
        }
        if input::mute_pressed() {
            audio.toggle_muted();
        }

        // The step rate follows the score
        clock.set_hz(state.speed());
        for _ in 0..clock.advance(get_frame_time()) {
            match step(&mut state) {
                StepOutcome::Ate | StepOutcome::AteBonus => audio.play(SoundEffect::PowerUp),
                StepOutcome::Died { .. } => audio.play(SoundEffect::Damage),
                StepOutcome::Idle | StepOutcome::Moved => {}
            }
        }

        renderer::snake::draw(&state, &settings, get_time() as f32);
        next_frame().await;
    }

    log::info!("Final score {} (high score {})", state.score, state.high_score);
}
