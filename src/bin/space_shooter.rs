//! Space Shooter entry point
//!
//! Opens the window, then runs poll input → fixed-step simulation → draw
//! until the player quits from the menu.

use macroquad::time::get_frame_time;
use macroquad::window::{Conf, next_frame};

use retro_arcade::audio::{AudioManager, SoundEffect};
use retro_arcade::consts::{SHOOTER_HEIGHT, SHOOTER_WIDTH, SIM_DT, TUNING_ENV};
use retro_arcade::platform::{FixedStep, input};
use retro_arcade::renderer;
use retro_arcade::sim::{GameEvent, GameState, TickInput, tick};
use retro_arcade::{Settings, ShooterTuning, clock_seed, tuning};

fn window_conf() -> Conf {
    Conf {
        window_title: "Space Shooter".to_owned(),
        window_width: SHOOTER_WIDTH as i32,
        window_height: SHOOTER_HEIGHT as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    settings: Settings,
    audio: AudioManager,
    clock: FixedStep,
    /// Input gathered since the last simulation step
    input: TickInput,
}

impl Game {
    /// Advance the simulation by one frame's worth of fixed steps.
    /// Returns false once the player has asked to quit.
    fn update(&mut self, dt: f32) -> bool {
        input::poll_shooter(&mut self.input, &self.state.field);
        if input::mute_pressed() {
            self.audio.toggle_muted();
        }

        for _ in 0..self.clock.advance(dt) {
            tick(&mut self.state, &self.input);
            // One-shot presses are consumed by exactly one tick
            self.input.clear_one_shots();
        }

        let mut running = true;
        for event in self.state.drain_events() {
            match event {
                GameEvent::Shot => self.audio.play(SoundEffect::Shoot),
                GameEvent::Explosion => self.audio.play(SoundEffect::Explosion),
                GameEvent::PowerUpCollected => self.audio.play(SoundEffect::PowerUp),
                GameEvent::PlayerDamaged => self.audio.play(SoundEffect::Damage),
                GameEvent::BossSpawned | GameEvent::BossDefeated | GameEvent::GameOver { .. } => {}
                GameEvent::QuitRequested => running = false,
            }
        }
        running
    }

    fn render(&self) {
        renderer::shooter::draw(&self.state, &self.settings, self.audio.is_muted());
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    log::info!("Space Shooter starting...");

    let tuning: ShooterTuning = tuning::load_from_env(TUNING_ENV, "shooter tuning");
    let settings = Settings::load();
    let seed = clock_seed();
    log::info!("Session seed {}", seed);

    let state = GameState::new(seed, tuning)
        .with_particle_budget(settings.max_particles())
        .with_auto_fire(settings.auto_fire);
    let audio = AudioManager::load(&settings).await;

    let mut game = Game {
        state,
        settings,
        audio,
        clock: FixedStep::new(SIM_DT),
        input: TickInput::default(),
    };

    loop {
        if !game.update(get_frame_time()) {
            break;
        }
        game.render();
        next_frame().await;
    }

    let stats = &game.state.stats;
    log::info!(
        "Goodbye: {} games, high score {}, {} kills, {} bosses",
        stats.games_played,
        stats.high_score,
        stats.total_kills,
        stats.bosses_defeated
    );
}
