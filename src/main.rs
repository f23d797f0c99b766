//! Application entry point.

use harmon::logic::audio::{AudioManager, MusicPlayer, SilentPlayer};
use harmon::logic::audio_thread;
use harmon::models::settings::Settings;
use harmon::render::app::App;
use harmon::state::Session;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("MAIN: Booting Harmon...");

    let settings = Settings::load();

    let player: Box<dyn MusicPlayer> = match audio_thread::start_audio_thread() {
        Ok(cmd_tx) => Box::new(AudioManager::new(cmd_tx)),
        Err(e) => {
            log::error!("MAIN: Could not start the audio thread: {}. Running silent.", e);
            Box::new(SilentPlayer)
        }
    };

    let session = Session::new(&settings, player);

    match App::run(&settings, session) {
        Ok(()) => {
            log::info!("MAIN: Bye");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("MAIN: {}", e);
            ExitCode::FAILURE
        }
    }
}
