//! Dedicated audio thread that owns the output stream.
//!
//! rodio's `OutputStream` cannot leave the thread that created it, so the
//! worker lives here and the game talks to it through `AudioCommand`s.

use crossbeam_channel::{Receiver, Sender, unbounded};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::thread;

/// Commands sent to the dedicated audio thread.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    /// Load an audio file; playback starts paused.
    Load { path: PathBuf },
    /// Start or resume playback.
    Play,
    /// Pause playback.
    Pause,
    /// Drop the current track.
    Stop,
    /// Change playback speed (pitch follows).
    SetSpeed { speed: f32 },
    /// Change volume level.
    SetVolume { volume: f32 },
}

struct AudioWorker {
    _stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    sink: Option<Sink>,
    speed: f32,
    volume: f32,
}

impl AudioWorker {
    fn new() -> Self {
        match OutputStream::try_default() {
            Ok((stream, stream_handle)) => {
                log::info!("AUDIO: Device found, audio enabled");
                Self {
                    _stream: Some(stream),
                    stream_handle: Some(stream_handle),
                    sink: None,
                    speed: 1.0,
                    volume: 1.0,
                }
            }
            Err(e) => {
                log::warn!(
                    "AUDIO: No audio device found ({}), running in silent mode",
                    e
                );
                Self {
                    _stream: None,
                    stream_handle: None,
                    sink: None,
                    speed: 1.0,
                    volume: 1.0,
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load { path } => self.load_music(&path),
            AudioCommand::Play => {
                if let Some(sink) = &self.sink {
                    sink.play();
                }
            }
            AudioCommand::Pause => {
                if let Some(sink) = &self.sink {
                    sink.pause();
                }
            }
            AudioCommand::Stop => {
                if let Some(sink) = self.sink.take() {
                    sink.stop();
                }
            }
            AudioCommand::SetSpeed { speed } => {
                self.speed = speed;
                if let Some(sink) = &self.sink {
                    sink.set_speed(speed);
                }
            }
            AudioCommand::SetVolume { volume } => {
                self.volume = volume;
                if let Some(sink) = &self.sink {
                    sink.set_volume(volume);
                }
            }
        }
    }

    fn load_music(&mut self, path: &Path) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }

        let Some(stream_handle) = &self.stream_handle else {
            return;
        };

        let Ok(file) = File::open(path) else {
            log::error!("AUDIO: Cannot open file {:?}", path);
            return;
        };

        let source = match Decoder::new(BufReader::new(file)) {
            Ok(source) => source,
            Err(e) => {
                log::error!("AUDIO: Cannot decode file {:?}: {}", path, e);
                return;
            }
        };

        let sink = match Sink::try_new(stream_handle) {
            Ok(sink) => sink,
            Err(e) => {
                log::error!("AUDIO: Failed to create sink: {}", e);
                return;
            }
        };
        sink.set_speed(self.speed);
        sink.set_volume(self.volume);
        sink.append(source);
        sink.pause();

        self.sink = Some(sink);
        log::info!("AUDIO: Loaded {:?}", path);
    }
}

fn run(rx: Receiver<AudioCommand>) {
    log::info!("AUDIO: Thread started");

    let mut worker = AudioWorker::new();
    while let Ok(cmd) = rx.recv() {
        worker.handle_command(cmd);
    }

    log::info!("AUDIO: Thread stopped");
}

/// Starts the audio thread and returns the command sender.
///
/// The thread exits once every sender has been dropped.
pub fn start_audio_thread() -> std::io::Result<Sender<AudioCommand>> {
    let (tx, rx) = unbounded();
    thread::Builder::new()
        .name("Audio Thread".to_string())
        .spawn(move || run(rx))?;
    Ok(tx)
}
