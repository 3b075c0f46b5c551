use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use schip8_core::{Chip8, TIMER_SPEED};
use schip8_display::Display;

use crate::audio::{Mute, Sound, SquareBeep};
use crate::config::Config;
use crate::keymap::keymap;

pub fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut chip8 = match config.seed {
        Some(seed) => Chip8::with_seed(seed),
        None => Chip8::new(),
    };

    // Load ROM
    let file = File::open(&config.rom)?;
    let mut reader = BufReader::new(file);
    chip8.load_rom(&mut reader)?;
    info!("loaded ROM {}", config.rom.display());

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, config.scale)?;
    let mut sound: Box<dyn Sound> = if config.mute {
        Box::new(Mute)
    } else {
        match SquareBeep::new(&sdl) {
            Ok(beep) => Box::new(beep),
            Err(e) => {
                warn!("no audio device, running muted: {}", e);
                Box::new(Mute)
            }
        }
    };
    let mut events = sdl.event_pump()?;

    // Instructions are run in batches, one batch per 60Hz frame
    let frame_time = Duration::from_secs(1) / TIMER_SPEED;
    let cycles_per_frame = (config.clock_speed / TIMER_SPEED).max(1);
    let mut last_frame = Instant::now();

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    scancode: Some(scancode),
                    repeat: false,
                    ..
                } => {
                    if let Some(key) = keymap(scancode) {
                        debug!("key {:X} down", key);
                        chip8.key_press(key);
                    }
                }
                Event::KeyUp {
                    scancode: Some(scancode),
                    ..
                } => {
                    if let Some(key) = keymap(scancode) {
                        debug!("key {:X} up", key);
                        chip8.key_release(key);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        for _ in 0..cycles_per_frame {
            if config.coupled_timers {
                chip8.tick()?;
            } else {
                chip8.cycle()?;
            }
        }
        if !config.coupled_timers {
            chip8.advance_timers(frame_start - last_frame);
        }
        last_frame = frame_start;

        // If the draw flag is set, unset it and render the current frame
        if let Some(frame) = chip8.get_frame() {
            display.render(&frame)?;
        }
        if chip8.sound_active() {
            sound.beep();
        } else {
            sound.stop();
        }

        // Handle timing
        let elapsed_frame_time = frame_start.elapsed();
        if frame_time > elapsed_frame_time {
            std::thread::sleep(frame_time - elapsed_frame_time);
        }
    }

    info!("shutting down");
    Ok(())
}
