use sdl2::audio::{AudioCallback, AudioDevice, AudioSpecDesired};

/// Something that can play the Chip-8's single tone
pub trait Sound {
    fn beep(&mut self);
    fn stop(&mut self);
}

const TONE_PITCH: f32 = 440.0;
const TONE_VOLUME: f32 = 0.1;

struct SquareWave {
    phase_inc: f32,
    phase: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = if self.phase <= 0.5 {
                TONE_VOLUME
            } else {
                -TONE_VOLUME
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

/// Square wave tone through the default SDL2 audio device
pub struct SquareBeep {
    device: AudioDevice<SquareWave>,
}

impl SquareBeep {
    pub fn new(sdl: &sdl2::Sdl) -> Result<Self, String> {
        let audio = sdl.audio()?;
        let desired = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };
        let device = audio.open_playback(None, &desired, |spec| SquareWave {
            phase_inc: TONE_PITCH / spec.freq as f32,
            phase: 0.0,
        })?;
        Ok(SquareBeep { device })
    }
}

impl Sound for SquareBeep {
    fn beep(&mut self) {
        self.device.resume();
    }

    fn stop(&mut self) {
        self.device.pause();
    }
}

/// Used when there's no audio device, or none is wanted
pub struct Mute;

impl Sound for Mute {
    fn beep(&mut self) {}

    fn stop(&mut self) {}
}
