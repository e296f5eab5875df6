//! ChordSplit - wires the engine, the simulated audio thread and the UI

use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc,
    },
    thread,
    time::{Duration, Instant},
};

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};

use chordsplit::{
    io::{MidiBuffer, Transport},
    ChordEngine, EngineConfig, MAX_BLOCK_SIZE,
};

use super::script::Script;
use super::ui::{UiApp, UiInfo};

/// Main application builder
pub struct ChordSplit {
    config: EngineConfig,
    bpm: f64,
    sample_rate: f64,
    block_size: usize,
}

impl ChordSplit {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            bpm: 120.0,
            sample_rate: 48_000.0,
            block_size: 256,
        }
    }

    /// Host tempo reported to the engine
    pub fn bpm(mut self, bpm: f64) -> Self {
        self.bpm = bpm;
        self
    }

    /// Run the application (takes over the terminal until quit)
    pub fn run(self) -> EyreResult<()> {
        let block_size = self.block_size.min(MAX_BLOCK_SIZE);
        let (engine, relay_rx) = ChordEngine::from_config(&self.config);
        let params = Arc::clone(engine.params());
        let status = Arc::clone(engine.status());

        let running = Arc::new(AtomicBool::new(true));
        let midi_out = Arc::new(AtomicU64::new(0));

        let audio = AudioThread {
            engine,
            script: Script::demo(self.sample_rate, self.bpm),
            transport: Transport::new(self.sample_rate).with_bpm(self.bpm),
            block_size,
            output: MidiBuffer::with_capacity(self.config.output_capacity),
            running: Arc::clone(&running),
            midi_out: Arc::clone(&midi_out),
        };
        let handle = thread::Builder::new()
            .name("audio".into())
            .spawn(move || audio.run())
            .wrap_err("failed to spawn audio thread")?;
        log::info!(
            "audio thread running: {} Hz, {} samples per block, {} bpm",
            self.sample_rate,
            block_size,
            self.bpm
        );

        let info = UiInfo {
            bpm: self.bpm,
            sample_rate: self.sample_rate,
            block_size,
        };
        let mut ui = UiApp::new(relay_rx, params, status, midi_out, info);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        running.store(false, Ordering::Relaxed);
        handle
            .join()
            .map_err(|_| eyre!("audio thread panicked"))?;
        log::info!("chordsplit stopped");
        result
    }
}

/// Everything the simulated audio callback owns
struct AudioThread {
    engine: ChordEngine,
    script: Script,
    transport: Transport,
    block_size: usize,
    output: MidiBuffer,
    running: Arc<AtomicBool>,
    midi_out: Arc<AtomicU64>,
}

impl AudioThread {
    fn run(mut self) {
        let block_time =
            Duration::from_secs_f64(self.block_size as f64 / self.transport.sample_rate);
        let mut input = Vec::with_capacity(64);
        let mut deadline = Instant::now();

        while self.running.load(Ordering::Relaxed) {
            self.script.fill_block(self.block_size, &mut input);
            self.output.clear();
            self.engine
                .process_block(&input, self.block_size, &self.transport, &mut self.output);
            // Stand-in for the voice engine: count what it would receive
            self.midi_out
                .fetch_add(self.output.len() as u64, Ordering::Relaxed);

            deadline += block_time;
            if let Some(wait) = deadline.checked_duration_since(Instant::now()) {
                thread::sleep(wait);
            }
        }
    }
}
