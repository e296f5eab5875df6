use std::collections::HashMap;

use chordsplit::{
    arp::rate::ArpRate,
    chord::ledger::RetriggerMode,
    io::{buffer::ALL_NOTES_OFF_CC, MidiBuffer, MidiEvent, TimedMidiEvent, Transport},
    relay::{RelayReceiver, VisualEvent},
    ChordEngine, EngineConfig,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const BLOCK: usize = 256;

fn engine_with(config: EngineConfig) -> (ChordEngine, RelayReceiver<VisualEvent>) {
    ChordEngine::from_config(&EngineConfig {
        relay_capacity: 8192,
        ..config
    })
}

fn block(engine: &mut ChordEngine, input: &[TimedMidiEvent]) -> MidiBuffer {
    let mut out = MidiBuffer::with_capacity(512);
    engine.process_block(input, BLOCK, &Transport::new(48_000.0), &mut out);
    out
}

fn ons(out: &MidiBuffer) -> Vec<u8> {
    out.note_ons().collect()
}

fn offs(out: &MidiBuffer) -> Vec<u8> {
    out.note_offs().collect()
}

#[test]
fn trigger_and_release_in_default_range() {
    let (mut engine, _rx) = engine_with(EngineConfig::default());

    let out = block(&mut engine, &[TimedMidiEvent::note_on(0, 0, 72, 100)]);
    assert_eq!(ons(&out), vec![48, 60, 72, 84]);
    assert!(offs(&out).is_empty());

    let out = block(&mut engine, &[TimedMidiEvent::note_off(17, 0, 72)]);
    assert_eq!(offs(&out), vec![48, 60, 72, 84]);
    assert!(ons(&out).is_empty());
    assert!(out.iter().all(|e| e.offset == 17));
    assert_eq!(engine.status().active_root(), None);
}

#[test]
fn last_note_priority() {
    let (mut engine, _rx) = engine_with(EngineConfig::default());
    block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(0, 0, 72, 90),
            TimedMidiEvent::note_on(10, 0, 75, 90),
        ],
    );
    assert_eq!(engine.status().active_root(), Some(75));

    let out = block(&mut engine, &[TimedMidiEvent::note_off(4, 0, 75)]);
    assert_eq!(offs(&out), vec![51, 63, 75]);
    assert_eq!(ons(&out), vec![48, 60, 72, 84]);
    for e in out.iter() {
        if let MidiEvent::NoteOn { velocity, .. } = e.event {
            assert_eq!(velocity, 127);
        }
    }
    assert_eq!(engine.status().active_root(), Some(72));
}

#[test]
fn modifier_change_revoices_minimally() {
    let (mut engine, _rx) = engine_with(EngineConfig {
        low_note: 58,
        high_note: 70,
        ..EngineConfig::default()
    });

    // Major (66) + trigger C
    let out = block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(0, 0, 66, 100),
            TimedMidiEvent::note_on(1, 0, 72, 100),
        ],
    );
    assert_eq!(ons(&out), vec![60, 64, 67]);

    // Minor (63) outranks major: only the third moves
    let out = block(&mut engine, &[TimedMidiEvent::note_on(8, 0, 63, 100)]);
    assert_eq!(offs(&out), vec![64]);
    assert_eq!(ons(&out), vec![63]);

    // Releasing minor falls back to the still-held major
    let out = block(&mut engine, &[TimedMidiEvent::note_off(8, 0, 63)]);
    assert_eq!(offs(&out), vec![63]);
    assert_eq!(ons(&out), vec![64]);
}

#[test]
fn full_retrigger_restarts_the_whole_chord() {
    let (mut engine, _rx) = engine_with(EngineConfig {
        low_note: 58,
        high_note: 70,
        retrigger: RetriggerMode::Full,
        ..EngineConfig::default()
    });
    block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(0, 0, 66, 100),
            TimedMidiEvent::note_on(0, 0, 72, 100),
        ],
    );
    let out = block(&mut engine, &[TimedMidiEvent::note_on(0, 0, 63, 100)]);
    assert_eq!(offs(&out), vec![60, 64, 67]);
    assert_eq!(ons(&out), vec![60, 63, 67]);
}

#[test]
fn mode_switch_resets_everything() {
    let (mut engine, mut rx) = engine_with(EngineConfig::default());
    block(&mut engine, &[TimedMidiEvent::note_on(0, 0, 72, 100)]);

    engine.params().set_chord_mode(false);
    let out = block(&mut engine, &[TimedMidiEvent::note_on(3, 5, 30, 100)]);
    assert_eq!(offs(&out), vec![48, 60, 72, 84]);
    assert_eq!(ons(&out), vec![30]);

    rx.drain().for_each(drop);
    engine.params().set_chord_mode(true);
    let out = block(&mut engine, &[]);
    let cleared: Vec<u8> = out
        .iter()
        .filter_map(|e| match e.event {
            MidiEvent::ControlChange {
                channel,
                controller: ALL_NOTES_OFF_CC,
                ..
            } => Some(channel),
            _ => None,
        })
        .collect();
    assert_eq!(cleared, (0..16).collect::<Vec<_>>());
    assert_eq!(rx.drain().collect::<Vec<_>>(), vec![VisualEvent::Reset]);
    assert!(engine.ledger().is_empty());
    assert!(engine.modifiers().is_empty());
}

fn arp_run(seed: u64) -> Vec<(usize, MidiEvent)> {
    let (mut engine, _rx) = engine_with(EngineConfig {
        arp_enabled: true,
        arp_rate: ArpRate::SIXTEENTH.index(),
        arp_seed: seed,
        ..EngineConfig::default()
    });
    let mut events = Vec::new();
    for b in 0..400 {
        let input: &[TimedMidiEvent] = match b {
            0 => &[
                TimedMidiEvent::note_on(0, 0, 63, 100),
                TimedMidiEvent::note_on(0, 0, 70, 100),
                TimedMidiEvent::note_on(5, 0, 74, 100),
            ],
            150 => &[TimedMidiEvent::note_on(99, 0, 79, 100)],
            399 => &[TimedMidiEvent::note_off(0, 0, 79), TimedMidiEvent::note_off(0, 0, 74)],
            _ => &[],
        };
        let out = block(&mut engine, input);
        events.extend(out.iter().map(|e| (b * BLOCK + e.offset, e.event)));
    }
    events
}

#[test]
fn arpeggio_reproduces_for_same_seed() {
    let a = arp_run(12345);
    let b = arp_run(12345);
    assert!(a.len() > 20);
    assert_eq!(a, b);
    assert_ne!(a, arp_run(54321));
}

#[test]
fn arpeggio_steps_are_evenly_spaced() {
    let events = arp_run(7);
    let on_times: Vec<usize> = events
        .iter()
        .filter(|(_, e)| matches!(e, MidiEvent::NoteOn { .. }))
        .map(|(t, _)| *t)
        .collect();
    // 1/16 at 120 bpm and 48 kHz = 6000 samples; first step at the trigger
    assert_eq!(on_times[0], 5);
    for pair in on_times.windows(2) {
        assert_eq!(pair[1] - pair[0], 6000);
    }
}

fn note_events(out: &MidiBuffer) -> Vec<(u8, bool)> {
    let mut notes: Vec<(u8, bool)> = out
        .iter()
        .filter_map(|e| e.event.normalized().note())
        .collect();
    notes.sort_unstable();
    notes
}

fn mirrored(rx: &mut RelayReceiver<VisualEvent>) -> Vec<(u8, bool)> {
    let mut notes: Vec<(u8, bool)> = rx
        .drain()
        .filter_map(|v| match v {
            VisualEvent::Note { note, on } => Some((note, on)),
            _ => None,
        })
        .collect();
    notes.sort_unstable();
    notes
}

#[test]
fn relay_mirrors_every_note_transition() {
    let (mut engine, mut rx) = engine_with(EngineConfig::default());
    let mut out = block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(0, 0, 72, 100),
            TimedMidiEvent::note_on(12, 0, 40, 100),
            TimedMidiEvent::note_on(30, 0, 67, 100),
        ],
    );
    engine.params().set_arp_enabled(true);
    let more = block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(20, 0, 40, 0),
            TimedMidiEvent::note_off(50, 0, 72),
        ],
    );
    for e in more.iter() {
        out.push(*e);
    }

    let emitted = note_events(&out);
    assert!(emitted.contains(&(40, true)) && emitted.contains(&(40, false)));
    assert_eq!(emitted, mirrored(&mut rx));
}

#[test]
fn relay_mirrors_pass_through_with_chord_mode_off() {
    let (mut engine, mut rx) = engine_with(EngineConfig {
        chord_mode: false,
        ..EngineConfig::default()
    });
    let out = block(
        &mut engine,
        &[
            TimedMidiEvent::note_on(0, 0, 72, 100),
            TimedMidiEvent::note_on(4, 1, 63, 100),
            TimedMidiEvent::note_off(9, 0, 72),
        ],
    );
    assert_eq!(ons(&out), vec![72, 63]);
    assert_eq!(
        mirrored(&mut rx),
        vec![(63, true), (72, false), (72, true)]
    );
}

/// Drive the engine with a random but physically plausible performance and
/// check every note-on is matched by exactly one note-off.
#[test]
fn random_performance_conserves_ownership() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    let (mut engine, mut rx) = engine_with(EngineConfig::default());
    let mut held = [false; 128];
    let mut sounding: HashMap<(u8, u8), i32> = HashMap::new();

    let account = |out: &MidiBuffer, sounding: &mut HashMap<(u8, u8), i32>| {
        for e in out.iter() {
            match e.event {
                MidiEvent::NoteOn { channel, key, .. } => {
                    let n = sounding.entry((channel, key)).or_default();
                    *n += 1;
                    assert_eq!(*n, 1, "note {key} started twice");
                }
                MidiEvent::NoteOff { channel, key, .. } => {
                    let n = sounding.entry((channel, key)).or_default();
                    *n -= 1;
                    assert_eq!(*n, 0, "note {key} stopped without being started");
                }
                _ => {}
            }
        }
    };

    for _ in 0..2000 {
        match rng.gen_range(0..20) {
            0 => engine.params().set_arp_enabled(rng.gen_bool(0.5)),
            1 => engine.params().set_low_note(rng.gen_range(24..90)),
            2 => engine.params().set_high_note(rng.gen_range(50..110)),
            3 => engine.params().set_retrigger(if rng.gen_bool(0.5) {
                RetriggerMode::Smart
            } else {
                RetriggerMode::Full
            }),
            4 => engine
                .params()
                .set_arp_rate(ArpRate::from_index(rng.gen_range(0..6))),
            _ => {}
        }

        let mut input = Vec::new();
        let mut offset = 0;
        for _ in 0..rng.gen_range(0..4) {
            offset = rng.gen_range(offset..BLOCK);
            let key = rng.gen_range(60..84u8);
            let channel = rng.gen_range(0..2u8);
            if held[key as usize] {
                input.push(TimedMidiEvent::note_off(offset, channel, key));
            } else {
                input.push(TimedMidiEvent::note_on(offset, channel, key, rng.gen_range(1..128)));
            }
            held[key as usize] = !held[key as usize];
        }

        let out = block(&mut engine, &input);
        account(&out, &mut sounding);
        rx.drain().for_each(drop);
    }

    // Let go of everything and hand the chord back from the arpeggiator
    let release: Vec<TimedMidiEvent> = (60..84u8)
        .filter(|k| held[*k as usize])
        .map(|k| TimedMidiEvent::note_off(0, 0, k))
        .collect();
    engine.params().set_arp_enabled(false);
    let out = block(&mut engine, &release);
    account(&out, &mut sounding);

    assert!(sounding.values().all(|n| *n == 0));
    assert!(engine.ledger().is_empty());
    assert!(engine.arpeggiator().current_note().is_none());
}
