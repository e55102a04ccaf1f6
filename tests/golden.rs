use midi_writer::prelude::*;
use pretty_assertions::assert_eq;

/// Base64 of a single track file built by `fill`.
fn single_track(fill: impl FnOnce(&mut Track)) -> String {
    let mut track = Track::new();
    fill(&mut track);
    Writer::new([track]).base64().unwrap()
}

#[test]
fn header_bytes() {
    let file = Writer::new([Track::new()]).build_file().unwrap();
    assert_eq!(
        &file[..14],
        [0x4D, 0x54, 0x68, 0x64, 0x00, 0x00, 0x00, 0x06, 0x00, 0x00, 0x00, 0x01, 0x00, 0x80]
    );
}

#[test]
fn stacked_quarter_notes() {
    let note = NoteEvent::new(NoteOptions {
        pitch: vec!["C4".parse().unwrap()],
        duration: Duration::parse_sequence(["4", "4", "4"]).unwrap(),
        ..Default::default()
    })
    .unwrap();
    let base64 = single_track(|track| {
        track.add_event(note);
    });
    assert_eq!(base64, "TVRoZAAAAAYAAAABAIBNVHJrAAAADQCQPECDAIA8QAD/LwA=");
}

#[test]
fn explicit_ticks() {
    let base64 = single_track(|track| {
        track.add_event(NoteEvent::parse(&["C4"], "T50").unwrap());
    });
    assert_eq!(base64, "TVRoZAAAAAYAAAABAIBNVHJrAAAADACQPEAygDxAAP8vAA==");
}

#[test]
fn time_signatures() {
    let cases = [
        (4, 4, "TVRoZAAAAAYAAAABAIBNVHJrAAAADAD/WAQEAhgIAP8vAA=="),
        (2, 2, "TVRoZAAAAAYAAAABAIBNVHJrAAAADAD/WAQCARgIAP8vAA=="),
        (2, 8, "TVRoZAAAAAYAAAABAIBNVHJrAAAADAD/WAQCAxgIAP8vAA=="),
    ];
    for (numerator, denominator, expected) in cases {
        let base64 = single_track(|track| {
            track.set_time_signature(numerator, denominator).unwrap();
        });
        assert_eq!(base64, expected, "{numerator}/{denominator}");
    }
}

#[test]
fn key_signature() {
    let base64 = single_track(|track| {
        track.set_key_signature("C").unwrap();
    });
    assert_eq!(base64, "TVRoZAAAAAYAAAABAIBNVHJrAAAACgD/WQIAAAD/LwA=");
}

fn add_text(track: &mut Track, kind: TextKind, text: &str) {
    match kind {
        TextKind::Text => track.add_text(text),
        TextKind::Copyright => track.add_copyright(text),
        TextKind::TrackName => track.add_track_name(text),
        TextKind::InstrumentName => track.add_instrument_name(text),
        TextKind::Lyric => track.add_lyric(text),
        TextKind::Marker => track.add_marker(text),
        TextKind::CuePoint => track.add_cue_point(text),
    };
}

#[test]
fn text_events() {
    let cases = [
        (
            TextKind::Copyright,
            "2018 Garrett Grimm",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAGgD/AhIyMDE4IEdhcnJldHQgR3JpbW0A/y8A",
        ),
        (
            TextKind::Text,
            "MidiWriterJS is the bomb!",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAIQD/ARlNaWRpV3JpdGVySlMgaXMgdGhlIGJvbWIhAP8vAA==",
        ),
        (
            TextKind::TrackName,
            "Name of a cool track",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAHAD/AxROYW1lIG9mIGEgY29vbCB0cmFjawD/LwA=",
        ),
        (
            TextKind::InstrumentName,
            "Alto Saxophone",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAFgD/BA5BbHRvIFNheG9waG9uZQD/LwA=",
        ),
        (
            TextKind::Marker,
            "This is my favorite part of the song.",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAALQD/BiVUaGlzIGlzIG15IGZhdm9yaXRlIHBhcnQgb2YgdGhlIHNvbmcuAP8vAA==",
        ),
        (
            TextKind::CuePoint,
            "Here is a cue point.",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAHAD/BxRIZXJlIGlzIGEgY3VlIHBvaW50LgD/LwA=",
        ),
        (
            TextKind::Lyric,
            "Oh say can you see.",
            "TVRoZAAAAAYAAAABAIBNVHJrAAAAGwD/BRNPaCBzYXkgY2FuIHlvdSBzZWUuAP8vAA==",
        ),
    ];
    for (kind, text, expected) in cases {
        assert_eq!(single_track(|track| add_text(track, kind, text)), expected, "{kind:?}");
    }
}

#[test]
fn controller_change() {
    let base64 = single_track(|track| {
        track.controller_change(1, 127).unwrap();
    });
    assert_eq!(base64, "TVRoZAAAAAYAAAABAIBNVHJrAAAACACwAX8A/y8A");
}

#[test]
fn tempo_bytes() {
    let mut track = Track::new();
    track.set_tempo(120.);
    let chunk = track.build(&WriterOptions::default()).unwrap();
    assert_eq!(
        chunk.data(),
        [0x00, 0xFF, 0x51, 0x03, 0x07, 0xA1, 0x20, 0x00, 0xFF, 0x2F, 0x00]
    );
}
