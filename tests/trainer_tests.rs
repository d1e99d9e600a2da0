use chordtrainer::trainer::database::{cents, parse_database, parse_preset};
use chordtrainer::trainer::{Quiz, Settings};
use rand::rngs::SmallRng;
use rand::SeedableRng;

const DATABASE_JSON: &str = r#"[
    { "name": "Major triad", "short": "maj", "repr": "Maj", "ratios": ["1.0", "5/4", "3/2"] },
    { "name": "Minor triad", "short": "min", "repr": "Min", "ratios": ["1.0", "6/5", "3/2"] },
    { "name": "Octave", "short": "oct", "repr": "Oct", "ratios": ["1.0", "2.0"] }
]"#;

#[test]
fn database_parses_the_original_layout() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    assert_eq!(chords.len(), 3);
    assert_eq!(chords[0].short, "maj");
    assert_eq!(chords[2].ratios, vec!["1.0".to_string(), "2.0".to_string()]);
}

#[test]
fn empty_database_is_rejected() {
    assert!(parse_database("[]").is_err());
    assert!(parse_database("not json").is_err());
}

#[test]
fn preset_grids_resolve_short_names() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    let grid = parse_preset("maj; min\noct\n", &chords, "test preset").unwrap();
    assert_eq!(grid, vec![vec![0, 1], vec![2]]);
}

#[test]
fn unknown_short_name_is_reported() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    let err = parse_preset("maj; nope\n", &chords, "broken.txt").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("nope"), "message was: {}", message);
    assert!(message.contains("broken.txt"));
}

#[test]
fn cents_of_common_intervals() {
    assert!((cents(2.0) - 1200.0).abs() < 1e-9);
    assert!((cents(1.5) - 701.955).abs() < 1e-3);
    assert!(cents(1.0).abs() < 1e-12);
}

#[test]
fn settings_fall_back_to_defaults_per_key() {
    let settings = Settings::parse("{}").unwrap();
    assert_eq!(settings.chord_database_name, "default");
    assert_eq!(settings.synth.sample_rate, 44100);

    let settings = Settings::parse(r#"{ "fs": 48000, "random_w": 2 }"#).unwrap();
    assert_eq!(settings.synth.sample_rate, 48000);
    assert_eq!(settings.random_w, 2);
    assert_eq!(settings.random_h, 3);
}

#[test]
fn settings_validation_rejects_bad_values() {
    assert!(Settings::parse(r#"{ "fs": 0 }"#).is_err());
    assert!(Settings::parse(r#"{ "random_w": 0 }"#).is_err());
    assert!(Settings::parse(r#"{ "min_pitch": 400.0, "max_pitch": 100.0 }"#).is_err());
}

#[test]
fn quiz_round_trip_with_fixed_pitch() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    let settings = Settings {
        random_w: 2,
        random_h: 2,
        random_pitch: false,
        pitch: 220.0,
        ..Settings::default()
    };

    let mut rng = SmallRng::seed_from_u64(7);
    let mut quiz = Quiz::new(chords, settings, &mut rng);

    // Grid is capped by the database size: 3 chords into rows of 2.
    let grid_len: usize = quiz.grid().iter().map(|row| row.len()).sum();
    assert_eq!(grid_len, 3);

    let current = *quiz.next_chord(&mut rng);
    assert!(current.index < 3);
    assert_eq!(current.base_frequency, 220.0);

    let request = quiz.request().unwrap();
    assert_eq!(request.base_frequency, 220.0);
    assert_eq!(request.ratios, quiz.chord(current.index).ratios);

    assert_eq!(quiz.check(current.index), Some(true));
    assert_eq!(quiz.check((current.index + 1) % 3), Some(false));
}

#[test]
fn quiz_randomizes_pitch_within_range() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    let settings = Settings {
        random_pitch: true,
        min_pitch: 130.0,
        max_pitch: 440.0,
        ..Settings::default()
    };

    let mut rng = SmallRng::seed_from_u64(3);
    let mut quiz = Quiz::new(chords, settings, &mut rng);
    for _ in 0..20 {
        let current = *quiz.next_chord(&mut rng);
        assert!(current.base_frequency >= 130.0);
        assert!(current.base_frequency <= 440.0);
    }
}

#[test]
fn describe_shows_names_and_cents() {
    let chords = parse_database(DATABASE_JSON).unwrap();
    let settings = Settings::default();
    let mut rng = SmallRng::seed_from_u64(1);
    let quiz = Quiz::new(chords, settings, &mut rng);

    let text = quiz.describe(2);
    assert!(text.contains("Octave"));
    assert!(text.contains("1200.00"));
}
