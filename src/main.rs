use std::io::{self, Write};

use chordtrainer::audio;
use chordtrainer::trainer::{database, Quiz, Settings};

fn main() {
    let settings = Settings::load_with_fallback("user_settings.json", "default_settings.json");

    let database_path = format!("chord_databases/{}.json", settings.chord_database_name);
    let chords = match database::load_database(&database_path) {
        Ok(chords) => chords,
        Err(err) => {
            eprintln!("Failed to load chord database {}: {}", database_path, err);
            std::process::exit(1);
        }
    };
    println!("Loaded {} chords from {}", chords.len(), database_path);

    let mut rng = rand::rng();

    // Optional preset grid file as the only argument; random grid otherwise.
    let mut quiz = match std::env::args().nth(1) {
        Some(preset_path) => match database::load_preset(&preset_path, &chords) {
            Ok(grid) => Quiz::with_grid(chords, grid, settings.clone()),
            Err(err) => {
                eprintln!("Failed to load preset {}: {}", preset_path, err);
                std::process::exit(1);
            }
        },
        None => Quiz::new(chords, settings.clone(), &mut rng),
    };

    println!("Commands: <Enter> next chord, r replay, <number> guess, i <number> info, q quit");

    loop {
        print_grid(&quiz);
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }

        match line.trim() {
            "q" => break,
            "" => {
                quiz.next_chord(&mut rng);
                play_current(&quiz, &settings);
            }
            "r" => {
                if quiz.current().is_some() {
                    play_current(&quiz, &settings);
                } else {
                    println!("Nothing to replay yet. Press Enter first.");
                }
            }
            input => handle_guess(input, &quiz),
        }
    }
}

fn print_grid(quiz: &Quiz) {
    println!();
    let mut option = 1;
    for row in quiz.grid() {
        let labels: Vec<String> = row
            .iter()
            .map(|&index| {
                let label = format!("{}. {}", option, quiz.chord(index).repr);
                option += 1;
                label
            })
            .collect();
        println!("  {}", labels.join("   "));
    }
}

fn handle_guess(input: &str, quiz: &Quiz) {
    // "i 3" prints the chord details the GUI shows as a tooltip.
    if let Some(rest) = input.strip_prefix("i ") {
        match parse_option(rest, quiz) {
            Some(index) => println!("{}", quiz.describe(index)),
            None => println!("No option '{}'.", rest),
        }
        return;
    }

    let Some(guess) = parse_option(input, quiz) else {
        println!("No option '{}'.", input);
        return;
    };

    match quiz.check(guess) {
        Some(true) => println!("Correct: {}", quiz.chord(guess).repr),
        Some(false) => {
            let current = quiz.current().expect("check returned Some");
            println!("Wrong, it was {}", quiz.chord(current.index).repr);
        }
        None => println!("Nothing is playing yet. Press Enter first."),
    }
}

/// Maps a 1-based option number back to its chord index in the grid.
fn parse_option(input: &str, quiz: &Quiz) -> Option<usize> {
    let number: usize = input.trim().parse().ok()?;
    quiz.grid()
        .iter()
        .flatten()
        .copied()
        .nth(number.checked_sub(1)?)
}

fn play_current(quiz: &Quiz, settings: &Settings) {
    let Some(request) = quiz.request() else {
        return;
    };
    // Fire and forget: dropping the handle detaches the session, and a
    // replay before the previous session ends simply overlaps with it.
    match audio::play(&request, &settings.synth) {
        Ok(_session) => {}
        Err(err) => eprintln!("Could not play chord: {}", err),
    }
}
